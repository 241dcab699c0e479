use crate::models::Listing;
use crate::parse::extract_quantity;
use crate::scrapers::SearchQuery;

/// Outcome of checking one listing against one query's rules.
///
/// `quantity` is reported even on rejection; `unit_price` once it has been
/// computed. Both are carried into the alert message on a match.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub matched: bool,
    pub quantity: Option<u32>,
    pub unit_price: Option<f64>,
}

impl Evaluation {
    fn rejected(quantity: Option<u32>, unit_price: Option<f64>) -> Self {
        Self {
            matched: false,
            quantity,
            unit_price,
        }
    }
}

/// Apply a query's rules to a listing, short-circuiting on the first failure:
///
/// 1. `min_quantity`: a quantity must be detected in the title and reach the floor.
/// 2. `max_price`: total price must not exceed the ceiling.
/// 3. `max_unit_price`: needs a detected quantity; price / quantity must not
///    exceed the ceiling.
pub fn evaluate(query: &SearchQuery, listing: &Listing) -> Evaluation {
    let quantity = extract_quantity(&listing.title);

    if let Some(min_quantity) = query.min_quantity {
        match quantity {
            Some(q) if q >= min_quantity => {}
            _ => return Evaluation::rejected(quantity, None),
        }
    }

    if let Some(max_price) = query.max_price {
        if listing.price > max_price {
            return Evaluation::rejected(quantity, None);
        }
    }

    let mut unit_price = None;
    if let Some(max_unit_price) = query.max_unit_price {
        let Some(q) = quantity.filter(|&q| q > 0) else {
            return Evaluation::rejected(quantity, None);
        };
        let unit = listing.price / f64::from(q);
        unit_price = Some(unit);
        if unit > max_unit_price {
            return Evaluation::rejected(quantity, unit_price);
        }
    }

    Evaluation {
        matched: true,
        quantity,
        unit_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, price: f64) -> Listing {
        Listing {
            id: "1".to_string(),
            title: title.to_string(),
            price,
            url: "https://www.vinted.fr/items/1".to_string(),
            created_at: None,
        }
    }

    fn query(
        max_price: Option<f64>,
        max_unit_price: Option<f64>,
        min_quantity: Option<u32>,
    ) -> SearchQuery {
        SearchQuery {
            name: "test".to_string(),
            query: "test".to_string(),
            max_price,
            max_unit_price,
            min_quantity,
        }
    }

    #[test]
    fn rejects_below_minimum_quantity() {
        let result = evaluate(&query(None, None, Some(80)), &listing("lot 50 cartes", 10.0));
        assert!(!result.matched);
        assert_eq!(result.quantity, Some(50));
        assert_eq!(result.unit_price, None);
    }

    #[test]
    fn rejects_when_no_quantity_detected_but_minimum_required() {
        let result = evaluate(&query(None, None, Some(80)), &listing("cartes en vrac", 10.0));
        assert!(!result.matched);
        assert_eq!(result.quantity, None);
    }

    #[test]
    fn rejects_above_total_price_ceiling() {
        let result = evaluate(&query(Some(30.0), None, None), &listing("lot 90 cartes", 35.0));
        assert!(!result.matched);
        assert_eq!(result.quantity, Some(90));
    }

    #[test]
    fn matches_within_unit_price_ceiling() {
        let result = evaluate(&query(None, Some(0.06), None), &listing("lot 60 cartes", 3.0));
        assert!(result.matched);
        assert_eq!(result.quantity, Some(60));
        let unit = result.unit_price.unwrap();
        assert!((unit - 0.05).abs() < 1e-9);
    }

    #[test]
    fn rejects_above_unit_price_ceiling_and_reports_the_computed_unit() {
        let result = evaluate(&query(None, Some(0.02), None), &listing("lot 60 cartes", 3.0));
        assert!(!result.matched);
        assert!((result.unit_price.unwrap() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn unit_price_rule_requires_a_quantity() {
        let result = evaluate(&query(None, Some(0.06), None), &listing("cartes", 3.0));
        assert!(!result.matched);
        assert_eq!(result.quantity, None);
        assert_eq!(result.unit_price, None);
    }

    #[test]
    fn matches_when_no_rules_are_configured() {
        let result = evaluate(&query(None, None, None), &listing("anything", 999.0));
        assert!(result.matched);
        assert_eq!(result.unit_price, None);
    }

    #[test]
    fn bulk_scenario_matches_all_rules() {
        let result = evaluate(
            &query(None, Some(0.06), Some(80)),
            &listing("lot 100 cartes pokemon", 2.4),
        );
        assert!(result.matched);
        assert_eq!(result.quantity, Some(100));
        assert!((result.unit_price.unwrap() - 0.024).abs() < 1e-9);
    }
}
