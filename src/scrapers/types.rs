use serde::{Deserialize, Serialize};

/// One monitored search and its matching rules.
///
/// Every rule is optional; a listing must satisfy all configured rules to
/// match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Display name used in alerts and logs
    pub name: String,
    /// Free-text search sent to the marketplace
    pub query: String,
    /// Maximum total price (EUR)
    pub max_price: Option<f64>,
    /// Maximum price per unit (EUR), requires a quantity in the title
    pub max_unit_price: Option<f64>,
    /// Minimum quantity detected in the title
    pub min_quantity: Option<u32>,
}
