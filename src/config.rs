use crate::scrapers::SearchQuery;

pub const BASE_URL: &str = "https://www.vinted.fr";
pub const SEARCH_API_URL: &str = "https://www.vinted.fr/api/v2/catalog/items";

/// Listings fetched per search request.
pub const SEARCH_PAGE_SIZE: usize = 30;

/// Per-request timeout for the marketplace search (seconds).
pub const SEARCH_TIMEOUT_SECS: u64 = 15;

/// Per-request timeout for Telegram delivery (seconds).
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Random pause between consecutive query searches (seconds).
pub const QUERY_PAUSE_MIN_SECS: f64 = 0.4;
pub const QUERY_PAUSE_MAX_SECS: f64 = 1.2;

/// Jitter added to the poll interval so request timing never looks periodic (seconds).
pub const POLL_JITTER_MIN_SECS: f64 = -5.0;
pub const POLL_JITTER_MAX_SECS: f64 = 8.0;

/// Where the seen listing ids are persisted.
pub const SEEN_PATH: &str = "seen.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token (TOKEN); empty disables delivery
    pub telegram_token: String,
    /// Telegram chat id (CHAT_ID); empty disables delivery
    pub telegram_chat_id: String,
    /// Seconds between scan cycles (POLL_SECONDS)
    pub poll_secs: u64,
    /// Listings older than this are suppressed without evaluation (MAX_ITEM_AGE_MIN)
    pub max_item_age_min: i64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            telegram_token: std::env::var("TOKEN")
                .unwrap_or_default()
                .trim()
                .to_string(),
            telegram_chat_id: std::env::var("CHAT_ID")
                .unwrap_or_default()
                .trim()
                .to_string(),
            poll_secs: std::env::var("POLL_SECONDS")
                .unwrap_or_else(|_| "90".to_string())
                .parse::<u64>()
                .unwrap_or(90),
            max_item_age_min: std::env::var("MAX_ITEM_AGE_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<i64>()
                .unwrap_or(60),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// The monitored searches. Fixed at build time; edit here to change what the
/// scout watches.
pub fn default_queries() -> Vec<SearchQuery> {
    vec![
        // Pokemon bulk: target a max price per card
        SearchQuery {
            name: "Pokemon bulk".to_string(),
            query: "lot cartes pokemon".to_string(),
            max_price: None,
            max_unit_price: Some(0.06),
            min_quantity: Some(80),
        },
        // Yu-Gi-Oh bulk
        SearchQuery {
            name: "YuGiOh bulk".to_string(),
            query: "lot cartes yugioh".to_string(),
            max_price: None,
            max_unit_price: Some(0.04),
            min_quantity: Some(80),
        },
        // Loose Lego: weight rarely appears in titles, so only cap the lot price
        SearchQuery {
            name: "Lego vrac".to_string(),
            query: "lego vrac lot".to_string(),
            max_price: Some(30.0),
            max_unit_price: None,
            min_quantity: None,
        },
        // Retro consoles: plain price cap
        SearchQuery {
            name: "Game Boy".to_string(),
            query: "game boy console".to_string(),
            max_price: Some(40.0),
            max_unit_price: None,
            min_quantity: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_queries_cover_the_watched_searches() {
        let queries = default_queries();
        assert_eq!(queries.len(), 4);
        assert!(queries.iter().all(|q| !q.query.is_empty()));
        // The bulk searches need both a unit price ceiling and a quantity floor
        let bulk = queries.iter().find(|q| q.name == "Pokemon bulk").unwrap();
        assert_eq!(bulk.max_unit_price, Some(0.06));
        assert_eq!(bulk.min_quantity, Some(80));
    }
}
