use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace listing, normalized from the raw search payload.
///
/// Transient: listings are rebuilt on every scan cycle and only their ids
/// are ever persisted (in the seen-set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub url: String,
    /// Publication time, when the payload carried one.
    pub created_at: Option<DateTime<Utc>>,
}
