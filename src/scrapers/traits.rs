use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing sources
/// This allows easy addition of new marketplaces (Leboncoin, eBay, etc) in the future
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Run one search against the source and return normalized listings
    async fn search(&self, query_text: &str, per_page: usize) -> Result<Vec<Listing>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
