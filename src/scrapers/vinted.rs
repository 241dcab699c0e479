use crate::config::{BASE_URL, SEARCH_API_URL, SEARCH_TIMEOUT_SECS};
use crate::models::Listing;
use crate::parse::parse_amount;
use crate::scrapers::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Vinted catalog scraper
///
/// Talks to the JSON endpoint the Vinted webapp uses. There is no official
/// public API, so this can stop working whenever Vinted changes their
/// frontend.
pub struct VintedScraper {
    client: Client,
}

impl VintedScraper {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .default_headers(Self::default_headers())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Browser-like headers to reduce the chance of the request being rejected
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                 AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/123.0 Safari/537.36",
            ),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://www.vinted.fr/"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("fr-FR,fr;q=0.9,en;q=0.8"),
        );
        headers
    }

    /// Build a Listing from one raw catalog item.
    ///
    /// Returns None when the item has no usable id. The payload is loose:
    /// ids arrive as numbers or strings, prices as scalars or
    /// `{"amount": ...}` objects, and the url is sometimes only a path.
    fn normalize_item(item: &Value) -> Option<Listing> {
        let id = match item.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return None,
        };

        let title = item
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let price = match item.get("price") {
            Some(Value::Object(obj)) => parse_amount(obj.get("amount").unwrap_or(&Value::Null)),
            Some(v) => parse_amount(v),
            None => 0.0,
        };

        let path = item
            .get("url")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                item.get("path")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            });
        let url = match path {
            Some(p) if p.starts_with("http") => p.to_string(),
            Some(p) => format!("{BASE_URL}{p}"),
            None => format!("{BASE_URL}/items/{id}"),
        };

        let created_at = item
            .get("created_at_ts")
            .and_then(|v| {
                v.as_i64()
                    .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
            })
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Some(Listing {
            id,
            title,
            price,
            url,
            created_at,
        })
    }
}

#[async_trait]
impl ListingSource for VintedScraper {
    async fn search(&self, query_text: &str, per_page: usize) -> Result<Vec<Listing>> {
        let per_page = per_page.to_string();
        let params = [
            ("search_text", query_text),
            ("per_page", per_page.as_str()),
            ("page", "1"),
            ("order", "newest_first"),
            ("currency", "EUR"),
        ];

        let response = self
            .client
            .get(SEARCH_API_URL)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Search request failed for '{query_text}'"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(160).collect();
            anyhow::bail!("Search for '{query_text}' returned {status}: {body}");
        }

        let payload: Value = response
            .json()
            .await
            .with_context(|| format!("Search response for '{query_text}' was not valid JSON"))?;

        let listings: Vec<Listing> = payload
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Self::normalize_item).collect())
            .unwrap_or_default();

        debug!(
            "{} returned {} listings for '{}'",
            self.source_name(),
            listings.len(),
            query_text
        );

        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Vinted"
    }
}
