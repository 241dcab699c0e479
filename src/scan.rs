use crate::config::{
    Config, POLL_JITTER_MAX_SECS, POLL_JITTER_MIN_SECS, QUERY_PAUSE_MAX_SECS,
    QUERY_PAUSE_MIN_SECS, SEARCH_PAGE_SIZE,
};
use crate::filter::evaluate;
use crate::notify::{format_alert, TelegramNotifier};
use crate::scrapers::{ListingSource, SearchQuery};
use crate::store::SeenStore;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// The polling loop: fetch, dedupe, evaluate, alert, persist, sleep, repeat.
///
/// Everything runs sequentially on one task. Each I/O step reports failure
/// as a Result and the loop logs and carries on; no error kind ever stops
/// the process.
pub struct Scanner<S: ListingSource> {
    cfg: Config,
    queries: Vec<SearchQuery>,
    source: S,
    notifier: TelegramNotifier,
    store: SeenStore,
}

impl<S: ListingSource> Scanner<S> {
    pub fn new(
        cfg: Config,
        queries: Vec<SearchQuery>,
        source: S,
        notifier: TelegramNotifier,
        store: SeenStore,
    ) -> Self {
        Self {
            cfg,
            queries,
            source,
            notifier,
            store,
        }
    }

    /// Run forever. Never returns under normal operation.
    pub async fn run(mut self) {
        // First pass right away so a fresh start reports matches without
        // waiting out a full poll interval.
        self.scan_once().await;

        loop {
            let sent = self.scan_once().await;
            if sent > 0 {
                info!("Sent {sent} notifications");
            }

            let jitter = rand::thread_rng().gen_range(POLL_JITTER_MIN_SECS..POLL_JITTER_MAX_SECS);
            let wait = (self.cfg.poll_secs as f64 + jitter).max(0.0);
            sleep(Duration::from_secs_f64(wait)).await;
        }
    }

    /// One scan pass over every configured query. Returns the number of
    /// notifications produced.
    pub async fn scan_once(&mut self) -> usize {
        let mut sent = 0;

        for query in &self.queries {
            let listings = match self.source.search(&query.query, SEARCH_PAGE_SIZE).await {
                Ok(listings) => listings,
                Err(e) => {
                    warn!("Search failed for '{}': {e:#}", query.name);
                    Vec::new()
                }
            };

            // Spread requests out when several queries are configured
            let pause = rand::thread_rng().gen_range(QUERY_PAUSE_MIN_SECS..QUERY_PAUSE_MAX_SECS);
            sleep(Duration::from_secs_f64(pause)).await;

            for listing in listings {
                if self.store.contains(&listing.id) {
                    continue;
                }

                if !is_recent(listing.created_at, self.cfg.max_item_age_min) {
                    // Suppress permanently so a fresh start or downtime gap
                    // doesn't flood alerts with historical listings.
                    self.store.insert(listing.id);
                    continue;
                }

                let evaluation = evaluate(query, &listing);
                // Mark seen whether it matched or not: every id is evaluated
                // exactly once, ever.
                self.store.insert(listing.id.clone());

                if evaluation.matched {
                    let message = format_alert(&query.name, &listing, &evaluation);
                    if let Err(e) = self.notifier.notify(&message).await {
                        warn!("Notification failed for listing {}: {e:#}", listing.id);
                    }
                    sent += 1;
                }
            }
        }

        if sent > 0 {
            if let Err(e) = self.store.persist() {
                warn!("Failed to persist seen ids: {e:#}");
            }
        }

        sent
    }
}

/// Recency gate for newly discovered listings. A listing with no known
/// publication time passes; unknown means allow.
fn is_recent(created_at: Option<DateTime<Utc>>, max_age_min: i64) -> bool {
    match created_at {
        None => true,
        Some(ts) => {
            let age_min = Utc::now().signed_duration_since(ts).num_seconds() as f64 / 60.0;
            age_min <= max_age_min as f64
        }
    }
}
