mod config;
mod filter;
mod models;
mod notify;
mod parse;
mod scan;
mod scrapers;
mod store;

use config::{default_queries, Config, SEEN_PATH};
use notify::TelegramNotifier;
use scan::Scanner;
use scrapers::VintedScraper;
use store::SeenStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    info!("🛒 Vinted Scout — marketplace deal watcher");
    info!("==========================================");

    let queries = default_queries();
    info!("Monitored searches:");
    for query in &queries {
        info!("- {}: '{}'", query.name, query.query);
    }
    info!(
        "Polling every {}s | max listing age on startup: {} min",
        cfg.poll_secs, cfg.max_item_age_min
    );

    let store = SeenStore::load(SEEN_PATH);
    info!("Loaded {} previously seen listing ids", store.len());

    let scraper = VintedScraper::new()?;
    let notifier = TelegramNotifier::new(&cfg.telegram_token, &cfg.telegram_chat_id)?;
    if !notifier.is_enabled() {
        warn!("TOKEN/CHAT_ID not set — alerts will only be logged locally");
    }

    Scanner::new(cfg, queries, scraper, notifier, store)
        .run()
        .await;

    Ok(())
}
