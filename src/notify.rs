use crate::config::NOTIFY_TIMEOUT_SECS;
use crate::filter::Evaluation;
use crate::models::Listing;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::info;

/// Delivers alerts to a Telegram chat.
///
/// Missing credentials are a valid operating mode: the notifier then logs
/// each message locally instead of sending it, so the scout can run without
/// a bot set up.
pub struct TelegramNotifier {
    client: Client,
    /// (bot token, chat id); None when either is unconfigured
    credentials: Option<(String, String)>,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        let credentials = if token.is_empty() || chat_id.is_empty() {
            None
        } else {
            Some((token.to_string(), chat_id.to_string()))
        };

        Ok(Self {
            client,
            credentials,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Send one message. In local-log mode this always succeeds.
    pub async fn notify(&self, text: &str) -> Result<()> {
        let Some((token, chat_id)) = &self.credentials else {
            let preview: String = text.chars().take(120).collect();
            info!("Telegram not configured (TOKEN/CHAT_ID missing). Message: {preview}...");
            return Ok(());
        };

        let url = format!("https://api.telegram.org/bot{token}/sendMessage");
        let response = self
            .client
            .post(&url)
            .form(&[("chat_id", chat_id.as_str()), ("text", text)])
            .send()
            .await
            .context("Telegram request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(200).collect();
            anyhow::bail!("Telegram returned {status}: {body}");
        }

        Ok(())
    }
}

/// The alert block sent for each matching listing.
pub fn format_alert(query_name: &str, listing: &Listing, eval: &Evaluation) -> String {
    let mut lines = vec![
        "🔥 New offer detected!".to_string(),
        format!("🔎 Query: {query_name}"),
        format!("📌 {}", listing.title),
        format!("💰 Price: {:.2} €", listing.price),
    ];
    if let Some(quantity) = eval.quantity {
        lines.push(format!("📦 Estimated quantity: {quantity}"));
    }
    if let Some(unit_price) = eval.unit_price {
        lines.push(format!("🔢 Estimated unit price: {unit_price:.4} €"));
    }
    lines.push(format!("🔗 {}", listing.url));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Listing {
        Listing {
            id: "12345".to_string(),
            title: "lot 100 cartes pokemon".to_string(),
            price: 2.4,
            url: "https://www.vinted.fr/items/12345".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn alert_includes_quantity_and_unit_price_when_computed() {
        let eval = Evaluation {
            matched: true,
            quantity: Some(100),
            unit_price: Some(0.024),
        };
        let msg = format_alert("Pokemon bulk", &listing(), &eval);
        assert_eq!(
            msg,
            "🔥 New offer detected!\n\
             🔎 Query: Pokemon bulk\n\
             📌 lot 100 cartes pokemon\n\
             💰 Price: 2.40 €\n\
             📦 Estimated quantity: 100\n\
             🔢 Estimated unit price: 0.0240 €\n\
             🔗 https://www.vinted.fr/items/12345"
        );
    }

    #[test]
    fn alert_omits_lines_without_data() {
        let eval = Evaluation {
            matched: true,
            quantity: None,
            unit_price: None,
        };
        let msg = format_alert("Game Boy", &listing(), &eval);
        assert!(!msg.contains("Estimated quantity"));
        assert!(!msg.contains("Estimated unit price"));
        assert!(msg.contains("💰 Price: 2.40 €"));
    }

    #[tokio::test]
    async fn notify_without_credentials_logs_locally_and_succeeds() {
        let notifier = TelegramNotifier::new("", "").unwrap();
        assert!(!notifier.is_enabled());
        assert!(notifier.notify("🔥 New offer detected!").await.is_ok());
    }
}
