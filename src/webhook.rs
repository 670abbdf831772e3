//! Delivery of webhook messages to Discord

use reqwest::StatusCode;
use tracing::{error, info};

use crate::embed::WebhookMessage;
use crate::error::{NotifyError, Result};

pub const USER_AGENT: &str = "sketch.dev developers";
/// Marker in the body of a 403 Discord sends for an unknown webhook
const UNKNOWN_WEBHOOK_MARKER: &str = "error code: 1010";

/// Destination for a finished notification
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn deliver(&self, message: &WebhookMessage, commit_count: usize) -> Result<()>;
}

/// Posts messages to a Discord webhook URL
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

/// HTTP client settings every webhook request uses
pub fn client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().user_agent(USER_AGENT)
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self::from_client(client_builder().build()?, url))
    }

    pub fn from_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Notifier for DiscordWebhook {
    async fn deliver(&self, message: &WebhookMessage, _commit_count: usize) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            info!("Discord notification sent successfully");
            return Ok(());
        }

        // Body is diagnostics only, an unreadable one is reported as empty.
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, body))
    }
}

/// Map a non-204 response onto the matching error.
fn classify_failure(status: StatusCode, body: String) -> NotifyError {
    if status.is_success() {
        return NotifyError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        };
    }
    if status == StatusCode::FORBIDDEN && body.contains(UNKNOWN_WEBHOOK_MARKER) {
        error!(
            "Discord webhook HTTP error: {} - Error details: {}",
            status, body
        );
        return NotifyError::WebhookNotFound;
    }
    NotifyError::WebhookHttp {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        body,
    }
}

/// Prints the message instead of sending it
#[derive(Debug, Clone, Default)]
pub struct DryRun;

impl Notifier for DryRun {
    async fn deliver(&self, message: &WebhookMessage, commit_count: usize) -> Result<()> {
        println!("{}", render_dry_run(message, commit_count)?);
        info!("✓ Test mode: payload generated successfully");
        Ok(())
    }
}

/// Pretty payload followed by size statistics.
pub fn render_dry_run(message: &WebhookMessage, commit_count: usize) -> Result<String> {
    let pretty = serde_json::to_string_pretty(message)?;
    let payload_bytes = serde_json::to_vec(message)?.len();
    let (title_chars, description_chars) = message
        .embed()
        .map(|e| (e.title.chars().count(), e.description.chars().count()))
        .unwrap_or_default();

    Ok(format!(
        "Generated Discord payload:\n{}\n\
         Payload size: {} bytes\n\
         Title length: {} characters\n\
         Description length: {} characters\n\
         Commits: {}",
        pretty, payload_bytes, title_chars, description_chars, commit_count
    ))
}
