pub mod config;
pub mod embed;
pub mod error;
pub mod event;
pub mod git;
pub mod logging;
pub mod truncate;
pub mod webhook;

use tracing::info;

use crate::config::Config;
use crate::embed::WebhookMessage;
use crate::error::Result;
use crate::git::CommitSource;
use crate::webhook::{DiscordWebhook, DryRun, Notifier};

/// Collect commits, build the message and hand it to `notifier`.
///
/// Returns the message that was delivered.
pub async fn notify<S, N>(config: &Config, source: &S, notifier: &N) -> Result<WebhookMessage>
where
    S: CommitSource,
    N: Notifier,
{
    let commits = git::collect_commits(config, source).await?;
    let message = embed::build_message_now(&commits, &config.repository);
    notifier.deliver(&message, commits.len()).await?;
    Ok(message)
}

/// Run one notification against the real git repository and webhook.
pub async fn run_notification(config: &Config) -> Result<()> {
    let source = git::GitCli::new(&config.repo_dir);

    if config.test_mode {
        info!("Running in test mode - will not send actual webhook");
        notify(config, &source, &DryRun).await?;
    } else {
        let webhook = DiscordWebhook::new(&config.webhook_url)?;
        notify(config, &source, &webhook).await?;
    }
    Ok(())
}
