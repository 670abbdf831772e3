//! Discord embed payloads built from commits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Repository;
use crate::git::Commit;
use crate::truncate::truncate_text;

/// Accent color shared by every notification
pub const EMBED_COLOR: u32 = 5814783;
/// Discord allows 256 characters in an embed title
pub const MAX_TITLE_LEN: usize = 256;
/// Well under Discord's 4096 description limit
pub const MAX_DESCRIPTION_LEN: usize = 2000;
/// Character budget for commit lines once a digest overflows
pub const DIGEST_BUDGET: usize = 1900;
/// Distinct authors listed by name before collapsing to "and N others"
const MAX_NAMED_AUTHORS: usize = 3;

/// Body of a webhook execution request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }
}

impl WebhookMessage {
    /// The embed every message is built around
    pub fn embed(&self) -> Option<&Embed> {
        self.embeds.first()
    }
}

/// Format a timestamp the way Discord expects: UTC with milliseconds.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Build the message for `commits`, stamped with the current time.
pub fn build_message_now(commits: &[Commit], repository: &Repository) -> WebhookMessage {
    build_message(commits, repository, Utc::now())
}

/// Build a detailed embed for one commit or a digest for several.
pub fn build_message(
    commits: &[Commit],
    repository: &Repository,
    at: DateTime<Utc>,
) -> WebhookMessage {
    let (title, description, fields) = match commits {
        [commit] => single_commit(commit, repository),
        _ => digest(commits, repository),
    };

    WebhookMessage {
        embeds: vec![Embed {
            title,
            description,
            color: EMBED_COLOR,
            fields,
            timestamp: format_timestamp(at),
        }],
    }
}

fn commit_link(commit: &Commit, repository: &Repository) -> String {
    format!(
        "[{}]({})",
        commit.short_sha(),
        repository.commit_url(&commit.sha)
    )
}

fn single_commit(commit: &Commit, repository: &Repository) -> (String, String, Vec<EmbedField>) {
    (
        truncate_text(&commit.subject, MAX_TITLE_LEN),
        truncate_text(&commit.body, MAX_DESCRIPTION_LEN),
        vec![
            EmbedField::inline("Author", commit.author.as_str()),
            EmbedField::inline("Commit", commit_link(commit, repository)),
        ],
    )
}

fn digest(commits: &[Commit], repository: &Repository) -> (String, String, Vec<EmbedField>) {
    let lines: Vec<String> = commits
        .iter()
        .map(|c| format!("{} {} - {}", commit_link(c, repository), c.subject, c.author))
        .collect();

    (
        format!("{} commits pushed to main", commits.len()),
        digest_description(&lines),
        vec![
            EmbedField::inline("Authors", authors_summary(commits)),
            EmbedField::inline("Commits", commits.len().to_string()),
        ],
    )
}

/// Join commit lines, summarising the tail when they do not fit.
fn digest_description(lines: &[String]) -> String {
    let joined = lines.join("\n");
    if joined.chars().count() <= MAX_DESCRIPTION_LEN {
        return joined;
    }

    let mut kept: Vec<String> = Vec::new();
    let mut total = 0;
    for (i, line) in lines.iter().enumerate() {
        let line_len = line.chars().count() + 1;
        if total + line_len >= DIGEST_BUDGET {
            kept.push(format!("...and {} more commits", lines.len() - i));
            break;
        }
        kept.push(line.clone());
        total += line_len;
    }
    kept.join("\n")
}

/// Distinct authors in first-seen order.
fn authors_summary(commits: &[Commit]) -> String {
    let mut authors: Vec<&str> = Vec::new();
    for commit in commits {
        if !authors.contains(&commit.author.as_str()) {
            authors.push(&commit.author);
        }
    }

    if authors.len() > MAX_NAMED_AUTHORS {
        format!("{} and {} others", authors[0], authors.len() - 1)
    } else {
        authors.join(", ")
    }
}
