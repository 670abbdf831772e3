//! Environment validation and run configuration

use std::path::PathBuf;

use crate::error::{NotifyError, Result};

pub const ENV_SHA: &str = "GITHUB_SHA";
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_WEBHOOK: &str = "DISCORD_WEBHOOK_FOR_COMMITS";
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
pub const ENV_TEST_MODE: &str = "DISCORD_TEST_MODE";
pub const ENV_SERVER_URL: &str = "GITHUB_SERVER_URL";
pub const ENV_WORKSPACE: &str = "GITHUB_WORKSPACE";

const DEFAULT_SERVER_URL: &str = "https://github.com";

/// The repository commit links point at.
#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    pub server_url: String,
    /// `owner/name`
    pub name: String,
}

impl Repository {
    pub fn new(server_url: &str, name: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            name: name.to_string(),
        }
    }

    /// Browser URL of a single commit
    pub fn commit_url(&self, sha: &str) -> String {
        format!("{}/{}/commit/{}", self.server_url, self.name, sha)
    }
}

/// Everything a single notification run needs from its environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub sha: String,
    pub repository: Repository,
    pub webhook_url: String,
    pub event_path: Option<PathBuf>,
    pub test_mode: bool,
    pub repo_dir: PathBuf,
}

impl Config {
    /// Validate and load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Required variables are checked in a fixed order and the first one that
    /// is missing or empty is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &'static str| non_empty(key).ok_or(NotifyError::MissingEnv(key));

        let sha = required(ENV_SHA)?;
        let repository = required(ENV_REPOSITORY)?;
        let webhook_url = required(ENV_WEBHOOK)?;

        let server_url =
            non_empty(ENV_SERVER_URL).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Ok(Self {
            sha,
            repository: Repository::new(&server_url, &repository),
            webhook_url,
            event_path: non_empty(ENV_EVENT_PATH).map(PathBuf::from),
            test_mode: lookup(ENV_TEST_MODE).as_deref() == Some("1"),
            repo_dir: non_empty(ENV_WORKSPACE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
