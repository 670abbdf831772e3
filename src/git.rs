//! Commit metadata from the local repository

use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{NotifyError, Result};
use crate::event::{self, CommitRange};

/// Length of the abbreviated hash shown in messages
pub const SHORT_SHA_LEN: usize = 8;

/// Metadata git reports for one commit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommitInfo {
    pub subject: String,
    pub body: String,
    pub author: String,
}

/// A commit ready to be rendered into a notification
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub sha: String,
    pub subject: String,
    pub body: String,
    pub author: String,
}

impl Commit {
    pub fn new(sha: impl Into<String>, info: CommitInfo) -> Self {
        Self {
            sha: sha.into(),
            subject: info.subject,
            body: info.body,
            author: info.author,
        }
    }

    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(SHORT_SHA_LEN) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }
}

/// Read access to commit history
#[allow(async_fn_in_trait)]
pub trait CommitSource {
    /// Subject, body and author of exactly one commit
    async fn read_commit(&self, rev: &str) -> Result<CommitInfo>;

    /// Hashes in `range`, oldest first
    async fn list_range(&self, range: &CommitRange) -> Result<Vec<String>>;
}

/// `CommitSource` backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Run git with `args` and return its stdout.
    async fn run(&self, operation: &str, args: &[&str]) -> Result<String> {
        debug!(
            "Running (cwd = '{}'): git {}",
            self.repo_dir.display(),
            args.join(" ")
        );
        let output = Command::new("git")
            .current_dir(&self.repo_dir)
            .args(args)
            .output()
            .await
            .map_err(|e| NotifyError::GitOperationFailed {
                operation: operation.to_string(),
                message: format!("failed to start git: {}", e),
            })?;

        if !output.status.success() {
            return Err(NotifyError::GitOperationFailed {
                operation: operation.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl CommitSource for GitCli {
    async fn read_commit(&self, rev: &str) -> Result<CommitInfo> {
        let operation = format!("git log -1 {}", rev);
        let stdout = self
            .run(&operation, &["log", "-1", "--format=%s%x00%b%x00%an", rev, "--"])
            .await?;
        parse_commit_info(&stdout).ok_or_else(|| NotifyError::GitOperationFailed {
            operation,
            message: format!("unexpected output: {:?}", stdout),
        })
    }

    async fn list_range(&self, range: &CommitRange) -> Result<Vec<String>> {
        let revspec = range.revspec();
        let stdout = self
            .run(
                &format!("git rev-list --reverse {}", revspec),
                &["rev-list", "--reverse", &revspec],
            )
            .await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Split `subject NUL body NUL author` into its parts.
fn parse_commit_info(stdout: &str) -> Option<CommitInfo> {
    let mut parts = stdout.splitn(3, '\0');
    let subject = parts.next()?.trim().to_string();
    let body = parts.next()?.trim().to_string();
    let author = parts.next()?.trim().to_string();
    Some(CommitInfo {
        subject,
        body,
        author,
    })
}

/// Full metadata for every commit in `range`, oldest first.
pub async fn commits_in_range<S: CommitSource>(
    source: &S,
    range: &CommitRange,
) -> Result<Vec<Commit>> {
    let hashes = source.list_range(range).await?;
    read_commits(source, hashes).await
}

async fn read_commits<S: CommitSource>(source: &S, hashes: Vec<String>) -> Result<Vec<Commit>> {
    let mut commits = Vec::with_capacity(hashes.len());
    for sha in hashes {
        let info = source.read_commit(&sha).await.inspect_err(|e| {
            error!("Failed to get commit information for {}: {}", sha, e);
        })?;
        commits.push(Commit::new(sha, info));
    }
    Ok(commits)
}

/// Pick the commits this run reports on.
///
/// Uses the pushed range when the event describes one and git can list it,
/// otherwise the checked-out head labelled with the configured sha.
pub async fn collect_commits<S: CommitSource>(config: &Config, source: &S) -> Result<Vec<Commit>> {
    if let Some(range) = event::resolve_range(config.event_path.as_deref()) {
        match source.list_range(&range).await {
            Ok(hashes) if hashes.is_empty() => {
                warn!("Range {} contains no commits, using HEAD", range.revspec());
            }
            Ok(hashes) => {
                info!("Found {} commit(s) in {}", hashes.len(), range.revspec());
                return read_commits(source, hashes).await;
            }
            Err(e) => {
                warn!("Could not list range {}, using HEAD: {}", range.revspec(), e);
            }
        }
    }

    let info = source.read_commit("HEAD").await.inspect_err(|e| {
        error!("Failed to get commit information: {}", e);
    })?;
    Ok(vec![Commit::new(config.sha.clone(), info)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nul_separated_fields() {
        let info = parse_commit_info("Fix bug\0Longer\n\nexplanation\n\0Alice\n").unwrap();
        assert_eq!(info.subject, "Fix bug");
        assert_eq!(info.body, "Longer\n\nexplanation");
        assert_eq!(info.author, "Alice");
    }

    #[test]
    fn empty_body_is_empty_string() {
        let info = parse_commit_info("Fix bug\0\0Alice").unwrap();
        assert_eq!(info.body, "");
    }

    #[test]
    fn rejects_truncated_output() {
        assert_eq!(parse_commit_info("just a subject"), None);
    }

    #[test]
    fn short_sha_is_eight_chars() {
        let commit = Commit::new("abcdef0123456789", CommitInfo::default());
        assert_eq!(commit.short_sha(), "abcdef01");
        let tiny = Commit::new("abc", CommitInfo::default());
        assert_eq!(tiny.short_sha(), "abc");
    }
}
