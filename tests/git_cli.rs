use std::path::Path;
use std::process::Command;

use discord_commit_notify::error::NotifyError;
use discord_commit_notify::event::CommitRange;
use discord_commit_notify::git::{CommitSource, GitCli, commits_in_range};
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir)
        .args(args)
        .output()
        .expect("git should be installed");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn commit(dir: &Path, author: &str, message: &str) -> String {
    git(
        dir,
        &[
            "-c",
            &format!("user.name={author}"),
            "-c",
            "user.email=dev@example.com",
            "commit",
            "--allow-empty",
            "-q",
            "-m",
            message,
        ],
    );
    git(dir, &["rev-parse", "HEAD"])
}

/// Repository with three commits by two authors, plus the hash before them
fn scratch_repo() -> (TempDir, String, Vec<String>) {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    let base = commit(dir.path(), "Root", "Initial commit");
    let hashes = vec![
        commit(dir.path(), "Alice", "Add parser\n\nHandles the simple cases."),
        commit(dir.path(), "Bob", "Fix parser"),
        commit(dir.path(), "Alice", "Document parser"),
    ];
    (dir, base, hashes)
}

#[tokio::test]
async fn reads_head_commit() {
    let (dir, _, _) = scratch_repo();
    let info = GitCli::new(dir.path()).read_commit("HEAD").await.unwrap();

    assert_eq!(info.subject, "Document parser");
    assert_eq!(info.body, "");
    assert_eq!(info.author, "Alice");
}

#[tokio::test]
async fn reads_body_of_older_commit() {
    let (dir, _, hashes) = scratch_repo();
    let info = GitCli::new(dir.path()).read_commit(&hashes[0]).await.unwrap();

    assert_eq!(info.subject, "Add parser");
    assert_eq!(info.body, "Handles the simple cases.");
}

#[tokio::test]
async fn lists_range_oldest_first() {
    let (dir, base, hashes) = scratch_repo();
    let source = GitCli::new(dir.path());
    let range = CommitRange {
        before: base,
        after: hashes[2].clone(),
    };

    let commits = commits_in_range(&source, &range).await.unwrap();

    let shas: Vec<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
    assert_eq!(shas, hashes.iter().map(String::as_str).collect::<Vec<_>>());
    let authors: Vec<&str> = commits.iter().map(|c| c.author.as_str()).collect();
    assert_eq!(authors, ["Alice", "Bob", "Alice"]);
}

#[tokio::test]
async fn unknown_revision_fails() {
    let (dir, _, _) = scratch_repo();
    let err = GitCli::new(dir.path())
        .read_commit("does-not-exist")
        .await
        .unwrap_err();

    match err {
        NotifyError::GitOperationFailed { operation, .. } => {
            assert!(operation.contains("does-not-exist"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn not_a_repository_fails() {
    let dir = TempDir::new().unwrap();
    let err = GitCli::new(dir.path()).read_commit("HEAD").await.unwrap_err();
    assert!(matches!(err, NotifyError::GitOperationFailed { .. }));
}
