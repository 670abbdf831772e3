//! Push event parsing and commit range resolution

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{NotifyError, Result};

/// Hash GitHub reports as `before` when a push creates a branch
pub const ZERO_SHA: &str = "0000000000000000000000000000000000000000";

/// The subset of a GitHub push event this tool cares about
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PushEvent {
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Commits reachable from `after` but not from `before`
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRange {
    pub before: String,
    pub after: String,
}

/// Full SHA-1 or SHA-256 object name
pub fn is_object_id(rev: &str) -> bool {
    matches!(rev.len(), 40 | 64) && rev.bytes().all(|b| b.is_ascii_hexdigit())
}

impl CommitRange {
    /// Revision range in `git rev-list` syntax
    pub fn revspec(&self) -> String {
        format!("{}..{}", self.before, self.after)
    }
}

/// Read and parse the event file written by the CI runner.
pub fn read_push_event(path: &Path) -> Result<PushEvent> {
    let event_error = |message: String| NotifyError::EventPayload {
        path: path.display().to_string(),
        message,
    };

    let raw = fs::read_to_string(path).map_err(|e| event_error(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| event_error(e.to_string()))
}

/// Determine the pushed commit range, if there is a usable one.
///
/// Every failure here is recoverable: `None` tells the caller to notify about
/// the head commit alone.
pub fn resolve_range(path: Option<&Path>) -> Option<CommitRange> {
    let Some(path) = path else {
        info!("No event path set, notifying about a single commit");
        return None;
    };

    let event = match read_push_event(path) {
        Ok(event) => event,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };
    debug!("{:?}", event);

    match (event.before, event.after) {
        (Some(before), Some(after)) if before == ZERO_SHA => {
            info!(
                "Push created a new branch at {}, notifying about a single commit",
                after
            );
            None
        }
        (Some(before), Some(after)) if is_object_id(&before) && is_object_id(&after) => {
            Some(CommitRange { before, after })
        }
        (Some(before), Some(after)) => {
            warn!(
                "Push event has malformed hashes (before {:?}, after {:?})",
                before, after
            );
            None
        }
        _ => {
            warn!(
                "Push event at {} has no before/after fields",
                path.display()
            );
            None
        }
    }
}
