use std::io;

/// Custom error type for discord_commit_notify operations
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Error: {0} environment variable is required")]
    MissingEnv(&'static str),

    #[error("Git operation failed: {operation}\n{message}")]
    GitOperationFailed { operation: String, message: String },

    #[error("Could not read push event '{path}': {message}")]
    EventPayload { path: String, message: String },

    #[error("Discord webhook returned status: {status}\nResponse body: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Discord webhook HTTP error: {status} - {reason}\nError details: {body}")]
    WebhookHttp {
        status: u16,
        reason: String,
        body: String,
    },

    #[error(
        "Error 1010: Webhook not found - the Discord webhook URL may be invalid or expired"
    )]
    WebhookNotFound,

    #[error("Failed to send Discord notification: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Helper type for Results that use NotifyError
pub type Result<T> = std::result::Result<T, NotifyError>;
