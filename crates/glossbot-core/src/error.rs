use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlossbotError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("GITHUB_REPOSITORY must look like 'owner/repo', got '{0}'")]
    InvalidRepository(String),

    #[error("Cannot read event payload at {}: {source}", .path.display())]
    EventRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid event payload at {}: {source}", .path.display())]
    EventParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Event payload has no pull_request.number; is this a pull_request run?")]
    MissingPullRequest,

    #[error("No GitHub token available: set GITHUB_TOKEN or COMMENT_TOKEN")]
    NoToken,

    #[error("GitHub API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Api { status: Option<u16>, message: String },

    #[error("{0}")]
    Other(String),
}

impl GlossbotError {
    /// True when the hosting API rejected the credentials (HTTP 401 or 403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, GlossbotError::Api { status: Some(401 | 403), .. })
    }
}
