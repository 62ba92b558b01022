//! Run configuration read from the CI environment.
//!
//! Everything glossbot needs is captured once in [`CommentEnv`] and passed
//! explicitly from there on. Blank values count as unset.

use std::path::PathBuf;

use crate::comment::{parse_badges, ValidationOutcome};
use crate::error::GlossbotError;

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const COMMENT_TOKEN: &str = "COMMENT_TOKEN";
pub const VALIDATION_EXIT: &str = "VALIDATION_EXIT";
pub const VALIDATION_OUTPUT: &str = "VALIDATION_OUTPUT";
pub const SCORE: &str = "SCORE";
pub const BADGES: &str = "BADGES";
pub const TERM_NAME: &str = "TERM_NAME";
pub const TERM_SLUG: &str = "TERM_SLUG";
pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
pub const GITHUB_API_URL: &str = "GITHUB_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct CommentEnv {
    pub github_token: Option<String>,
    pub comment_token: Option<String>,
    pub validation_exit: Option<String>,
    pub validation_output: Option<String>,
    pub score: Option<String>,
    pub badges: Option<String>,
    pub term_name: Option<String>,
    pub term_slug: Option<String>,
    pub repository: Option<String>,
    pub event_path: Option<PathBuf>,
    pub api_url: Option<String>,
}

impl CommentEnv {
    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            github_token: get(GITHUB_TOKEN),
            comment_token: get(COMMENT_TOKEN),
            validation_exit: get(VALIDATION_EXIT),
            validation_output: get(VALIDATION_OUTPUT),
            score: get(SCORE).map(|s| s.trim().to_string()),
            badges: get(BADGES),
            term_name: get(TERM_NAME).map(|s| s.trim().to_string()),
            term_slug: get(TERM_SLUG).map(|s| s.trim().to_string()),
            repository: get(GITHUB_REPOSITORY),
            event_path: get(GITHUB_EVENT_PATH).map(PathBuf::from),
            api_url: get(GITHUB_API_URL),
        }
    }

    /// Validation passed only when the job reported exit code `0`.
    pub fn passed(&self) -> bool {
        self.validation_exit.as_deref().map(str::trim) == Some("0")
    }

    pub fn outcome(&self) -> ValidationOutcome {
        ValidationOutcome {
            passed: self.passed(),
            output: self.validation_output.clone(),
            score: self.score.clone(),
            badges: self.badges.as_deref().map(parse_badges).unwrap_or_default(),
            term_name: self.term_name.clone(),
            term_slug: self.term_slug.clone(),
            commit: None,
        }
    }

    pub fn require_repository(&self) -> Result<&str, GlossbotError> {
        self.repository
            .as_deref()
            .ok_or(GlossbotError::MissingEnv(GITHUB_REPOSITORY))
    }

    pub fn require_event_path(&self) -> Result<&PathBuf, GlossbotError> {
        self.event_path
            .as_ref()
            .ok_or(GlossbotError::MissingEnv(GITHUB_EVENT_PATH))
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .map(|u| u.trim_end_matches('/'))
            .unwrap_or(DEFAULT_API_URL)
    }
}

// Tokens must never end up in logs.
impl std::fmt::Debug for CommentEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |t: &Option<String>| t.as_ref().map(|_| "***");
        f.debug_struct("CommentEnv")
            .field("github_token", &redact(&self.github_token))
            .field("comment_token", &redact(&self.comment_token))
            .field("validation_exit", &self.validation_exit)
            .field("validation_output", &self.validation_output)
            .field("score", &self.score)
            .field("badges", &self.badges)
            .field("term_name", &self.term_name)
            .field("term_slug", &self.term_slug)
            .field("repository", &self.repository)
            .field("event_path", &self.event_path)
            .field("api_url", &self.api_url)
            .finish()
    }
}
