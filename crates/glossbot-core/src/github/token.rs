//! Choice between the elevated comment token and the Actions token.

use std::fmt;

use crate::config::{COMMENT_TOKEN, GITHUB_TOKEN};
use crate::error::GlossbotError;

/// Where the API token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `COMMENT_TOKEN`, a token with write access even on fork PRs.
    CommentToken,
    /// `GITHUB_TOKEN`, the per-run Actions token.
    GitHubToken,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::CommentToken => write!(f, "{COMMENT_TOKEN}"),
            TokenSource::GitHubToken => write!(f, "{GITHUB_TOKEN}"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SelectedToken {
    pub source: TokenSource,
    pub value: String,
    pub is_fork: bool,
}

impl SelectedToken {
    /// The default Actions token is read-only for pull requests from forks.
    pub fn likely_read_only(&self) -> bool {
        self.is_fork && self.source == TokenSource::GitHubToken
    }
}

impl fmt::Debug for SelectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedToken")
            .field("source", &self.source)
            .field("value", &"***")
            .field("is_fork", &self.is_fork)
            .finish()
    }
}

/// Pick the token used to talk to the API.
///
/// `COMMENT_TOKEN` wins whenever it is set, since it is the only one that can
/// write to fork PRs. Otherwise falls back to `GITHUB_TOKEN`.
pub fn select_token(
    is_fork: bool,
    comment_token: Option<&str>,
    github_token: Option<&str>,
) -> Result<SelectedToken, GlossbotError> {
    let (source, value) = match (comment_token, github_token) {
        (Some(token), _) => (TokenSource::CommentToken, token),
        (None, Some(token)) => (TokenSource::GitHubToken, token),
        (None, None) => return Err(GlossbotError::NoToken),
    };

    Ok(SelectedToken {
        source,
        value: value.to_string(),
        is_fork,
    })
}
