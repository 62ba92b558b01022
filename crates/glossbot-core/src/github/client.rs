//! Issue-comment endpoints of the GitHub REST API.
//!
//! Pull request conversation comments are issue comments, so the
//! `/issues/{number}/comments` endpoints serve both. Calls are blocking:
//! the publisher makes at most two requests in sequence.

use std::sync::Mutex;

use serde::Deserialize;

use super::repo::RepoInfo;
use crate::error::GlossbotError;

/// Page size for the comment listing; only the first page is inspected.
pub const COMMENTS_PER_PAGE: u32 = 100;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("glossbot/", env!("CARGO_PKG_VERSION"));

/// A comment as returned by the API. Only the fields glossbot uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Trait for the hosting API's comment operations.
pub trait CommentApi: Send + Sync {
    /// List the first page of comments on an issue or pull request.
    fn list_comments(&self, repo: &RepoInfo, issue: u64)
        -> Result<Vec<IssueComment>, GlossbotError>;

    /// Replace the body of an existing comment.
    fn update_comment(
        &self,
        repo: &RepoInfo,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, GlossbotError>;

    /// Add a new comment to an issue or pull request.
    fn create_comment(
        &self,
        repo: &RepoInfo,
        issue: u64,
        body: &str,
    ) -> Result<IssueComment, GlossbotError>;
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Blocking client for `api.github.com` or a GitHub Enterprise API root.
pub struct GitHubClient {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::blocking::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
    }

    fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, GlossbotError> {
        let response = request.send().map_err(|e| GlossbotError::Api {
            status: e.status().map(|s| s.as_u16()),
            message: format!("Request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(GlossbotError::Api {
                status: Some(status.as_u16()),
                message: error_message(&text, status),
            });
        }

        response.json().map_err(|e| GlossbotError::Api {
            status: Some(status.as_u16()),
            message: format!("Failed to parse response: {e}"),
        })
    }
}

impl CommentApi for GitHubClient {
    fn list_comments(
        &self,
        repo: &RepoInfo,
        issue: u64,
    ) -> Result<Vec<IssueComment>, GlossbotError> {
        let path = format!(
            "/repos/{}/{}/issues/{issue}/comments?per_page={COMMENTS_PER_PAGE}",
            repo.owner, repo.name
        );
        self.send(self.request(reqwest::Method::GET, &path))
    }

    fn update_comment(
        &self,
        repo: &RepoInfo,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, GlossbotError> {
        let path = format!(
            "/repos/{}/{}/issues/comments/{comment_id}",
            repo.owner, repo.name
        );
        let payload = serde_json::json!({ "body": body });
        self.send(self.request(reqwest::Method::PATCH, &path).json(&payload))
    }

    fn create_comment(
        &self,
        repo: &RepoInfo,
        issue: u64,
        body: &str,
    ) -> Result<IssueComment, GlossbotError> {
        let path = format!("/repos/{}/{}/issues/{issue}/comments", repo.owner, repo.name);
        let payload = serde_json::json!({ "body": body });
        self.send(self.request(reqwest::Method::POST, &path).json(&payload))
    }
}

/// Prefer the `message` field of a GitHub error body over the raw text.
fn error_message(text: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| status.to_string())
}

// ---------------------------------------------------------------------------
// Mock (for testing)
// ---------------------------------------------------------------------------

/// A call made against [`MockCommentApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List { issue: u64 },
    Update { comment_id: u64, body: String },
    Create { issue: u64, body: String },
}

/// An in-memory comment store that records every call. For use in tests.
pub struct MockCommentApi {
    comments: Mutex<Vec<IssueComment>>,
    calls: Mutex<Vec<ApiCall>>,
    fail_with: Option<u16>,
}

impl MockCommentApi {
    pub fn new(existing: Vec<IssueComment>) -> Self {
        Self {
            comments: Mutex::new(existing),
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// A mock whose every call fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn comments(&self) -> Vec<IssueComment> {
        self.comments.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: ApiCall) -> Result<(), GlossbotError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match self.fail_with {
            Some(status) => Err(GlossbotError::Api {
                status: Some(status),
                message: "mock failure".into(),
            }),
            None => Ok(()),
        }
    }

    fn store(&self) -> Result<std::sync::MutexGuard<'_, Vec<IssueComment>>, GlossbotError> {
        self.comments
            .lock()
            .map_err(|_| GlossbotError::Other("mock comment store poisoned".into()))
    }
}

impl CommentApi for MockCommentApi {
    fn list_comments(
        &self,
        _repo: &RepoInfo,
        issue: u64,
    ) -> Result<Vec<IssueComment>, GlossbotError> {
        self.record(ApiCall::List { issue })?;
        Ok(self
            .store()?
            .iter()
            .take(COMMENTS_PER_PAGE as usize)
            .cloned()
            .collect())
    }

    fn update_comment(
        &self,
        _repo: &RepoInfo,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, GlossbotError> {
        self.record(ApiCall::Update {
            comment_id,
            body: body.to_string(),
        })?;
        let mut store = self.store()?;
        let comment = store
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| GlossbotError::Api {
                status: Some(404),
                message: "Not Found".into(),
            })?;
        comment.body = Some(body.to_string());
        Ok(comment.clone())
    }

    fn create_comment(
        &self,
        _repo: &RepoInfo,
        issue: u64,
        body: &str,
    ) -> Result<IssueComment, GlossbotError> {
        self.record(ApiCall::Create {
            issue,
            body: body.to_string(),
        })?;
        let mut store = self.store()?;
        let id = store.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let comment = IssueComment {
            id,
            body: Some(body.to_string()),
            html_url: Some(format!("https://github.com/mock/mock/pull/{issue}#issuecomment-{id}")),
        };
        store.push(comment.clone());
        Ok(comment)
    }
}
