//! GitHub Actions context and the issue-comments REST API.

pub mod client;
pub mod event;
pub mod repo;
pub mod token;

pub use client::{ApiCall, CommentApi, GitHubClient, IssueComment, MockCommentApi};
pub use event::{parse_event_payload, read_event_context, EventContext};
pub use repo::RepoInfo;
pub use token::{select_token, SelectedToken, TokenSource};
