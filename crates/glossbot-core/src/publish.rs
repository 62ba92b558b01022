//! Create-or-update of the validation comment on a pull request.
//!
//! [`prepare`] resolves everything that can fail locally (event payload,
//! repository, token) before any request is made. [`upsert_comment`] then
//! lists the PR's comments once and either edits the comment carrying
//! [`MARKER`] or adds a new one.
//!
//! Two runs racing on the same PR can both miss the marker and each create a
//! comment. Nothing here guards against that.

use crate::comment::{render_comment, ValidationOutcome, MARKER};
use crate::config::CommentEnv;
use crate::error::GlossbotError;
use crate::github::{
    read_event_context, select_token, CommentApi, EventContext, IssueComment, RepoInfo,
    SelectedToken,
};

/// Everything needed to publish, resolved from the environment.
#[derive(Debug, Clone)]
pub struct PublishPlan {
    pub context: EventContext,
    pub repo: RepoInfo,
    pub token: SelectedToken,
    pub body: String,
}

/// What [`upsert_comment`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Updated(IssueComment),
    Created(IssueComment),
}

impl PublishOutcome {
    pub fn comment(&self) -> &IssueComment {
        match self {
            PublishOutcome::Updated(c) | PublishOutcome::Created(c) => c,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            PublishOutcome::Updated(_) => "updated",
            PublishOutcome::Created(_) => "created",
        }
    }
}

/// Render the comment body using only `GITHUB_REPOSITORY` and the outcome
/// variables.
pub fn render_from_env(env: &CommentEnv, commit: Option<String>) -> Result<String, GlossbotError> {
    let repo = RepoInfo::parse(env.require_repository()?)?;
    Ok(render_for(env, &repo, commit))
}

fn render_for(env: &CommentEnv, repo: &RepoInfo, commit: Option<String>) -> String {
    let outcome = ValidationOutcome {
        commit,
        ..env.outcome()
    };
    render_comment(&outcome, repo)
}

/// Resolve the target PR, repository and token, and render the body.
///
/// Fails before any network access if `GITHUB_EVENT_PATH` or
/// `GITHUB_REPOSITORY` is missing or unusable, or if no token is set.
pub fn prepare(env: &CommentEnv, commit: Option<String>) -> Result<PublishPlan, GlossbotError> {
    let context = read_event_context(env.require_event_path()?)?;
    let repo = RepoInfo::parse(env.require_repository()?)?;
    let token = select_token(
        context.is_fork,
        env.comment_token.as_deref(),
        env.github_token.as_deref(),
    )?;
    let body = render_for(env, &repo, commit);

    Ok(PublishPlan {
        context,
        repo,
        token,
        body,
    })
}

/// First comment whose body contains the marker.
pub fn find_marker_comment(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments
        .iter()
        .find(|c| c.body.as_deref().is_some_and(|b| b.contains(MARKER)))
}

/// Update the existing marker comment on `pr_number`, or create one.
pub fn upsert_comment(
    api: &dyn CommentApi,
    repo: &RepoInfo,
    pr_number: u64,
    body: &str,
) -> Result<PublishOutcome, GlossbotError> {
    let comments = api.list_comments(repo, pr_number)?;

    match find_marker_comment(&comments) {
        Some(existing) => api
            .update_comment(repo, existing.id, body)
            .map(PublishOutcome::Updated),
        None => api
            .create_comment(repo, pr_number, body)
            .map(PublishOutcome::Created),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        BADGES, COMMENT_TOKEN, GITHUB_EVENT_PATH, GITHUB_REPOSITORY, GITHUB_TOKEN,
        VALIDATION_EXIT,
    };
    use crate::github::{ApiCall, MockCommentApi, TokenSource};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> CommentEnv {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CommentEnv::from_lookup(|key| map.get(key).cloned())
    }

    fn comment(id: u64, body: &str) -> IssueComment {
        IssueComment {
            id,
            body: Some(body.to_string()),
            html_url: None,
        }
    }

    fn repo() -> RepoInfo {
        RepoInfo::parse("acme/foo").unwrap()
    }

    fn event_file(tmp: &TempDir, fork: bool) -> String {
        let path = tmp.path().join("event.json");
        let payload = serde_json::json!({
            "pull_request": { "number": 12, "head": { "repo": { "fork": fork } } }
        });
        std::fs::write(&path, payload.to_string()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn updates_existing_marker_comment() {
        let api = MockCommentApi::new(vec![
            comment(1, "Thanks for the PR!"),
            comment(2, &format!("{MARKER}\nold body")),
            comment(3, "lgtm"),
        ]);

        let outcome = upsert_comment(&api, &repo(), 12, "new body").unwrap();

        assert_eq!(outcome.action(), "updated");
        assert_eq!(outcome.comment().id, 2);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::List { issue: 12 },
                ApiCall::Update {
                    comment_id: 2,
                    body: "new body".into(),
                },
            ]
        );
    }

    #[test]
    fn creates_comment_when_marker_absent() {
        let untitled = IssueComment {
            id: 4,
            body: None,
            html_url: None,
        };
        let api = MockCommentApi::new(vec![comment(1, "unrelated"), untitled]);

        let outcome = upsert_comment(&api, &repo(), 12, "fresh").unwrap();

        assert_eq!(outcome.action(), "created");
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::List { issue: 12 },
                ApiCall::Create {
                    issue: 12,
                    body: "fresh".into(),
                },
            ]
        );
        assert!(!api
            .calls()
            .iter()
            .any(|c| matches!(c, ApiCall::Update { .. })));
    }

    #[test]
    fn first_marker_comment_wins() {
        let comments = vec![
            comment(8, &format!("{MARKER} a")),
            comment(9, &format!("{MARKER} b")),
        ];
        assert_eq!(find_marker_comment(&comments).map(|c| c.id), Some(8));
        assert!(find_marker_comment(&[]).is_none());
    }

    #[test]
    fn list_failure_stops_before_writing() {
        let api = MockCommentApi::failing(403);
        let err = upsert_comment(&api, &repo(), 12, "body").unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(api.calls(), vec![ApiCall::List { issue: 12 }]);
    }

    #[test]
    fn second_run_updates_first_runs_comment() {
        let api = MockCommentApi::new(Vec::new());
        let first = render_comment(&Default::default(), &repo());
        upsert_comment(&api, &repo(), 12, &first).unwrap();
        let second = upsert_comment(&api, &repo(), 12, "second").unwrap();

        assert_eq!(second.action(), "updated");
        assert_eq!(api.comments().len(), 1);
    }

    #[test]
    fn prepare_resolves_everything() {
        let tmp = TempDir::new().unwrap();
        let path = event_file(&tmp, true);
        let cfg = env(&[
            (GITHUB_EVENT_PATH, path.as_str()),
            (GITHUB_REPOSITORY, "acme/foo"),
            (GITHUB_TOKEN, "default"),
            (COMMENT_TOKEN, "elevated"),
            (VALIDATION_EXIT, "0"),
            (BADGES, "x, y"),
        ]);

        let plan = prepare(&cfg, Some("abc1234".into())).unwrap();
        assert_eq!(
            plan.context,
            EventContext {
                pr_number: 12,
                is_fork: true,
            }
        );
        assert_eq!(plan.repo, repo());
        assert_eq!(plan.token.source, TokenSource::CommentToken);
        assert!(plan.body.starts_with(MARKER));
        assert!(plan.body.contains("Badges: x, y"));
        assert!(plan.body.contains("`abc1234`"));
        assert!(plan
            .body
            .contains("https://github.com/acme/foo/blob/main/docs/VALIDATION.md"));
    }

    #[test]
    fn prepare_requires_event_path() {
        let cfg = env(&[(GITHUB_REPOSITORY, "acme/foo"), (GITHUB_TOKEN, "t")]);
        assert!(matches!(
            prepare(&cfg, None),
            Err(GlossbotError::MissingEnv(GITHUB_EVENT_PATH))
        ));
    }

    #[test]
    fn prepare_requires_repository() {
        let tmp = TempDir::new().unwrap();
        let path = event_file(&tmp, false);
        let cfg = env(&[(GITHUB_EVENT_PATH, path.as_str()), (GITHUB_TOKEN, "t")]);
        assert!(matches!(
            prepare(&cfg, None),
            Err(GlossbotError::MissingEnv(GITHUB_REPOSITORY))
        ));

        let cfg = env(&[
            (GITHUB_EVENT_PATH, path.as_str()),
            (GITHUB_REPOSITORY, "acme"),
            (GITHUB_TOKEN, "t"),
        ]);
        assert!(matches!(
            prepare(&cfg, None),
            Err(GlossbotError::InvalidRepository(_))
        ));
    }

    #[test]
    fn prepare_requires_a_token() {
        let tmp = TempDir::new().unwrap();
        let path = event_file(&tmp, false);
        let cfg = env(&[
            (GITHUB_EVENT_PATH, path.as_str()),
            (GITHUB_REPOSITORY, "acme/foo"),
        ]);
        assert!(matches!(prepare(&cfg, None), Err(GlossbotError::NoToken)));
    }

    #[test]
    fn render_from_env_needs_only_repository() {
        let cfg = env(&[(GITHUB_REPOSITORY, "acme/foo"), (VALIDATION_EXIT, "0")]);
        let body = render_from_env(&cfg, None).unwrap();
        assert!(body.contains("Passed"));
        assert!(body.contains("/acme/foo/blob/main/"));
    }
}
