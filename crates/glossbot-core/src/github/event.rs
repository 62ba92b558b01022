//! Pull request details from the Actions event payload.
//!
//! GitHub writes the triggering webhook payload to the file named by
//! `GITHUB_EVENT_PATH`. Only `pull_request.number` and
//! `pull_request.head.repo.fork` are needed here.

use std::path::Path;

use serde::Deserialize;

use crate::error::GlossbotError;

/// The pull request a run is commenting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    pub pr_number: u64,
    /// Head branch lives in a fork, so the default token is read-only.
    pub is_fork: bool,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequest>,
}

#[derive(Deserialize)]
struct PullRequest {
    number: Option<u64>,
    head: Option<Head>,
}

#[derive(Deserialize)]
struct Head {
    repo: Option<HeadRepo>,
}

#[derive(Deserialize)]
struct HeadRepo {
    #[serde(default)]
    fork: bool,
}

/// Extract the PR number and fork flag from a raw event payload.
///
/// Returns `Ok(None)` for valid JSON that carries no pull request number.
pub fn parse_event_payload(raw: &str) -> Result<Option<EventContext>, serde_json::Error> {
    let payload: EventPayload = serde_json::from_str(raw)?;
    let Some(pr) = payload.pull_request else {
        return Ok(None);
    };
    let Some(pr_number) = pr.number else {
        return Ok(None);
    };

    let is_fork = pr
        .head
        .and_then(|head| head.repo)
        .is_some_and(|repo| repo.fork);

    Ok(Some(EventContext { pr_number, is_fork }))
}

/// Read the event file and return the pull request context.
pub fn read_event_context(path: &Path) -> Result<EventContext, GlossbotError> {
    let raw = std::fs::read_to_string(path).map_err(|source| GlossbotError::EventRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_event_payload(&raw)
        .map_err(|source| GlossbotError::EventParse {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or(GlossbotError::MissingPullRequest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_event(tmp: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = tmp.path().join("event.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_pr_number_and_fork_flag() {
        let tmp = TempDir::new().unwrap();
        let path = write_event(
            &tmp,
            r#"{"action":"opened","pull_request":{"number":42,"head":{"repo":{"fork":true}}}}"#,
        );
        let ctx = read_event_context(&path).unwrap();
        assert_eq!(
            ctx,
            EventContext {
                pr_number: 42,
                is_fork: true,
            }
        );
    }

    #[test]
    fn missing_head_repo_is_not_a_fork() {
        let tmp = TempDir::new().unwrap();
        // Head repo is null when the fork has been deleted.
        let path = write_event(&tmp, r#"{"pull_request":{"number":7,"head":{"repo":null}}}"#);
        let ctx = read_event_context(&path).unwrap();
        assert_eq!(ctx.pr_number, 7);
        assert!(!ctx.is_fork);
    }

    #[test]
    fn push_event_has_no_pull_request() {
        let tmp = TempDir::new().unwrap();
        let path = write_event(&tmp, r#"{"ref":"refs/heads/main"}"#);
        assert!(matches!(
            read_event_context(&path),
            Err(GlossbotError::MissingPullRequest)
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_event(&tmp, "not json");
        assert!(matches!(
            read_event_context(&path),
            Err(GlossbotError::EventParse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        match read_event_context(&path) {
            Err(GlossbotError::EventRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected EventRead, got: {other:?}"),
        }
    }
}
