use glossbot_core::config::CommentEnv;
use glossbot_core::git::short_sha;
use glossbot_core::github::{CommentApi, GitHubClient};
use glossbot_core::publish::{prepare, upsert_comment, PublishPlan};

use crate::output::Reporter;

const AUTH_HINT: &str = "The token was rejected. Give the workflow `pull-requests: write` \
    permission, or set a COMMENT_TOKEN secret with access to this repository \
    (required for pull requests from forks).";

/// Run the `glossbot comment` command.
///
/// Resolves the pull request, repository and token from the environment,
/// then updates the existing validation comment or creates a new one.
pub fn run_comment(env: &CommentEnv, include_commit: bool, reporter: &mut Reporter) -> bool {
    let commit = if include_commit { short_sha(None) } else { None };

    let plan = match prepare(env, commit) {
        Ok(plan) => plan,
        Err(e) => {
            reporter.error(&format!("{e}"));
            return false;
        }
    };

    let client = GitHubClient::new(env.api_url(), plan.token.value.as_str());
    publish_with(&client, &plan, reporter)
}

/// Publish a prepared comment through `api` and report the result.
pub fn publish_with(api: &dyn CommentApi, plan: &PublishPlan, reporter: &mut Reporter) -> bool {
    let pr_number = plan.context.pr_number;

    reporter.info(&format!(
        "Commenting on {}#{pr_number} with {}",
        plan.repo, plan.token.source
    ));
    if plan.token.likely_read_only() {
        reporter.warning(
            "Pull request is from a fork and COMMENT_TOKEN is not set; \
             GITHUB_TOKEN may not be allowed to comment",
        );
    }

    match upsert_comment(api, &plan.repo, pr_number, &plan.body) {
        Ok(outcome) => {
            let comment = outcome.comment();
            reporter.success_with_data(
                &format!(
                    "Validation comment {} on {}#{pr_number} (id {})",
                    outcome.action(),
                    plan.repo,
                    comment.id
                ),
                serde_json::json!({
                    "action": outcome.action(),
                    "repository": plan.repo.to_string(),
                    "pr_number": pr_number,
                    "comment_id": comment.id,
                    "url": comment.html_url,
                }),
            );
            if let Some(url) = &comment.html_url {
                reporter.info(url);
            }
            true
        }
        Err(e) => {
            reporter.error(&format!("Failed to post validation comment: {e}"));
            if e.is_auth_failure() {
                reporter.hint(AUTH_HINT);
            }
            false
        }
    }
}
