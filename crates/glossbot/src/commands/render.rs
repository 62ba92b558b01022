use glossbot_core::config::CommentEnv;
use glossbot_core::git::short_sha;
use glossbot_core::publish::render_from_env;

use crate::output::{OutputMode, Reporter};

/// Run the `glossbot render` command.
pub fn run_render(env: &CommentEnv, include_commit: bool, reporter: &mut Reporter) -> bool {
    let commit = if include_commit { short_sha(None) } else { None };

    match render_from_env(env, commit) {
        Ok(body) => {
            if reporter.mode() == OutputMode::Json {
                reporter.success_with_details("Rendered validation comment", &body);
            } else {
                print!("{body}");
            }
            true
        }
        Err(e) => {
            reporter.error(&format!("{e}"));
            false
        }
    }
}
