use glossbot_core::git::short_sha_or_default;

use crate::output::{OutputMode, Reporter};

/// Run the `glossbot sha` command. Never fails.
pub fn run_sha(reporter: &mut Reporter) -> bool {
    let sha = short_sha_or_default(None);
    if reporter.mode() == OutputMode::Json {
        reporter.success_with_details("Short commit hash", &sha);
    } else {
        println!("{sha}");
    }
    true
}
