//! Short commit hash lookup.
//!
//! Shells out to `git rev-parse --short HEAD`. Callers that always need a
//! value use [`short_sha_or_default`], which falls back to [`DEFAULT_SHA`]
//! when git is missing or the directory is not a repository.

use std::path::Path;
use std::process::Command;

/// Value reported when no commit hash can be determined.
pub const DEFAULT_SHA: &str = "unknown";

/// Returns the abbreviated hash of `HEAD`, or `None` if git cannot provide one.
///
/// Runs in `dir` when given, otherwise in the current working directory.
pub fn short_sha(dir: Option<&Path>) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.args(["rev-parse", "--short", "HEAD"]);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output().ok()?;
    if !output.status.success() {
        return None;
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
        None
    } else {
        Some(sha)
    }
}

pub fn short_sha_or_default(dir: Option<&Path>) -> String {
    short_sha(dir).unwrap_or_else(|| DEFAULT_SHA.to_string())
}
