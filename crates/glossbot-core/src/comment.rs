//! Markdown rendering for the validation comment.
//!
//! The body always starts with [`MARKER`] so a later run can find and
//! update the same comment instead of adding a new one.

use crate::github::RepoInfo;

/// Hidden HTML comment that identifies a glossbot comment on a pull request.
pub const MARKER: &str = "<!-- glossbot:glossary-validation -->";

/// Number of output lines shown for a failed validation.
pub const MAX_OUTPUT_LINES: usize = 20;

/// Result of a single validation run, as reported by the CI job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub output: Option<String>,
    pub score: Option<String>,
    pub badges: Vec<String>,
    pub term_name: Option<String>,
    pub term_slug: Option<String>,
    /// Short hash of the validated commit, when known.
    pub commit: Option<String>,
}

/// Split a comma-separated badge list, dropping blank entries.
pub fn parse_badges(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// First `max` non-empty lines of `raw`, each trimmed.
pub fn truncate_output(raw: &str, max: usize) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(max)
        .collect()
}

/// Link to the validation guide in the target repository.
pub fn docs_url(repo: &RepoInfo) -> String {
    format!(
        "https://github.com/{}/{}/blob/main/docs/VALIDATION.md",
        repo.owner, repo.name
    )
}

/// Render the full comment body.
pub fn render_comment(outcome: &ValidationOutcome, repo: &RepoInfo) -> String {
    let mut lines: Vec<String> = vec![
        MARKER.to_string(),
        "## 📘 Glossary Validation".to_string(),
        String::new(),
    ];

    if outcome.passed {
        lines.push("✅ **Passed**".to_string());
        lines.push(String::new());

        if let Some(term) = latest_term(outcome) {
            lines.push(format!("- Latest term: {term}"));
        }
        if let Some(score) = &outcome.score {
            lines.push(format!("- Score: {score}"));
        }
        if outcome.badges.is_empty() {
            lines.push("- Badges: None".to_string());
        } else {
            lines.push(format!("- Badges: {}", outcome.badges.join(", ")));
        }
    } else {
        lines.push("❌ **Failed**".to_string());
        lines.push(String::new());

        if let Some(output) = &outcome.output {
            let shown = truncate_output(output, MAX_OUTPUT_LINES);
            if !shown.is_empty() {
                lines.push("```".to_string());
                lines.extend(shown.iter().map(|l| l.to_string()));
                lines.push("```".to_string());
                lines.push(String::new());
            }
        }
        lines.push("Scoring was skipped because validation failed.".to_string());
    }

    if let Some(sha) = &outcome.commit {
        lines.push(String::new());
        lines.push(format!("- Commit: `{sha}`"));
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(format!(
        "📖 See the [validation guide]({}) for details.",
        docs_url(repo)
    ));

    let mut body = lines.join("\n");
    body.push('\n');
    body
}

fn latest_term(outcome: &ValidationOutcome) -> Option<String> {
    match (&outcome.term_name, &outcome.term_slug) {
        (Some(name), Some(slug)) => Some(format!("**{name}** (`{slug}`)")),
        (Some(name), None) => Some(format!("**{name}**")),
        (None, Some(slug)) => Some(format!("`{slug}`")),
        (None, None) => None,
    }
}
