//! `owner/repo` coordinates of the repository being commented on.

use std::fmt;

use crate::error::GlossbotError;

/// Repository coordinates taken from `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub name: String,
}

impl RepoInfo {
    /// Parse an `owner/repo` string.
    ///
    /// Both parts must be non-empty and there must be exactly one `/`.
    pub fn parse(value: &str) -> Result<Self, GlossbotError> {
        let trimmed = value.trim();
        let mut parts = trimmed.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(GlossbotError::InvalidRepository(value.to_string())),
        }
    }
}

impl fmt::Display for RepoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let repo = RepoInfo::parse("acme/foo").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "foo");
        assert_eq!(repo.to_string(), "acme/foo");
    }

    #[test]
    fn rejects_malformed_values() {
        for bad in ["", "acme", "acme/", "/foo", "/", "acme/foo/bar"] {
            assert!(
                matches!(RepoInfo::parse(bad), Err(GlossbotError::InvalidRepository(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let repo = RepoInfo::parse(" acme/foo\n").unwrap();
        assert_eq!(repo.to_string(), "acme/foo");
    }
}
