//! Maps an `owner/repo` pair onto a local checkout directory
use crate::error::{Result, ScanError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RepoResolver {
    base_dir: PathBuf,
}

impl RepoResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<base_dir>/<owner>_<repo>`. Existence is not checked here.
    pub fn resolve(&self, owner: &str, repo: &str) -> Result<PathBuf> {
        validate_component(owner, owner, repo)?;
        validate_component(repo, owner, repo)?;
        Ok(self.base_dir.join(format!("{owner}_{repo}")))
    }

    /// Resolve an `owner/repo` slug.
    pub fn resolve_slug(&self, slug: &str) -> Result<PathBuf> {
        let (owner, repo) = parse_slug(slug)?;
        self.resolve(owner, repo)
    }
}

/// Split `owner/repo` into its two halves.
pub fn parse_slug(slug: &str) -> Result<(&str, &str)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok((owner, repo)),
        _ => Err(ScanError::InvalidRepository {
            owner: slug.to_string(),
            repo: String::new(),
            reason: "expected OWNER/REPO",
        }),
    }
}

fn validate_component(component: &str, owner: &str, repo: &str) -> Result<()> {
    let reason = if component.is_empty() {
        Some("empty name")
    } else if component.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else if component == "." || component.contains("..") {
        Some("relative path components are not allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ScanError::InvalidRepository {
            owner: owner.to_string(),
            repo: repo.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_owner_and_repo() {
        let resolver = RepoResolver::new("/srv/repos");
        let path = resolver.resolve("rust-lang", "regex").unwrap();
        assert_eq!(path, PathBuf::from("/srv/repos/rust-lang_regex"));
    }

    #[test]
    fn test_resolve_slug() {
        let resolver = RepoResolver::new("repos");
        assert_eq!(
            resolver.resolve_slug("octo/hello").unwrap(),
            PathBuf::from("repos/octo_hello")
        );
        assert!(resolver.resolve_slug("no-slash").is_err());
        assert!(resolver.resolve_slug("/repo").is_err());
    }

    #[test]
    fn test_rejects_traversal() {
        let resolver = RepoResolver::new("repos");

        for (owner, repo) in [("..", "x"), ("a", "../etc"), ("a/b", "c"), ("", "c"), ("a", ".")] {
            match resolver.resolve(owner, repo) {
                Err(ScanError::InvalidRepository { .. }) => {}
                other => panic!("Expected InvalidRepository for {owner}/{repo}, got {other:?}"),
            }
        }
    }
}
