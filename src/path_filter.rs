use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Decides whether a path is eligible for usage tracking. The filter only
/// inspects the path string; scheme checks happen upstream at the
/// observation boundary.
#[derive(Debug)]
pub struct PathFilter {
    excludes: GlobSet,
}

impl PathFilter {
    pub fn new(exclude_globs: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_globs {
            let glob = Glob::new(pattern).map_err(|source| Error::InvalidExcludeGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let excludes = builder
            .build()
            .map_err(|source| Error::InvalidExcludeGlob {
                pattern: exclude_globs.join(", "),
                source,
            })?;
        Ok(Self { excludes })
    }

    /// Rules applied in order, any match rejects: empty path, a colon
    /// character (virtual/scratch buffer identifiers are not filesystem
    /// paths), a configured exclusion glob.
    pub fn is_trackable(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        if path.contains(':') {
            return false;
        }
        !self.excludes.is_match(Path::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(globs: &[&str]) -> PathFilter {
        let globs: Vec<String> = globs.iter().map(|g| g.to_string()).collect();
        PathFilter::new(&globs).unwrap()
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(!filter(&[]).is_trackable(""));
    }

    #[test]
    fn colon_paths_are_rejected() {
        let filter = filter(&[]);
        assert!(!filter.is_trackable("untitled:Untitled-1"));
        assert!(!filter.is_trackable("git:/repo/file.rs"));
        assert!(!filter.is_trackable("/home/u/odd:name.txt"));
    }

    #[test]
    fn excluded_globs_are_rejected() {
        let filter = filter(&["**/.git/**", "*.log"]);
        assert!(!filter.is_trackable("/repo/.git/HEAD"));
        assert!(!filter.is_trackable("/var/log/app.log"));
        assert!(filter.is_trackable("/repo/src/main.rs"));
    }

    #[test]
    fn plain_absolute_paths_are_accepted() {
        assert!(filter(&[]).is_trackable("/home/u/notes.md"));
    }

    #[test]
    fn invalid_glob_is_a_construction_error() {
        let globs = vec!["a{".to_string()];
        assert!(matches!(
            PathFilter::new(&globs),
            Err(Error::InvalidExcludeGlob { .. })
        ));
    }
}
