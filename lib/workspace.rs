//! Staging workspace management.
//!
//! The staging tree is the only shared mutable resource in a build. Reset is
//! idempotent: a missing directory and a populated one both end up as the
//! same empty tree with a nested `server/` subdirectory.

use crate::constants::SERVER_DIR;
use crate::error::{BuildError, BuildResult};
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Remove the staging tree if present, then recreate it with its `server/`
/// subdirectory.
pub fn reset(staging: &Path) -> BuildResult<()> {
    remove_if_present(staging)?;

    std::fs::create_dir_all(staging.join(SERVER_DIR)).map_err(|source| BuildError::Workspace {
        path: staging.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Remove the staging tree, tolerating it not existing.
pub fn clean(staging: &Path) -> BuildResult<()> {
    remove_if_present(staging)
}

/// Recursively remove a path. "Not found" is not an error; anything else is.
fn remove_if_present(path: &Path) -> BuildResult<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BuildError::Workspace {
            path: path.to_path_buf(),
            source,
        }),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reset_nonexistent_path() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");

        reset(&staging).unwrap();

        assert!(staging.is_dir());
        assert!(staging.join(SERVER_DIR).is_dir());
    }

    #[test]
    fn test_reset_clears_existing_content() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");

        std::fs::create_dir_all(staging.join("leftover")).unwrap();
        std::fs::write(staging.join("stale.json"), "{}").unwrap();

        reset(&staging).unwrap();

        assert!(staging.join(SERVER_DIR).is_dir());
        assert!(!staging.join("stale.json").exists());
        assert!(!staging.join("leftover").exists());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");

        reset(&staging).unwrap();
        reset(&staging).unwrap();

        let entries: Vec<_> = std::fs::read_dir(&staging)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], SERVER_DIR);
    }

    #[test]
    fn test_reset_fails_under_regular_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = reset(&blocker.join("staging"));
        assert!(matches!(result, Err(BuildError::Workspace { .. })));
    }

    #[test]
    fn test_clean_missing_path_is_ok() {
        let tmp = TempDir::new().unwrap();
        clean(&tmp.path().join("never-created")).unwrap();
    }
}
