//! First-run provisioning of the store file
//!
//! Runs once, before any connection is opened: if no store exists at the
//! configured location, a bundled default store is copied into place.

use std::path::{Path, PathBuf};
use crate::{Error, Result};

/// File name of the bundled default store
pub const DEFAULT_STORE_FILE: &str = "emojis.db";

/// How the store came to exist at its configured path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    /// A store was already present
    Existing,
    /// The default store was copied from the given path
    CopiedDefault(PathBuf),
}

/// Make sure a store exists at `path`, copying `default_store` there if not.
///
/// Fails with [`Error::StoreNotFound`] when neither exists.
pub fn ensure_store(path: &Path, default_store: Option<&Path>) -> Result<Provisioned> {
    if path.exists() {
        return Ok(Provisioned::Existing);
    }

    tracing::warn!("Store not found at {}", path.display());

    let Some(default_store) = default_store.filter(|p| p.is_file()) else {
        tracing::error!("No default store available to copy to {}", path.display());
        return Err(Error::StoreNotFound { path: path.to_path_buf() });
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::copy(default_store, path)?;
    tracing::info!("Copied default store {} -> {}", default_store.display(), path.display());

    Ok(Provisioned::CopiedDefault(default_store.to_path_buf()))
}

/// Candidate locations for the bundled default store, most specific first:
/// `data/emojis.db` beside the executable, then under the working directory.
pub fn default_store_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        candidates.push(exe_dir.join("data").join(DEFAULT_STORE_FILE));
    }
    candidates.push(PathBuf::from("data").join(DEFAULT_STORE_FILE));
    candidates
}

/// First existing default store among the candidates
pub fn find_default_store() -> Option<PathBuf> {
    default_store_candidates().into_iter().find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_store_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emojis.db");
        std::fs::write(&path, b"existing").unwrap();

        let outcome = ensure_store(&path, None).unwrap();
        assert_eq!(outcome, Provisioned::Existing);
        assert_eq!(std::fs::read(&path).unwrap(), b"existing");
    }

    #[test]
    fn test_default_is_copied_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("bundled.db");
        std::fs::write(&default, b"bundled").unwrap();
        let path = dir.path().join("nested").join("data").join("emojis.db");

        let outcome = ensure_store(&path, Some(&default)).unwrap();
        assert_eq!(outcome, Provisioned::CopiedDefault(default.clone()));
        assert_eq!(std::fs::read(&path).unwrap(), b"bundled");
    }

    #[test]
    fn test_missing_store_without_default_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emojis.db");
        let missing_default = dir.path().join("nope.db");

        let err = ensure_store(&path, Some(&missing_default)).unwrap_err();
        assert!(matches!(err, Error::StoreNotFound { .. }));
        assert!(!path.exists());
    }
}
