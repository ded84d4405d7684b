//! Path helpers used while locating lockfiles.

use crate::diagnostics::Logger;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Resolves symlinks to physical paths and remembers the answers.
///
/// The cache lives as long as the resolver and is never evicted. Share one
/// resolver per scan to avoid repeated `canonicalize` calls for the same
/// directories.
#[derive(Debug, Default)]
pub struct PathResolver {
    resolved: Mutex<HashMap<PathBuf, PathBuf>>,
}

impl PathResolver {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical, symlink-free form of `path`.
    ///
    /// Successful lookups are cached. If the path cannot be resolved the input
    /// is returned unchanged and the failure is logged at verbose level.
    pub fn resolve_physical_path(&self, path: &Path, logger: &dyn Logger) -> PathBuf {
        if let Some(cached) = self
            .resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            return cached.clone();
        }

        match std::fs::canonicalize(path) {
            Ok(physical) => {
                self.resolved
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(path.to_path_buf(), physical.clone());
                physical
            }
            Err(e) => {
                logger.verbose(&format!(
                    "Could not resolve physical path of {}: {e}",
                    path.display()
                ));
                path.to_path_buf()
            }
        }
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Directory containing `path`, if any.
    #[must_use]
    pub fn parent_directory(path: &Path) -> Option<&Path> {
        path.parent()
    }

    /// Whether the directory of `below` is strictly inside the directory of `above`.
    #[must_use]
    pub fn is_file_below_another(above: &Path, below: &Path) -> bool {
        match (above.parent(), below.parent()) {
            (Some(above_dir), Some(below_dir)) => {
                above_dir != below_dir && below_dir.starts_with(above_dir)
            }
            _ => false,
        }
    }

    /// Matches a file name against `*suffix`, `prefix*`, or an exact name,
    /// ignoring ASCII case.
    #[must_use]
    pub fn matches_pattern(pattern: &str, file_name: &str) -> bool {
        let file_name = file_name.to_ascii_lowercase();
        let pattern = pattern.to_ascii_lowercase();

        if let Some(suffix) = pattern.strip_prefix('*')
            && file_name.ends_with(suffix)
        {
            return true;
        }
        if let Some(prefix) = pattern.strip_suffix('*')
            && file_name.starts_with(prefix)
        {
            return true;
        }
        pattern == file_name
    }
}
