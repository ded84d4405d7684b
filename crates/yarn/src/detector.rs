//! Reads a `yarn.lock` from disk and runs it through the reader and parser.

use crate::diagnostics::{FailureRecorder, Logger};
use crate::error::{Error, Result};
use crate::lockfile::LockFile;
use crate::parser::YarnLockParser;
use crate::path::PathResolver;
use crate::reader::{BlockReader, ReaderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name handled by [`YarnLockDetector`].
pub const LOCKFILE_NAME: &str = "yarn.lock";

/// Directories [`YarnLockDetector::discover`] never descends into.
const PRUNED_DIRS: &[&str] = &["node_modules", ".git", ".yarn", "target", "dist"];

/// Locates, reads, and parses Yarn lockfiles.
#[derive(Debug, Default)]
pub struct YarnLockDetector {
    reader: BlockReader,
    parser: YarnLockParser,
    paths: PathResolver,
}

impl YarnLockDetector {
    /// Creates a detector with the given reader options.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            reader: BlockReader::new(options),
            parser: YarnLockParser::new(),
            paths: PathResolver::new(),
        }
    }

    /// Whether `path` names a file this detector handles.
    #[must_use]
    pub fn supports_lockfile(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| PathResolver::matches_pattern(LOCKFILE_NAME, n))
    }

    /// The path resolver shared by every file this detector reads.
    #[must_use]
    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    /// Finds the outermost `yarn.lock` files under `root`, sorted.
    ///
    /// A lockfile whose directory sits inside another lockfile's directory
    /// belongs to that project and is skipped. Returned paths are physical.
    pub fn discover(&self, root: &Path, logger: &dyn Logger) -> Vec<PathBuf> {
        let walker = WalkDir::new(root).follow_links(false);

        let mut found = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !e
                    .file_name()
                    .to_str()
                    .is_some_and(|name| PRUNED_DIRS.contains(&name))
        }) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    logger.verbose(&format!("Skipping unreadable entry: {e}"));
                    continue;
                }
            };
            if entry.file_type().is_file() && self.supports_lockfile(entry.path()) {
                found.push(self.paths.resolve_physical_path(entry.path(), logger));
            }
        }
        found.sort();
        found.dedup();

        let outermost: Vec<PathBuf> = found
            .iter()
            .filter(|candidate| {
                let owner = found
                    .iter()
                    .find(|other| PathResolver::is_file_below_another(other, candidate));
                if let Some(owner) = owner {
                    logger.verbose(&format!(
                        "Skipping {}, nested in the project at {}",
                        candidate.display(),
                        PathResolver::parent_directory(owner)
                            .unwrap_or(owner.as_path())
                            .display()
                    ));
                }
                owner.is_none()
            })
            .cloned()
            .collect();

        tracing::debug!(
            root = %root.display(),
            found = found.len(),
            kept = outermost.len(),
            "Discovered yarn.lock files"
        );
        outermost
    }

    /// Reads and parses the lockfile at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::UnsupportedLockfileVersion`] if the parser does not handle the
    /// detected dialect. Problems inside the file are reported through
    /// `logger` and `recorder` instead.
    #[tracing::instrument(skip(self, recorder, logger), fields(path = %path.display()))]
    pub fn detect(
        &self,
        path: &Path,
        recorder: &dyn FailureRecorder,
        logger: &dyn Logger,
    ) -> Result<LockFile> {
        let physical = self.paths.resolve_physical_path(path, logger);
        let contents = fs::read_to_string(&physical).map_err(|source| Error::Io {
            source,
            path: Some(physical.clone()),
            operation: "reading yarn.lock".to_string(),
        })?;

        self.detect_str(&contents, recorder, logger)
    }

    /// Parses lockfile text that has already been read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLockfileVersion`] if the parser does not
    /// handle the detected dialect. Every current [`YarnLockVersion`] is in
    /// [`SUPPORTED_VERSIONS`](crate::SUPPORTED_VERSIONS), so this only fires
    /// for a dialect added to the reader before the parser learns it.
    ///
    /// [`YarnLockVersion`]: crate::YarnLockVersion
    pub fn detect_str(
        &self,
        contents: &str,
        recorder: &dyn FailureRecorder,
        logger: &dyn Logger,
    ) -> Result<LockFile> {
        let blocks = self.reader.read(contents, logger);
        if !self.parser.can_parse(blocks.version) {
            return Err(Error::UnsupportedLockfileVersion {
                version: blocks.version,
            });
        }

        let lockfile = self.parser.parse(recorder, Some(&blocks), logger)?;
        logger.info(&format!(
            "Parsed {} entries from a {} yarn.lock",
            lockfile.entries.len(),
            lockfile.version
        ));
        Ok(lockfile)
    }
}
