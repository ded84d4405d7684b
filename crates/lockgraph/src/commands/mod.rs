pub mod discover;
pub mod graph;
pub mod parse;
pub mod version;

use crate::errors::CliError;
use lockgraph_yarn::{FailureLog, LockFile, ReaderOptions, TracingLogger, YarnLockDetector};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// How `parse` prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The full lockfile model as pretty JSON
    Json,
    /// One line per entry
    Summary,
}

#[derive(Debug, Clone)]
pub enum Command {
    Version,
    Parse { path: PathBuf, output: OutputFormat },
    Graph { path: PathBuf },
    Discover { root: PathBuf },
}

/// Runs `command` and returns the text to print on stdout.
#[instrument(skip(options))]
pub fn execute(command: &Command, options: ReaderOptions) -> Result<String, CliError> {
    match command {
        Command::Version => Ok(version::get_version_info()),
        Command::Parse { path, output } => {
            let (lockfile, failures) = load(path, options)?;
            parse::render(&lockfile, &failures.failures(), *output)
        }
        Command::Graph { path } => {
            let (lockfile, _) = load(path, options)?;
            Ok(graph::render(&lockfile))
        }
        Command::Discover { root } => {
            let found = YarnLockDetector::new(options).discover(root, &TracingLogger);
            Ok(discover::render(root, &found))
        }
    }
}

/// Reads and parses one lockfile, collecting per-package failures.
fn load(path: &Path, options: ReaderOptions) -> Result<(LockFile, FailureLog), CliError> {
    let detector = YarnLockDetector::new(options);
    if !detector.supports_lockfile(path) {
        return Err(CliError::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }

    let failures = FailureLog::new();
    let lockfile = detector.detect(path, &failures, &TracingLogger)?;
    if !failures.is_empty() {
        tracing::warn!(
            count = failures.len(),
            "Some lockfile entries could not be parsed"
        );
    }
    Ok((lockfile, failures))
}
