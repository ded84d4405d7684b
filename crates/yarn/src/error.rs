//! Error types for lockfile reading and extraction.
//!
//! Only conditions that make a whole file unusable are errors. Problems local
//! to a single line or stanza are reported through the [`Logger`](crate::Logger)
//! and [`FailureRecorder`](crate::FailureRecorder) collaborators instead.

use crate::lockfile::YarnLockVersion;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for lockfile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort parsing of a whole lockfile.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The parser was called without a block file.
    #[error("No block file was supplied to the yarn.lock parser")]
    #[diagnostic(
        code(lockgraph::yarn::missing_block_file),
        help("Read the lockfile text with `BlockReader::read` before calling `YarnLockParser::parse`")
    )]
    MissingBlockFile,

    /// The lockfile dialect is not one this parser understands.
    #[error("Unsupported yarn.lock version: {version}")]
    #[diagnostic(
        code(lockgraph::yarn::unsupported_version),
        help("Supported lockfile dialects: Yarn classic (v1) and Yarn Berry (v2+)")
    )]
    UnsupportedLockfileVersion {
        /// The detected dialect.
        version: YarnLockVersion,
    },

    /// I/O error occurred.
    #[error("I/O error during {operation}{}: {source}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(lockgraph::yarn::io_error),
        help("Check that the lockfile exists and that you have permission to read it")
    )]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Optional path where the error occurred.
        path: Option<PathBuf>,
        /// Description of the operation being performed.
        operation: String,
    },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: "file operation".to_string(),
        }
    }
}
