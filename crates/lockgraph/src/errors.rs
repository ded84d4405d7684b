//! CLI error types with miette diagnostics

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the lockgraph binary
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lockfile(#[from] lockgraph_yarn::Error),

    #[error("File operation failed: {operation} at {}", path.display())]
    #[diagnostic(
        code(lockgraph::cli::file_error),
        help("Check file permissions and ensure the path exists")
    )]
    FileError {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a yarn.lock file: {}", path.display())]
    #[diagnostic(
        code(lockgraph::cli::unsupported_file),
        help("Point lockgraph at a file named 'yarn.lock'")
    )]
    UnsupportedFile { path: PathBuf },

    #[error("Failed to write output")]
    #[diagnostic(code(lockgraph::cli::output_error))]
    Output {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Tracing initialization failed for the {config_used} format")]
    #[diagnostic(
        code(lockgraph::cli::tracing_error),
        help("Check RUST_LOG and the --level option")
    )]
    TracingError {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        config_used: String,
    },
}

impl CliError {
    pub fn tracing(
        source: impl std::error::Error + Send + Sync + 'static,
        config_used: impl Into<String>,
    ) -> Self {
        Self::TracingError {
            source: Box::new(source),
            config_used: config_used.into(),
        }
    }

    pub fn output(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Output {
            source: Box::new(source),
        }
    }
}
