use std::io::ErrorKind;

use thiserror::Error;

use xax_lib::ExtractError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Extraction or scan failed
    #[error("{0}")]
    Extract(#[from] ExtractError),

    /// Summary could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    /// Standard output was closed by the reader (e.g. `xax scan --json | head`).
    pub(crate) fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == ErrorKind::BrokenPipe)
    }
}
