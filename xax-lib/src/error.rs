use std::path::PathBuf;

use thiserror::Error;

use xax_core::DemuxError;

/// Errors that can occur while extracting a track to disk.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// I/O error outside the demux pass (target directory, input file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file could not be opened
    #[error("Cannot open input {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target path exists but can't hold extracted streams
    #[error("Invalid target directory: {0}")]
    InvalidTarget(String),

    /// The demux pass failed
    #[error("{0}")]
    Demux(#[from] DemuxError),
}

impl ExtractError {
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }
}
