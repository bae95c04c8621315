use thiserror::Error;

use crate::key::StreamKey;

/// Errors raised while classifying a single raw sector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectorError {
    /// The mode byte at offset 15 is not 0, 1 or 2
    #[error("Unrecognized sector mode 0x{mode:02x}")]
    UnrecognizedMode { mode: u8 },

    /// The two copies of the XA sub-header disagree
    #[error("Sub-header copies disagree: {first:02x?} vs {second:02x?}")]
    SubheaderMismatch { first: [u8; 4], second: [u8; 4] },

    /// The block does not start with the 12-byte sync pattern
    #[error("Sector does not begin with the sync pattern")]
    MissingSync,
}

/// Errors reported by an output sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl SinkError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Errors that abort a demultiplexing pass.
///
/// Every variant carries enough position information to find the bad
/// sector in the input image.
#[derive(Debug, Error)]
pub enum DemuxError {
    /// Input ended in the middle of a sector
    #[error(
        "Input truncated: {remaining} of {expected} bytes at sector {index} (offset {offset})",
        expected = crate::SECTOR_SIZE
    )]
    TruncatedInput {
        index: u64,
        offset: u64,
        remaining: usize,
    },

    /// A sector could not be classified
    #[error("Sector {index} (offset {offset}): {source}")]
    Sector {
        index: u64,
        offset: u64,
        #[source]
        source: SectorError,
    },

    /// The output sink rejected an append
    #[error("Sector {index} (offset {offset}): failed to write stream {key}: {source}")]
    Sink {
        index: u64,
        offset: u64,
        key: StreamKey,
        #[source]
        source: SinkError,
    },

    /// The output sink failed to finalize its streams
    #[error("Failed to finalize output streams: {0}")]
    Finish(#[source] SinkError),

    /// Reading the input failed before the sector was complete
    #[error("Read failed at sector {index} (offset {offset}): {source}")]
    ReadFailed {
        index: u64,
        offset: u64,
        #[source]
        source: std::io::Error,
    },
}

impl DemuxError {
    /// Index of the sector the error refers to, when there is one.
    pub fn sector_index(&self) -> Option<u64> {
        match self {
            Self::TruncatedInput { index, .. }
            | Self::Sector { index, .. }
            | Self::Sink { index, .. }
            | Self::ReadFailed { index, .. } => Some(*index),
            Self::Finish(_) => None,
        }
    }

    /// Byte offset of the sector the error refers to, when there is one.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::TruncatedInput { offset, .. }
            | Self::Sector { offset, .. }
            | Self::Sink { offset, .. }
            | Self::ReadFailed { offset, .. } => Some(*offset),
            Self::Finish(_) => None,
        }
    }
}
