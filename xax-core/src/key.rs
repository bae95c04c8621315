//! Stream identity: the `(type, file, channel)` key every payload is routed by.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Content type of a stream, taken from the XA submode flags.
///
/// Variant order is the output order used by reports (video first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Data,
    Untyped,
}

impl StreamType {
    /// Directory name used for this type in extracted output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Data => "data",
            Self::Untyped => "untyped",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination of a sector's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StreamKey {
    pub stream_type: StreamType,
    pub file_number: u8,
    pub channel_number: u8,
}

impl StreamKey {
    /// Key shared by every sector without an XA sub-header.
    pub const UNTYPED: StreamKey = StreamKey::new(StreamType::Untyped, 0, 0);

    pub const fn new(stream_type: StreamType, file_number: u8, channel_number: u8) -> Self {
        Self {
            stream_type,
            file_number,
            channel_number,
        }
    }

    /// Relative output path: `type/ff/cc`, file and channel in lowercase hex.
    pub fn relative_path(&self) -> PathBuf {
        [
            self.stream_type.as_str().to_string(),
            format!("{:02x}", self.file_number),
            format!("{:02x}", self.channel_number),
        ]
        .iter()
        .collect()
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{:02x}/{:02x}",
            self.stream_type, self.file_number, self.channel_number
        )
    }
}
