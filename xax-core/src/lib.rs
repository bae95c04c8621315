//! Sector parsing and stream demultiplexing for raw CD-ROM XA data tracks.
//!
//! A raw track is a sequence of 2352-byte sectors. Each one is classified by
//! its mode byte and, for Mode 2, its XA sub-header, and its payload is
//! appended to the output stream named by `(type, file, channel)`.
//!
//! ```
//! use xax_core::{DemuxOptions, MemorySink, StreamKey, demux};
//!
//! let mut track = vec![0u8; 2352];
//! track[15] = 1; // Mode 1
//! let report = demux(track.as_slice(), MemorySink::new(), &DemuxOptions::new()).unwrap();
//! assert_eq!(report.sink.stream(&StreamKey::UNTYPED).unwrap().len(), 2048);
//! ```

pub mod demux;
pub mod error;
pub mod key;
pub mod reader;
pub mod router;
pub mod sector;
pub mod sink;
pub mod submode;
pub mod util;

pub use demux::{DemuxCounts, DemuxOptions, DemuxReport, UnknownModePolicy, demux, demux_with};
pub use error::{DemuxError, SectorError, SinkError};
pub use key::{StreamKey, StreamType};
pub use reader::SectorReader;
pub use router::{StreamRouter, StreamStats};
pub use sector::{
    ClassifyOptions, Msf, SECTOR_SIZE, SYNC_PATTERN, Sector, SectorMode, SubheaderPolicy,
};
pub use sink::{MemorySink, NullSink, OutputSink};
pub use submode::{Submode, XaSubheader};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
