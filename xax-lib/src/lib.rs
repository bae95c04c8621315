//! Extraction of CD-ROM XA tracks to a directory tree.
//!
//! Builds on [`xax_core`]: this crate supplies the filesystem side (input
//! opening, the per-stream file sink and a run summary).

pub mod error;
pub mod extract;
pub mod input;
pub mod sink;

pub use error::ExtractError;
pub use extract::{
    ExtractOptions, ExtractSummary, ScanSummary, StreamSummary, extract, extract_with, scan_with,
};
pub use input::InputSource;
pub use sink::{DirectorySink, WriteMode};

pub use xax_core::{
    DemuxCounts, DemuxError, DemuxOptions, SECTOR_SIZE, Sector, SectorMode, StreamKey,
    StreamType, SubheaderPolicy, UnknownModePolicy, util,
};
