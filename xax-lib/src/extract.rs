//! Whole-track passes: extraction into a target directory, and scanning
//! without writing anything.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use xax_core::{
    DemuxCounts, DemuxOptions, NullSink, Sector, StreamKey, StreamStats, StreamType, demux_with,
};

use crate::error::ExtractError;
use crate::sink::{DirectorySink, WriteMode};

/// Options for [`extract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub demux: DemuxOptions,
    pub write_mode: WriteMode,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn demux(mut self, demux: DemuxOptions) -> Self {
        self.demux = demux;
        self
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }
}

/// One extracted stream.
#[derive(Debug, Clone, Serialize)]
pub struct StreamSummary {
    /// `type/ff/cc`
    pub key: String,
    pub stream_type: StreamType,
    pub file_number: u8,
    pub channel_number: u8,
    /// Output file, for extracted streams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub stats: StreamStats,
}

impl StreamSummary {
    fn new(key: &StreamKey, path: Option<PathBuf>, stats: StreamStats) -> Self {
        Self {
            key: key.to_string(),
            stream_type: key.stream_type,
            file_number: key.file_number,
            channel_number: key.channel_number,
            path,
            stats,
        }
    }
}

/// Outcome of a successful extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub target: PathBuf,
    pub write_mode: WriteMode,
    pub counts: DemuxCounts,
    /// Streams in key order (video, audio, data, untyped)
    pub streams: Vec<StreamSummary>,
}

impl ExtractSummary {
    pub fn total_bytes(&self) -> u64 {
        total_bytes(&self.streams)
    }
}

/// Outcome of a scan: the streams an extraction would produce.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub counts: DemuxCounts,
    pub streams: Vec<StreamSummary>,
}

impl ScanSummary {
    pub fn total_bytes(&self) -> u64 {
        total_bytes(&self.streams)
    }
}

fn total_bytes(streams: &[StreamSummary]) -> u64 {
    streams.iter().map(|s| s.stats.bytes).sum()
}

/// Demultiplex `input` into stream files under `target`.
pub fn extract<R: Read>(
    input: R,
    target: &Path,
    options: &ExtractOptions,
) -> Result<ExtractSummary, ExtractError> {
    extract_with(input, target, options, |_, _| {})
}

/// Like [`extract`], calling `on_sector` for each classified sector.
pub fn extract_with<R, F>(
    input: R,
    target: &Path,
    options: &ExtractOptions,
    on_sector: F,
) -> Result<ExtractSummary, ExtractError>
where
    R: Read,
    F: FnMut(u64, &Sector<'_>),
{
    if target.exists() && !target.is_dir() {
        return Err(ExtractError::invalid_target(format!(
            "{} exists and is not a directory",
            target.display()
        )));
    }
    fs::create_dir_all(target)?;

    log::debug!("Extracting into {}", target.display());
    let sink = DirectorySink::new(target).with_mode(options.write_mode);
    let report = demux_with(input, sink, &options.demux, on_sector)?;

    let streams = report
        .streams
        .iter()
        .map(|(key, stats)| StreamSummary::new(key, Some(report.sink.path_for(key)), *stats))
        .collect();

    Ok(ExtractSummary {
        target: target.to_path_buf(),
        write_mode: options.write_mode,
        counts: report.counts,
        streams,
    })
}

/// Classify and route every sector of `input` without writing any output.
pub fn scan_with<R, F>(
    input: R,
    options: &DemuxOptions,
    on_sector: F,
) -> Result<ScanSummary, ExtractError>
where
    R: Read,
    F: FnMut(u64, &Sector<'_>),
{
    let report = demux_with(input, NullSink, options, on_sector)?;
    let streams = report
        .streams
        .iter()
        .map(|(key, stats)| StreamSummary::new(key, None, *stats))
        .collect();

    Ok(ScanSummary {
        counts: report.counts,
        streams,
    })
}
