//! The single linear demultiplexing pass.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{DemuxError, SectorError};
use crate::key::StreamKey;
use crate::reader::SectorReader;
use crate::router::{StreamRouter, StreamStats};
use crate::sector::{ClassifyOptions, Sector, SectorMode, SubheaderPolicy};
use crate::sink::OutputSink;

/// What to do with a sector whose mode byte is not 0, 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownModePolicy {
    /// Abort the pass with [`SectorError::UnrecognizedMode`].
    #[default]
    Abort,
    /// Log a warning, count the sector and continue.
    Skip,
}

/// Options for a demultiplexing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemuxOptions {
    pub classify: ClassifyOptions,
    pub unknown_mode: UnknownModePolicy,
    /// Drop filler sectors instead of appending them.
    pub skip_filler: bool,
}

impl DemuxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_sync(mut self, verify_sync: bool) -> Self {
        self.classify.verify_sync = verify_sync;
        self
    }

    pub fn subheader(mut self, policy: SubheaderPolicy) -> Self {
        self.classify.subheader = policy;
        self
    }

    pub fn unknown_mode(mut self, policy: UnknownModePolicy) -> Self {
        self.unknown_mode = policy;
        self
    }

    pub fn skip_filler(mut self, skip: bool) -> Self {
        self.skip_filler = skip;
        self
    }
}

/// Sector counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DemuxCounts {
    /// Complete sectors read from the input
    pub sectors_read: u64,
    /// Sectors whose payload was appended to a stream
    pub sectors_routed: u64,
    pub empty: u64,
    pub mode1: u64,
    pub mode2_plain: u64,
    pub mode2_form1: u64,
    pub mode2_form2: u64,
    /// Filler sectors dropped because of `skip_filler`
    pub filler_skipped: u64,
    /// Sectors dropped because of `UnknownModePolicy::Skip`
    pub unknown_skipped: u64,
    /// XA sectors decoded from the first copy of a disagreeing sub-header
    pub subheader_mismatches: u64,
}

impl DemuxCounts {
    fn record_mode(&mut self, mode: SectorMode) {
        match mode {
            SectorMode::Empty => self.empty += 1,
            SectorMode::Mode1 => self.mode1 += 1,
            SectorMode::Mode2Plain => self.mode2_plain += 1,
            SectorMode::Mode2Form1 => self.mode2_form1 += 1,
            SectorMode::Mode2Form2 => self.mode2_form2 += 1,
        }
    }
}

/// Result of a completed pass.
#[derive(Debug)]
pub struct DemuxReport<S> {
    /// The sink, already finalized
    pub sink: S,
    pub streams: BTreeMap<StreamKey, StreamStats>,
    pub counts: DemuxCounts,
}

/// Demultiplex every sector of `source` into `sink`.
pub fn demux<R, S>(
    source: R,
    sink: S,
    options: &DemuxOptions,
) -> Result<DemuxReport<S>, DemuxError>
where
    R: Read,
    S: OutputSink,
{
    demux_with(source, sink, options, |_, _| {})
}

/// Like [`demux`], calling `on_sector` with the index and descriptor of each
/// classified sector before it is routed.
///
/// Any error aborts the pass. Bytes already handed to the sink stay there,
/// and the sink is still finalized so buffered output is flushed.
pub fn demux_with<R, S, F>(
    source: R,
    sink: S,
    options: &DemuxOptions,
    mut on_sector: F,
) -> Result<DemuxReport<S>, DemuxError>
where
    R: Read,
    S: OutputSink,
    F: FnMut(u64, &Sector<'_>),
{
    log::debug!("Starting demux pass with {:?}", options);

    let mut reader = SectorReader::new(source);
    let mut router = StreamRouter::new(sink);
    let mut counts = DemuxCounts::default();

    if let Err(e) = run_pass(&mut reader, &mut router, options, &mut counts, &mut on_sector) {
        router.finish_after_error();
        return Err(e);
    }

    let (sink, streams) = router.finish()?;
    log::debug!(
        "Demux pass finished: {} sectors read, {} streams",
        counts.sectors_read,
        streams.len()
    );

    Ok(DemuxReport {
        sink,
        streams,
        counts,
    })
}

fn run_pass<R, S, F>(
    reader: &mut SectorReader<R>,
    router: &mut StreamRouter<S>,
    options: &DemuxOptions,
    counts: &mut DemuxCounts,
    on_sector: &mut F,
) -> Result<(), DemuxError>
where
    R: Read,
    S: OutputSink,
    F: FnMut(u64, &Sector<'_>),
{
    loop {
        let index = reader.index();
        let offset = reader.offset();
        let Some(block) = reader.next_block()? else {
            return Ok(());
        };
        counts.sectors_read += 1;

        let sector = match Sector::classify(block, &options.classify) {
            Ok(sector) => sector,
            Err(SectorError::UnrecognizedMode { mode })
                if options.unknown_mode == UnknownModePolicy::Skip =>
            {
                log::warn!(
                    "Skipping sector {} (offset {}): unrecognized mode 0x{:02x}",
                    index,
                    offset,
                    mode
                );
                counts.unknown_skipped += 1;
                continue;
            }
            Err(source) => {
                return Err(DemuxError::Sector {
                    index,
                    offset,
                    source,
                });
            }
        };

        counts.record_mode(sector.mode);
        if let Some(sub) = &sector.subheader
            && !sub.copies_agree()
        {
            log::warn!(
                "Sector {} ({}): sub-header copies disagree ({:02x?} vs {:02x?}), using the first",
                index,
                sector.address,
                sub.first_copy(),
                sub.second_copy()
            );
            counts.subheader_mismatches += 1;
        }

        on_sector(index, &sector);

        if options.skip_filler && sector.is_filler() {
            log::trace!("Sector {} is filler, skipped", index);
            counts.filler_skipped += 1;
            continue;
        }

        if router.route(index, &sector)?.is_some() {
            counts.sectors_routed += 1;
        }
    }
}

#[cfg(test)]
#[path = "tests/demux_tests.rs"]
mod tests;
