//! Payload routing and per-stream bookkeeping.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::DemuxError;
use crate::key::StreamKey;
use crate::sector::{SECTOR_SIZE, Sector};
use crate::sink::OutputSink;

/// Running totals for one output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    /// Number of sectors appended
    pub sectors: u64,
    /// Number of payload bytes appended
    pub bytes: u64,
    /// Index of the sector that created the stream
    pub first_sector: u64,
    /// Index of the most recent sector appended
    pub last_sector: u64,
}

impl StreamStats {
    fn new(index: u64) -> Self {
        Self {
            sectors: 0,
            bytes: 0,
            first_sector: index,
            last_sector: index,
        }
    }
}

/// Routes sector payloads to their streams in the output sink.
///
/// The router owns the map of open streams for one pass. Payloads are
/// appended in the order they are routed; nothing is buffered or reordered.
/// Routing the same input twice appends it twice.
pub struct StreamRouter<S> {
    sink: S,
    streams: BTreeMap<StreamKey, StreamStats>,
}

impl<S: OutputSink> StreamRouter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            streams: BTreeMap::new(),
        }
    }

    /// Append the sector's payload to its stream.
    ///
    /// The key is computed from this sector alone, so two sectors with the
    /// same file/channel but different type flags land in different streams.
    /// Sectors without payload bytes are not appended and create no stream.
    pub fn route(
        &mut self,
        index: u64,
        sector: &Sector<'_>,
    ) -> Result<Option<StreamKey>, DemuxError> {
        if sector.payload.is_empty() {
            return Ok(None);
        }

        let key = sector.stream_key();
        self.sink
            .append(&key, sector.payload)
            .map_err(|source| DemuxError::Sink {
                index,
                offset: index * SECTOR_SIZE as u64,
                key,
                source,
            })?;

        let stats = self.streams.entry(key).or_insert_with(|| {
            log::debug!("New stream {} at sector {}", key, index);
            StreamStats::new(index)
        });
        stats.sectors += 1;
        stats.bytes += sector.payload.len() as u64;
        stats.last_sector = index;
        log::trace!("Sector {} -> {} ({} bytes)", index, key, sector.payload.len());

        Ok(Some(key))
    }

    pub fn streams(&self) -> &BTreeMap<StreamKey, StreamStats> {
        &self.streams
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Finalize the sink after a fatal error so buffered output reaches its
    /// destination. A finalize failure is logged; the pass error wins.
    pub(crate) fn finish_after_error(&mut self) {
        if let Err(e) = self.sink.finish() {
            log::warn!("Failed to finalize output streams after error: {}", e);
        }
    }

    /// Finalize the sink and hand back it and the stream map.
    pub fn finish(mut self) -> Result<(S, BTreeMap<StreamKey, StreamStats>), DemuxError> {
        self.sink.finish().map_err(DemuxError::Finish)?;
        Ok((self.sink, self.streams))
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
