//! Output sink seam.
//!
//! The core never opens files: it hands `(key, bytes)` pairs to an
//! [`OutputSink`], which owns persistence.

use std::collections::BTreeMap;

use crate::error::SinkError;
use crate::key::StreamKey;

/// Destination for demultiplexed payload bytes.
pub trait OutputSink {
    /// Append `bytes` to the stream identified by `key`, creating the stream
    /// on first use.
    fn append(&mut self, key: &StreamKey, bytes: &[u8]) -> Result<(), SinkError>;

    /// Flush and finalize all streams once the input is exhausted.
    ///
    /// The default implementation does nothing.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn append(&mut self, key: &StreamKey, bytes: &[u8]) -> Result<(), SinkError> {
        (**self).append(key, bytes)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn append(&mut self, key: &StreamKey, bytes: &[u8]) -> Result<(), SinkError> {
        (**self).append(key, bytes)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// Sink that discards every payload.
///
/// For passes that only need the router's stream map and counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn append(&mut self, _key: &StreamKey, _bytes: &[u8]) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that keeps every stream in memory.
///
/// Also records each append call, in order, which makes it the sink of
/// choice for inspecting routing decisions.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    streams: BTreeMap<StreamKey, Vec<u8>>,
    appends: Vec<(StreamKey, usize)>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated bytes for `key`, if anything was appended to it.
    pub fn stream(&self, key: &StreamKey) -> Option<&[u8]> {
        self.streams.get(key).map(Vec::as_slice)
    }

    pub fn streams(&self) -> &BTreeMap<StreamKey, Vec<u8>> {
        &self.streams
    }

    /// Every append call as `(key, length)`, in call order.
    pub fn appends(&self) -> &[(StreamKey, usize)] {
        &self.appends
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl OutputSink for MemorySink {
    fn append(&mut self, key: &StreamKey, bytes: &[u8]) -> Result<(), SinkError> {
        self.streams.entry(*key).or_default().extend_from_slice(bytes);
        self.appends.push((*key, bytes.len()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}
