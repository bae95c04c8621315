//! Sequential fixed-size block reader.

use std::io::{ErrorKind, Read};

use crate::error::DemuxError;
use crate::sector::SECTOR_SIZE;

/// Pulls 2352-byte blocks from a byte source, one at a time.
///
/// Short reads (pipes, stdin) are retried until a full block is available.
/// A partial trailing block is an error, never silently dropped.
pub struct SectorReader<R> {
    source: R,
    block: [u8; SECTOR_SIZE],
    index: u64,
}

impl<R: Read> SectorReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            block: [0u8; SECTOR_SIZE],
            index: 0,
        }
    }

    /// Index of the next sector to be read.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Byte offset of the next sector to be read.
    pub fn offset(&self) -> u64 {
        self.index * SECTOR_SIZE as u64
    }

    /// Read the next block.
    ///
    /// Returns `Ok(None)` once the source is exhausted on a sector boundary,
    /// and [`DemuxError::TruncatedInput`] if it ends part-way into a sector.
    pub fn next_block(&mut self) -> Result<Option<&[u8; SECTOR_SIZE]>, DemuxError> {
        let mut filled = 0;
        while filled < SECTOR_SIZE {
            match self.source.read(&mut self.block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(DemuxError::ReadFailed {
                        index: self.index,
                        offset: self.offset(),
                        source,
                    });
                }
            }
        }

        match filled {
            0 => Ok(None),
            SECTOR_SIZE => {
                self.index += 1;
                Ok(Some(&self.block))
            }
            remaining => Err(DemuxError::TruncatedInput {
                index: self.index,
                offset: self.offset(),
                remaining,
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;
