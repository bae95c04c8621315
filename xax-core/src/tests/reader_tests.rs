use super::*;
use crate::fixtures::{mode1_sector, track};
use std::io::{self, Cursor};

/// Reader that hands out at most `chunk` bytes per call, like a pipe.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    interrupted: bool,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::Error::from(ErrorKind::Interrupted));
        }
        let n = buf.len().min(self.chunk).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn empty_input_ends_cleanly() {
    let mut reader = SectorReader::new(Cursor::new(Vec::new()));
    assert!(reader.next_block().unwrap().is_none());
    assert_eq!(reader.index(), 0);
}

#[test]
fn reads_whole_sectors_in_order() {
    let data = track(&[mode1_sector(1), mode1_sector(2)]);
    let mut reader = SectorReader::new(Cursor::new(data));

    assert_eq!(reader.next_block().unwrap().unwrap()[100], 1);
    assert_eq!(reader.index(), 1);
    assert_eq!(reader.offset(), SECTOR_SIZE as u64);

    assert_eq!(reader.next_block().unwrap().unwrap()[100], 2);
    assert!(reader.next_block().unwrap().is_none());
    assert_eq!(reader.index(), 2);
}

#[test]
fn partial_trailing_block_is_truncation() {
    let mut data = track(&[mode1_sector(0)]);
    data.extend_from_slice(&[0u8; 100]);
    let mut reader = SectorReader::new(Cursor::new(data));

    assert!(reader.next_block().unwrap().is_some());
    match reader.next_block() {
        Err(DemuxError::TruncatedInput {
            index,
            offset,
            remaining,
        }) => {
            assert_eq!(index, 1);
            assert_eq!(offset, SECTOR_SIZE as u64);
            assert_eq!(remaining, 100);
        }
        other => panic!("expected truncation, got {:?}", other.map(|b| b.is_some())),
    }
}

#[test]
fn short_reads_are_reassembled() {
    let data = track(&[mode1_sector(7), mode1_sector(8)]);
    let mut reader = SectorReader::new(Trickle {
        data,
        pos: 0,
        chunk: 1000,
        interrupted: false,
    });

    assert_eq!(reader.next_block().unwrap().unwrap()[SECTOR_SIZE - 1], 7);
    assert_eq!(reader.next_block().unwrap().unwrap()[SECTOR_SIZE - 1], 8);
    assert!(reader.next_block().unwrap().is_none());
}

#[test]
fn read_errors_propagate() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    let mut reader = SectorReader::new(Broken);
    match reader.next_block() {
        Err(DemuxError::ReadFailed { index, offset, .. }) => {
            assert_eq!(index, 0);
            assert_eq!(offset, 0);
        }
        other => panic!("expected read failure, got {:?}", other.map(|b| b.is_some())),
    }
}
