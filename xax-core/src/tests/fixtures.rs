//! Synthetic raw sectors for unit tests.

use crate::sector::{SECTOR_SIZE, SYNC_PATTERN};

/// Sync pattern, BCD address 00:02:00 and the given mode byte.
pub(crate) fn raw_sector(mode: u8) -> [u8; SECTOR_SIZE] {
    let mut sector = [0u8; SECTOR_SIZE];
    sector[0..12].copy_from_slice(&SYNC_PATTERN);
    sector[12] = 0x00;
    sector[13] = 0x02;
    sector[14] = 0x00;
    sector[15] = mode;
    sector
}

/// Mode 1 sector with every byte after the header set to `fill`.
pub(crate) fn mode1_sector(fill: u8) -> [u8; SECTOR_SIZE] {
    let mut sector = raw_sector(1);
    sector[16..].fill(fill);
    sector
}

/// Mode 2 XA sector with matching sub-header copies and every byte after the
/// sub-header set to `fill`.
pub(crate) fn xa_sector(file: u8, channel: u8, submode: u8, fill: u8) -> [u8; SECTOR_SIZE] {
    let mut sector = raw_sector(2);
    let copy = [file, channel, submode, 0x00];
    sector[16..20].copy_from_slice(&copy);
    sector[20..24].copy_from_slice(&copy);
    sector[24..].fill(fill);
    sector
}

/// Concatenate sectors into a track image.
pub(crate) fn track(sectors: &[[u8; SECTOR_SIZE]]) -> Vec<u8> {
    sectors.iter().flat_map(|s| s.iter().copied()).collect()
}
