//! Raw sector classification.
//!
//! Turns one 2352-byte block into a [`Sector`] descriptor: its address,
//! which of the Mode 0 / Mode 1 / Mode 2 layouts it uses, the XA sub-header
//! when there is one, and the payload slice for that layout. EDC/ECC bytes
//! are never inspected.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::SectorError;
use crate::key::StreamKey;
use crate::submode::{Submode, XaSubheader};
use crate::util::bcd_to_int;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Raw CD sector size (sync + header + user data + EDC/ECC).
pub const SECTOR_SIZE: usize = 2352;

/// CD sync pattern at the start of every raw sector.
pub const SYNC_PATTERN: [u8; 12] = [
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
];

/// Minute/second/frame address bytes, right after the sync pattern.
const ADDRESS: Range<usize> = 12..15;

const MODE_OFFSET: usize = 15;

/// Both sub-header copies: 12 (sync) + 4 (header) = 16.
const SUBHEADER: Range<usize> = 16..24;

/// Mode 1 user data, followed by EDC, 8 zero bytes and ECC.
const MODE1_PAYLOAD: Range<usize> = 16..2064;

/// Mode 2 Form 1 user data, after the 8-byte sub-header.
const FORM1_PAYLOAD: Range<usize> = 24..2072;

/// Mode 2 Form 2 user data; only a 4-byte EDC follows.
const FORM2_PAYLOAD: Range<usize> = 24..2348;

/// Formless Mode 2: everything after the header is user data.
const MODE2_PLAIN_PAYLOAD: Range<usize> = 16..2352;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do when the two sub-header copies of a Mode 2 sector differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubheaderPolicy {
    /// No sub-header is recognized: the sector is formless Mode 2.
    #[default]
    Plain,
    /// Trust the first copy and classify the sector as XA anyway.
    FirstCopy,
    /// Fail with [`SectorError::SubheaderMismatch`].
    Strict,
}

/// Options that control how raw blocks are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Reject blocks that don't start with [`SYNC_PATTERN`].
    pub verify_sync: bool,

    /// Handling of disagreeing sub-header copies.
    pub subheader: SubheaderPolicy,
}

impl ClassifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_sync(mut self, verify_sync: bool) -> Self {
        self.verify_sync = verify_sync;
        self
    }

    pub fn subheader(mut self, policy: SubheaderPolicy) -> Self {
        self.subheader = policy;
        self
    }
}

// ---------------------------------------------------------------------------
// Sector model
// ---------------------------------------------------------------------------

/// Sector layout, selected by the mode byte and, for Mode 2, the sub-header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectorMode {
    /// Mode 0: no user data.
    Empty,
    /// Mode 1: 2048 bytes of user data.
    Mode1,
    /// Mode 2 without a recognizable sub-header: 2336 bytes of user data.
    Mode2Plain,
    /// CD-ROM XA Mode 2 Form 1: 2048 bytes of user data.
    Mode2Form1,
    /// CD-ROM XA Mode 2 Form 2: 2324 bytes of user data.
    Mode2Form2,
}

impl SectorMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Mode1 => "Mode1",
            Self::Mode2Plain => "Mode2",
            Self::Mode2Form1 => "Mode2/Form1",
            Self::Mode2Form2 => "Mode2/Form2",
        }
    }

    /// Byte range of the user data within a raw sector.
    fn payload_range(self) -> Range<usize> {
        match self {
            Self::Empty => 0..0,
            Self::Mode1 => MODE1_PAYLOAD,
            Self::Mode2Plain => MODE2_PLAIN_PAYLOAD,
            Self::Mode2Form1 => FORM1_PAYLOAD,
            Self::Mode2Form2 => FORM2_PAYLOAD,
        }
    }

    /// Length of the user data for this layout.
    pub fn payload_len(self) -> usize {
        self.payload_range().len()
    }
}

impl fmt::Display for SectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sector address as stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Msf {
    pub minute: u8,
    pub second: u8,
    pub frame: u8,
}

impl Msf {
    pub fn from_bcd(bytes: [u8; 3]) -> Self {
        Self {
            minute: bcd_to_int(bytes[0]),
            second: bcd_to_int(bytes[1]),
            frame: bcd_to_int(bytes[2]),
        }
    }
}

impl fmt::Display for Msf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minute, self.second, self.frame)
    }
}

/// A classified raw sector. The payload borrows from the raw block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector<'a> {
    pub address: Msf,
    pub mode: SectorMode,
    /// Present exactly when `mode` is Form 1 or Form 2.
    pub subheader: Option<XaSubheader>,
    pub payload: &'a [u8],
}

impl<'a> Sector<'a> {
    /// Classify one raw block.
    ///
    /// Pure function of `block` and `options`; the only branching is on the
    /// mode byte, the sub-header copies and the form bit.
    pub fn classify(
        block: &'a [u8; SECTOR_SIZE],
        options: &ClassifyOptions,
    ) -> Result<Self, SectorError> {
        if options.verify_sync && block[..SYNC_PATTERN.len()] != SYNC_PATTERN {
            return Err(SectorError::MissingSync);
        }

        let mut address = [0u8; 3];
        address.copy_from_slice(&block[ADDRESS]);
        let address = Msf::from_bcd(address);

        let (mode, subheader) = match block[MODE_OFFSET] {
            0 => (SectorMode::Empty, None),
            1 => (SectorMode::Mode1, None),
            2 => classify_mode2(block, options.subheader)?,
            mode => return Err(SectorError::UnrecognizedMode { mode }),
        };

        Ok(Self {
            address,
            mode,
            subheader,
            payload: &block[mode.payload_range()],
        })
    }

    /// Destination stream: taken from the sub-header for XA sectors,
    /// `untyped/00/00` for everything else.
    pub fn stream_key(&self) -> StreamKey {
        match &self.subheader {
            Some(sub) => StreamKey::new(
                sub.submode().stream_type(),
                sub.file_number(),
                sub.channel_number(),
            ),
            None => StreamKey::UNTYPED,
        }
    }

    pub fn submode(&self) -> Option<Submode> {
        self.subheader.map(|sub| sub.submode())
    }

    /// Mode 0 sectors and Form 2 sectors whose submode is the bare form bit.
    pub fn is_filler(&self) -> bool {
        match self.mode {
            SectorMode::Empty => true,
            SectorMode::Mode2Form2 => self.submode() == Some(Submode(Submode::FORM2)),
            _ => false,
        }
    }
}

/// Pick the Mode 2 layout from the sub-header copies and the form bit.
fn classify_mode2(
    block: &[u8; SECTOR_SIZE],
    policy: SubheaderPolicy,
) -> Result<(SectorMode, Option<XaSubheader>), SectorError> {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&block[SUBHEADER]);
    let subheader = XaSubheader::from_bytes(&raw);

    if !subheader.copies_agree() {
        match policy {
            SubheaderPolicy::Plain => {
                log::debug!(
                    "Sub-header copies differ ({:02x?} vs {:02x?}), classifying as plain Mode2",
                    subheader.first_copy(),
                    subheader.second_copy()
                );
                return Ok((SectorMode::Mode2Plain, None));
            }
            SubheaderPolicy::Strict => {
                return Err(SectorError::SubheaderMismatch {
                    first: subheader.first_copy(),
                    second: subheader.second_copy(),
                });
            }
            SubheaderPolicy::FirstCopy => {}
        }
    }

    let mode = if subheader.submode().form2() {
        SectorMode::Mode2Form2
    } else {
        SectorMode::Mode2Form1
    };
    Ok((mode, Some(subheader)))
}

/// Sector listing line: `00:02:16 Mode2/Form2 Video F01 C1f [2324]`.
impl fmt::Display for Sector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.mode)?;
        if let Some(sub) = &self.subheader {
            write!(f, " {}", sub)?;
        }
        write!(f, " [{}]", self.payload.len())
    }
}

#[cfg(test)]
#[path = "tests/sector_tests.rs"]
mod tests;
