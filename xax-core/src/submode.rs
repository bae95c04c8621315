//! CD-ROM XA sub-header decoding.
//!
//! The sub-header sits at bytes 16..24 of a Mode 2 sector, right after the
//! sector header. It holds four one-byte fields, stored twice:
//!
//! | byte | field              |
//! |------|--------------------|
//! | 0, 4 | file number        |
//! | 1, 5 | channel number     |
//! | 2, 6 | submode flags      |
//! | 3, 7 | coding information |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::key::StreamType;

/// Only the low five bits of the channel byte select a channel.
const CHANNEL_MASK: u8 = 0x1F;

/// Submode byte of an XA sub-header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Submode(pub u8);

impl Submode {
    pub const END_OF_RECORD: u8 = 1 << 0;
    pub const VIDEO: u8 = 1 << 1;
    pub const AUDIO: u8 = 1 << 2;
    pub const DATA: u8 = 1 << 3;
    pub const TRIGGER: u8 = 1 << 4;
    pub const FORM2: u8 = 1 << 5;
    pub const REAL_TIME: u8 = 1 << 6;
    pub const END_OF_FILE: u8 = 1 << 7;

    fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn end_of_record(self) -> bool {
        self.has(Self::END_OF_RECORD)
    }

    pub fn video(self) -> bool {
        self.has(Self::VIDEO)
    }

    pub fn audio(self) -> bool {
        self.has(Self::AUDIO)
    }

    pub fn data(self) -> bool {
        self.has(Self::DATA)
    }

    pub fn trigger(self) -> bool {
        self.has(Self::TRIGGER)
    }

    /// Form bit: set for Form 2 (2324-byte payload), clear for Form 1.
    pub fn form2(self) -> bool {
        self.has(Self::FORM2)
    }

    pub fn real_time(self) -> bool {
        self.has(Self::REAL_TIME)
    }

    /// Informational only; streams stay open past an end-of-file sector.
    pub fn end_of_file(self) -> bool {
        self.has(Self::END_OF_FILE)
    }

    /// Stream type with fixed precedence: video, then audio, then data.
    pub fn stream_type(self) -> StreamType {
        if self.video() {
            StreamType::Video
        } else if self.audio() {
            StreamType::Audio
        } else if self.data() {
            StreamType::Data
        } else {
            StreamType::Untyped
        }
    }

    /// Names of every type flag that is set, in precedence order.
    pub fn type_labels(self) -> Vec<&'static str> {
        [
            (self.video(), "Video"),
            (self.audio(), "Audio"),
            (self.data(), "Data"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

/// The eight raw sub-header bytes of a Mode 2 sector.
///
/// Accessors read the first copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct XaSubheader(pub [u8; 8]);

impl XaSubheader {
    pub fn from_bytes(bytes: &[u8; 8]) -> Self {
        Self(*bytes)
    }

    pub fn first_copy(&self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], self.0[3]]
    }

    pub fn second_copy(&self) -> [u8; 4] {
        [self.0[4], self.0[5], self.0[6], self.0[7]]
    }

    /// Whether both redundant copies hold the same four bytes.
    pub fn copies_agree(&self) -> bool {
        self.first_copy() == self.second_copy()
    }

    pub fn file_number(&self) -> u8 {
        self.0[0]
    }

    pub fn channel_number(&self) -> u8 {
        self.0[1] & CHANNEL_MASK
    }

    pub fn submode(&self) -> Submode {
        Submode(self.0[2])
    }

    /// Audio/video coding parameters. Not interpreted.
    pub fn coding_info(&self) -> u8 {
        self.0[3]
    }
}

impl fmt::Display for XaSubheader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.submode().type_labels();
        let types = if labels.is_empty() {
            "None".to_string()
        } else {
            labels.join("/")
        };
        write!(
            f,
            "{} F{:02x} C{:02x}",
            types,
            self.file_number(),
            self.channel_number()
        )
    }
}
