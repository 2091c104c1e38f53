//! Wire format.
//!
//! After the handshake every message is exactly two bytes:
//! a shot request is `[row, col]`, a reply is `[outcome_code, 0xFF]`.
//! Which of the two a frame is follows from whose turn it is.

use alloc::vec::Vec;
use core::fmt;

use crate::core::{GameConfig, GameEngine, ShotOutcome};

/// Version carried in the handshake.
pub const PROTOCOL_VERSION: u8 = 1;

/// Size of every in-game message.
pub const FRAME_LEN: usize = 2;

/// Filler byte in the second position of a reply.
pub const REPLY_FILLER: u8 = 0xFF;

/// Upper bound on an encoded handshake.
pub const MAX_HANDSHAKE_SIZE: u32 = 4096;

/// Encoded handshake size without the ship list: version, rows and cols bytes
/// plus the `u64` length bincode writes before a sequence.
pub const HANDSHAKE_HEADER_LEN: usize = 3 + 8;

/// One fixed-size message.
pub type Frame = [u8; FRAME_LEN];

/// Numeric code for an outcome on the wire.
pub fn outcome_code(outcome: ShotOutcome) -> u8 {
    match outcome {
        ShotOutcome::Hit => 2,
        ShotOutcome::Miss => 3,
        ShotOutcome::Sunk => 4,
        ShotOutcome::Forbidden => 5,
    }
}

/// Inverse of [`outcome_code`].
pub fn outcome_from_code(code: u8) -> Option<ShotOutcome> {
    match code {
        2 => Some(ShotOutcome::Hit),
        3 => Some(ShotOutcome::Miss),
        4 => Some(ShotOutcome::Sunk),
        5 => Some(ShotOutcome::Forbidden),
        _ => None,
    }
}

/// A frame that does not decode as the message expected at this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// First byte of a reply is not an outcome code.
    UnknownOutcome(u8),
    /// Second byte of a reply is not the filler.
    BadFiller(u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::UnknownOutcome(code) => write!(f, "unknown outcome code {}", code),
            FrameError::BadFiller(byte) => {
                write!(f, "reply filler must be 0xFF, got {:#04x}", byte)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Request to fire at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotRequest {
    pub row: u8,
    pub col: u8,
}

impl ShotRequest {
    /// `None` when a coordinate does not fit in a byte.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        Some(Self {
            row: u8::try_from(row).ok()?,
            col: u8::try_from(col).ok()?,
        })
    }

    pub fn coord(&self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }

    pub fn encode(&self) -> Frame {
        [self.row, self.col]
    }

    /// Any two bytes are a request; bounds are the resolver's business.
    pub fn decode(frame: Frame) -> Self {
        Self {
            row: frame[0],
            col: frame[1],
        }
    }
}

/// Reply carrying the outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReply {
    pub outcome: ShotOutcome,
}

impl ShotReply {
    pub fn new(outcome: ShotOutcome) -> Self {
        Self { outcome }
    }

    pub fn encode(&self) -> Frame {
        [outcome_code(self.outcome), REPLY_FILLER]
    }

    pub fn decode(frame: Frame) -> Result<Self, FrameError> {
        let outcome = outcome_from_code(frame[0]).ok_or(FrameError::UnknownOutcome(frame[0]))?;
        if frame[1] != REPLY_FILLER {
            return Err(FrameError::BadFiller(frame[1]));
        }
        Ok(Self { outcome })
    }
}

/// Exchanged once before play so both peers know they play the same game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Handshake {
    pub version: u8,
    pub rows: u8,
    pub cols: u8,
    /// Ship lengths in fleet order.
    pub ships: Vec<u8>,
}

impl Handshake {
    /// Describe a validated configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        let ships = crate::core::Fleet::from_config(&config.fleet)
            .lengths()
            .into_iter()
            .map(|len| len.min(u8::MAX as usize) as u8)
            .collect();
        Self {
            version: PROTOCOL_VERSION,
            rows: config.rows.min(u8::MAX as usize) as u8,
            cols: config.cols.min(u8::MAX as usize) as u8,
            ships,
        }
    }

    pub fn from_engine(engine: &GameEngine) -> Self {
        Self::from_config(engine.config())
    }

    /// Same grid and fleet, ignoring the version.
    pub fn same_game(&self, other: &Handshake) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.ships == other.ships
    }
}
