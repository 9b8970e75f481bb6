//! Common types shared by the field, the players and the wire messages.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::boat::BoatType;

/// Outcome of a single shot, as carried in the third field of a RES frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    Miss,
    Hit,
    SmallSunk,
    MediumSunk,
    LargeSunk,
    HugeSunk,
}

impl ShotResult {
    /// Numeric code used on the wire.
    pub const fn code(self) -> u16 {
        match self {
            ShotResult::Miss => 0,
            ShotResult::Hit => 1,
            ShotResult::SmallSunk => 2,
            ShotResult::MediumSunk => 3,
            ShotResult::LargeSunk => 4,
            ShotResult::HugeSunk => 5,
        }
    }

    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(ShotResult::Miss),
            1 => Some(ShotResult::Hit),
            2 => Some(ShotResult::SmallSunk),
            3 => Some(ShotResult::MediumSunk),
            4 => Some(ShotResult::LargeSunk),
            5 => Some(ShotResult::HugeSunk),
            _ => None,
        }
    }

    /// Result reported when the last segment of `boat` goes down.
    pub const fn sunk(boat: BoatType) -> Self {
        match boat {
            BoatType::Small => ShotResult::SmallSunk,
            BoatType::Medium => ShotResult::MediumSunk,
            BoatType::Large => ShotResult::LargeSunk,
            BoatType::Huge => ShotResult::HugeSunk,
        }
    }

    /// The boat this result reports as sunk, if any.
    pub const fn sunk_boat(self) -> Option<BoatType> {
        match self {
            ShotResult::SmallSunk => Some(BoatType::Small),
            ShotResult::MediumSunk => Some(BoatType::Medium),
            ShotResult::LargeSunk => Some(BoatType::Large),
            ShotResult::HugeSunk => Some(BoatType::Huge),
            ShotResult::Miss | ShotResult::Hit => None,
        }
    }

    /// True for a plain hit or any sinking hit.
    pub const fn is_hit(self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

impl TryFrom<u16> for ShotResult {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        ShotResult::from_code(code).ok_or(code)
    }
}

impl From<ShotResult> for u16 {
    fn from(result: ShotResult) -> Self {
        result.code()
    }
}

/// One exchanged shot: where it landed and what it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessData {
    pub row: u8,
    pub col: u8,
    pub result: ShotResult,
}

impl GuessData {
    pub const fn new(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            result: ShotResult::Miss,
        }
    }
}

/// Errors returned by Field operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Coordinates outside the field.
    OutOfBounds { row: usize, col: usize },
    /// Boat would run off the edge of the field.
    BoatOutOfBounds,
    /// Boat placement overlaps another boat.
    BoatOverlaps,
    /// Random placement gave up on a boat.
    UnableToPlaceBoat(BoatType),
}

impl From<BitBoardError> for FieldError {
    fn from(err: BitBoardError) -> Self {
        FieldError::BitBoardError(err)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            FieldError::OutOfBounds { row, col } => {
                write!(f, "Square ({}, {}) is outside the field", row, col)
            }
            FieldError::BoatOutOfBounds => write!(f, "Boat placement is out of bounds"),
            FieldError::BoatOverlaps => write!(f, "Boat placement overlaps with another boat"),
            FieldError::UnableToPlaceBoat(boat) => write!(f, "Unable to place {} boat", boat),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {}
