//! Boat classes and placement masks.

use core::fmt;

use crate::bitboard::FieldMask;
use crate::common::FieldError;
use crate::config::{FIELD_COLS, FIELD_ROWS};

/// The four boat classes every fleet carries, one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoatType {
    Small,
    Medium,
    Large,
    Huge,
}

impl BoatType {
    /// Smallest first, matching the bit order of the fleet bitmask.
    pub const ALL: [BoatType; 4] = [
        BoatType::Small,
        BoatType::Medium,
        BoatType::Large,
        BoatType::Huge,
    ];

    /// Number of squares the boat covers.
    pub const fn size(self) -> u8 {
        match self {
            BoatType::Small => 3,
            BoatType::Medium => 4,
            BoatType::Large => 5,
            BoatType::Huge => 6,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            BoatType::Small => 0,
            BoatType::Medium => 1,
            BoatType::Large => 2,
            BoatType::Huge => 3,
        }
    }

    /// Bit for this class in a fleet alive bitmask.
    pub const fn status_bit(self) -> u8 {
        1 << self.index()
    }

    /// Single-character glyph used when rendering a field.
    pub const fn glyph(self) -> char {
        match self {
            BoatType::Small => '3',
            BoatType::Medium => '4',
            BoatType::Large => '5',
            BoatType::Huge => '6',
        }
    }
}

impl fmt::Display for BoatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoatType::Small => "small",
            BoatType::Medium => "medium",
            BoatType::Large => "large",
            BoatType::Huge => "huge",
        };
        f.write_str(name)
    }
}

/// Boats extend from their origin square towards the east or the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoatDirection {
    East,
    South,
}

/// A boat positioned on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boat {
    boat_type: BoatType,
    direction: BoatDirection,
    row: usize,
    col: usize,
    mask: FieldMask,
}

impl Boat {
    /// Position a boat with its first square at (`row`, `col`).
    pub fn new(
        boat_type: BoatType,
        direction: BoatDirection,
        row: usize,
        col: usize,
    ) -> Result<Self, FieldError> {
        let len = boat_type.size() as usize;
        let fits = match direction {
            BoatDirection::East => row < FIELD_ROWS && col + len <= FIELD_COLS,
            BoatDirection::South => col < FIELD_COLS && row + len <= FIELD_ROWS,
        };
        if !fits {
            return Err(FieldError::BoatOutOfBounds);
        }

        let mask = FieldMask::from_iter((0..len).map(|i| match direction {
            BoatDirection::East => (row, col + i),
            BoatDirection::South => (row + i, col),
        }))?;

        Ok(Boat {
            boat_type,
            direction,
            row,
            col,
            mask,
        })
    }

    pub fn boat_type(&self) -> BoatType {
        self.boat_type
    }

    pub fn direction(&self) -> BoatDirection {
        self.direction
    }

    /// Origin of the boat (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Squares covered by the boat.
    pub fn mask(&self) -> FieldMask {
        self.mask
    }
}
