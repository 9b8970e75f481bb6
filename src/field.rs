//! Playing field: boat layout, attack bookkeeping and per-boat lives.
//!
//! An agent keeps two fields. Its own field starts empty and collects lives as
//! boats are placed. The opponent field starts fully unknown with every boat
//! alive and is filled in from the results the peer reports.

use core::fmt;
use rand::Rng;

use crate::bitboard::FieldMask;
use crate::boat::{Boat, BoatDirection, BoatType};
use crate::common::{FieldError, ShotResult};
use crate::config::{FIELD_COLS, FIELD_ROWS, NUM_BOATS, PLACEMENT_ATTEMPTS};

/// Content of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareStatus {
    Empty,
    Boat(BoatType),
    Unknown,
    Hit,
    Miss,
}

impl SquareStatus {
    pub const fn glyph(self) -> char {
        match self {
            SquareStatus::Empty => '.',
            SquareStatus::Boat(boat) => boat.glyph(),
            SquareStatus::Unknown => '~',
            SquareStatus::Hit => 'X',
            SquareStatus::Miss => 'o',
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Field {
    grid: [[SquareStatus; FIELD_COLS]; FIELD_ROWS],
    lives: [u8; NUM_BOATS],
    occupied: FieldMask,
}

/// Fresh (own, opponent) pair for a new match.
pub fn field_pair() -> (Field, Field) {
    (Field::own(), Field::opponent())
}

impl Field {
    /// Own field: every square empty, no boats, no lives.
    pub fn own() -> Self {
        Field {
            grid: [[SquareStatus::Empty; FIELD_COLS]; FIELD_ROWS],
            lives: [0; NUM_BOATS],
            occupied: FieldMask::new(),
        }
    }

    /// Opponent field: every square unknown, every boat at full strength.
    pub fn opponent() -> Self {
        Field {
            grid: [[SquareStatus::Unknown; FIELD_COLS]; FIELD_ROWS],
            lives: BoatType::ALL.map(BoatType::size),
            occupied: FieldMask::new(),
        }
    }

    /// Status of a square, or `None` when it lies outside the field.
    pub fn square(&self, row: usize, col: usize) -> Option<SquareStatus> {
        self.grid.get(row)?.get(col).copied()
    }

    /// Overwrite a square, returning its previous status.
    pub fn set_square(
        &mut self,
        row: usize,
        col: usize,
        status: SquareStatus,
    ) -> Option<SquareStatus> {
        let square = self.grid.get_mut(row)?.get_mut(col)?;
        Some(core::mem::replace(square, status))
    }

    /// Rows of the grid, top first.
    pub fn rows(&self) -> &[[SquareStatus; FIELD_COLS]; FIELD_ROWS] {
        &self.grid
    }

    /// Remaining segments of `boat`.
    pub fn lives(&self, boat: BoatType) -> u8 {
        self.lives[boat.index()]
    }

    /// Place a boat with its first square at (`row`, `col`). Nothing changes
    /// unless every square is on the field and free.
    pub fn add_boat(
        &mut self,
        row: usize,
        col: usize,
        direction: BoatDirection,
        boat_type: BoatType,
    ) -> Result<(), FieldError> {
        let boat = Boat::new(boat_type, direction, row, col)?;
        self.place(&boat)
    }

    /// Place an already positioned boat.
    pub fn place(&mut self, boat: &Boat) -> Result<(), FieldError> {
        let mask = boat.mask();
        if !(self.occupied & mask).is_empty() {
            return Err(FieldError::BoatOverlaps);
        }
        // squares hit or missed before placement count as taken too
        if mask
            .iter_set_bits()
            .any(|(r, c)| self.grid[r][c] != SquareStatus::Empty)
        {
            return Err(FieldError::BoatOverlaps);
        }
        for (r, c) in mask.iter_set_bits() {
            self.grid[r][c] = SquareStatus::Boat(boat.boat_type());
        }
        self.occupied = self.occupied | mask;
        self.lives[boat.boat_type().index()] += boat.boat_type().size();
        Ok(())
    }

    /// Pick a random free position for `boat_type`, giving up after a fixed
    /// number of rejected candidates.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        boat_type: BoatType,
    ) -> Result<Boat, FieldError> {
        let len = boat_type.size() as usize;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let direction = if rng.random() {
                BoatDirection::East
            } else {
                BoatDirection::South
            };
            let (max_r, max_c) = match direction {
                BoatDirection::East => (FIELD_ROWS - 1, FIELD_COLS - len),
                BoatDirection::South => (FIELD_ROWS - len, FIELD_COLS - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            let boat = Boat::new(boat_type, direction, r, c)?;
            if (self.occupied & boat.mask()).is_empty() {
                return Ok(boat);
            }
        }
        Err(FieldError::UnableToPlaceBoat(boat_type))
    }

    /// Record an incoming shot against this field.
    ///
    /// Returns the square's prior status (`None` if off the field) and the
    /// result to report back. Squares already shot at, and squares outside the
    /// field, are reported as a miss and left untouched.
    pub fn register_attack(&mut self, row: usize, col: usize) -> (Option<SquareStatus>, ShotResult) {
        let Some(prior) = self.square(row, col) else {
            return (None, ShotResult::Miss);
        };
        let result = match prior {
            SquareStatus::Boat(boat) => {
                self.grid[row][col] = SquareStatus::Hit;
                let lives = &mut self.lives[boat.index()];
                *lives = lives.saturating_sub(1);
                if *lives == 0 {
                    ShotResult::sunk(boat)
                } else {
                    ShotResult::Hit
                }
            }
            SquareStatus::Empty | SquareStatus::Unknown => {
                self.grid[row][col] = SquareStatus::Miss;
                ShotResult::Miss
            }
            SquareStatus::Hit | SquareStatus::Miss => ShotResult::Miss,
        };
        (Some(prior), result)
    }

    /// Fold a result reported by the peer into what we know of its field.
    pub fn apply_known_result(
        &mut self,
        row: usize,
        col: usize,
        result: ShotResult,
    ) -> Option<SquareStatus> {
        let status = if result.is_hit() {
            SquareStatus::Hit
        } else {
            SquareStatus::Miss
        };
        let prior = self.set_square(row, col, status)?;
        if let Some(boat) = result.sunk_boat() {
            self.lives[boat.index()] = 0;
        }
        Some(prior)
    }

    /// Bit `i` is set while boat class `i` has at least one live segment.
    pub fn alive_fleet_bitmask(&self) -> u8 {
        BoatType::ALL
            .iter()
            .filter(|boat| self.lives[boat.index()] > 0)
            .fold(0, |mask, boat| mask | boat.status_bit())
    }

    /// Squares nothing is known about yet.
    pub fn unknown_squares(&self) -> FieldMask {
        let mut mask = FieldMask::new();
        for (r, row) in self.grid.iter().enumerate() {
            for (c, square) in row.iter().enumerate() {
                if *square == SquareStatus::Unknown {
                    // indices come from the grid itself
                    let _ = mask.set(r, c);
                }
            }
        }
        mask
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::own()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..FIELD_COLS {
            write!(f, " {}", c)?;
        }
        for (r, row) in self.grid.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{} ", r)?;
            for square in row {
                write!(f, " {}", square.glyph())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field {{ lives: {:?}", self.lives)?;
        writeln!(f, "{}", self)?;
        write!(f, "}}")
    }
}
