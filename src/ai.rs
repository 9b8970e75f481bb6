// Hunt/target guessing for the opponent field.
// Uses no_std and avoids heap allocations.

use rand::Rng;

use crate::bitboard::FieldMask;
use crate::common::ShotResult;
use crate::config::{FIELD_COLS, FIELD_ROWS, HUNT_PARITY};
use crate::field::Field;

/// Compass direction used while chasing a boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    West,
    East,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::West, Heading::East];

    pub const fn opposite(self) -> Self {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
            Heading::East => Heading::West,
        }
    }

    /// Square `distance` steps away from `from`, if still on the field.
    pub fn step(self, from: (usize, usize), distance: usize) -> Option<(usize, usize)> {
        let (row, col) = from;
        let target = match self {
            Heading::North => (row.checked_sub(distance)?, col),
            Heading::South => (row + distance, col),
            Heading::West => (row, col.checked_sub(distance)?),
            Heading::East => (row, col + distance),
        };
        (target.0 < FIELD_ROWS && target.1 < FIELD_COLS).then_some(target)
    }
}

/// Per-match targeting memory.
///
/// `Hunting` sweeps the field. A hit switches to `Probing` its neighbours;
/// a second hit locks the line and keeps extending it, flipping to the far
/// side of the origin once when the line runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Targeting {
    #[default]
    Hunting,
    Probing {
        origin: (usize, usize),
        probe: Option<Heading>,
    },
    Locked {
        origin: (usize, usize),
        heading: Heading,
        reach: usize,
        reversed: bool,
    },
}

impl Targeting {
    pub fn new() -> Self {
        Targeting::Hunting
    }

    pub fn reset(&mut self) {
        *self = Targeting::Hunting;
    }

    /// Pick the next square to shoot, or `None` once nothing is unknown.
    pub fn next_guess<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        opponent: &Field,
    ) -> Option<(usize, usize)> {
        let unknown = opponent.unknown_squares();
        let is_unknown = |sq: &(usize, usize)| unknown.get(sq.0, sq.1).unwrap_or(false);

        // Locked -> Locked reversed -> Hunting is the longest fallback chain.
        for _ in 0..3 {
            match *self {
                Targeting::Hunting => break,
                Targeting::Probing { origin, .. } => {
                    let probe = Heading::ALL.into_iter().find_map(|heading| {
                        heading
                            .step(origin, 1)
                            .filter(is_unknown)
                            .map(|sq| (heading, sq))
                    });
                    match probe {
                        Some((heading, sq)) => {
                            *self = Targeting::Probing {
                                origin,
                                probe: Some(heading),
                            };
                            return Some(sq);
                        }
                        None => *self = Targeting::Hunting,
                    }
                }
                Targeting::Locked {
                    origin,
                    heading,
                    reach,
                    reversed,
                } => {
                    let toward = if reversed { heading.opposite() } else { heading };
                    match toward.step(origin, reach + 1).filter(is_unknown) {
                        Some(sq) => return Some(sq),
                        None if !reversed => {
                            *self = Targeting::Locked {
                                origin,
                                heading,
                                reach: 0,
                                reversed: true,
                            }
                        }
                        None => *self = Targeting::Hunting,
                    }
                }
            }
        }
        *self = Targeting::Hunting;
        hunt(rng, &unknown)
    }

    /// Update after the peer reported `result` for the shot at `square`.
    pub fn record(&mut self, square: (usize, usize), result: ShotResult) {
        if result.sunk_boat().is_some() {
            *self = Targeting::Hunting;
            return;
        }
        *self = match (*self, result.is_hit()) {
            (Targeting::Hunting, true) => Targeting::Probing {
                origin: square,
                probe: None,
            },
            (
                Targeting::Probing {
                    origin,
                    probe: Some(heading),
                },
                true,
            ) => Targeting::Locked {
                origin,
                heading,
                reach: 1,
                reversed: false,
            },
            (
                Targeting::Locked {
                    origin,
                    heading,
                    reach,
                    reversed,
                },
                true,
            ) => Targeting::Locked {
                origin,
                heading,
                reach: reach + 1,
                reversed,
            },
            (
                Targeting::Locked {
                    origin,
                    heading,
                    reversed: false,
                    ..
                },
                false,
            ) => Targeting::Locked {
                origin,
                heading,
                reach: 0,
                reversed: true,
            },
            (Targeting::Locked { reversed: true, .. }, false) => Targeting::Hunting,
            (state, _) => state,
        };
    }
}

/// Random unknown square on the hunt lattice, else any unknown square.
pub fn hunt<R: Rng + ?Sized>(rng: &mut R, unknown: &FieldMask) -> Option<(usize, usize)> {
    let lattice = *unknown & FieldMask::lattice(HUNT_PARITY);
    let pool = if lattice.is_empty() { *unknown } else { lattice };
    let count = pool.count_ones();
    if count == 0 {
        return None;
    }
    pool.iter_set_bits().nth(rng.random_range(0..count))
}
