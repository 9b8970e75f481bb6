use crate::boat::BoatType;

pub const FIELD_ROWS: usize = 6;
pub const FIELD_COLS: usize = 10;
pub const NUM_BOATS: usize = 4;

/// Placement order for the random fleet layout, largest first.
pub const PLACEMENT_ORDER: [BoatType; NUM_BOATS] = [
    BoatType::Huge,
    BoatType::Large,
    BoatType::Medium,
    BoatType::Small,
];

/// Random placement gives up on a boat after this many rejected positions.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Hunt lattice spacing. Every boat covers at least one lattice square when
/// the spacing equals the shortest boat.
pub const HUNT_PARITY: usize = BoatType::Small.size() as usize;
