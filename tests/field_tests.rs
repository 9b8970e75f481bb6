use battleboats::{
    field_pair, AiPlayer, BoatDirection, BoatType, Field, FieldError, Player, ShotResult,
    SquareStatus, FIELD_COLS, FIELD_ROWS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_field_pair_initial_state() {
    let (own, opp) = field_pair();
    assert_eq!(own.square(0, 0), Some(SquareStatus::Empty));
    assert_eq!(opp.square(5, 9), Some(SquareStatus::Unknown));
    assert_eq!(own.alive_fleet_bitmask(), 0);
    assert_eq!(opp.alive_fleet_bitmask(), 0x0F);
    for boat in BoatType::ALL {
        assert_eq!(own.lives(boat), 0);
        assert_eq!(opp.lives(boat), boat.size());
    }
    assert_eq!(opp.unknown_squares().count_ones(), FIELD_ROWS * FIELD_COLS);
}

#[test]
fn test_square_bounds() {
    let mut field = Field::own();
    assert_eq!(field.square(FIELD_ROWS, 0), None);
    assert_eq!(field.square(0, FIELD_COLS), None);
    assert_eq!(field.set_square(0, FIELD_COLS, SquareStatus::Hit), None);
    assert_eq!(field.set_square(1, 1, SquareStatus::Miss), Some(SquareStatus::Empty));
    assert_eq!(field.square(1, 1), Some(SquareStatus::Miss));
}

#[test]
fn test_add_boat_sets_squares_and_lives() {
    let mut field = Field::own();
    field.add_boat(0, 0, BoatDirection::East, BoatType::Small).unwrap();
    for c in 0..3 {
        assert_eq!(field.square(0, c), Some(SquareStatus::Boat(BoatType::Small)));
    }
    assert_eq!(field.square(0, 3), Some(SquareStatus::Empty));
    assert_eq!(field.lives(BoatType::Small), 3);
    assert_eq!(field.alive_fleet_bitmask(), BoatType::Small.status_bit());
}

#[test]
fn test_add_boat_rejects_overlap_and_edges() {
    let mut field = Field::own();
    field.add_boat(0, 2, BoatDirection::South, BoatType::Large).unwrap();
    let before = field.clone();

    assert_eq!(
        field.add_boat(1, 0, BoatDirection::East, BoatType::Small),
        Err(FieldError::BoatOverlaps)
    );
    assert_eq!(
        field.add_boat(0, 5, BoatDirection::East, BoatType::Huge),
        Err(FieldError::BoatOutOfBounds)
    );
    assert_eq!(field, before, "rejected placements leave the field untouched");
}

#[test]
fn test_register_attack_hit_sink_and_repeat() {
    let mut field = Field::own();
    field.add_boat(2, 4, BoatDirection::East, BoatType::Small).unwrap();
    field.add_boat(0, 0, BoatDirection::South, BoatType::Medium).unwrap();

    assert_eq!(
        field.register_attack(2, 4),
        (Some(SquareStatus::Boat(BoatType::Small)), ShotResult::Hit)
    );
    assert_eq!(field.register_attack(2, 5).1, ShotResult::Hit);
    assert_eq!(
        field.register_attack(2, 6),
        (Some(SquareStatus::Boat(BoatType::Small)), ShotResult::SmallSunk)
    );
    assert_eq!(field.lives(BoatType::Small), 0);
    assert_eq!(field.alive_fleet_bitmask(), BoatType::Medium.status_bit());

    // already hit square reports a miss and changes nothing
    assert_eq!(
        field.register_attack(2, 6),
        (Some(SquareStatus::Hit), ShotResult::Miss)
    );

    assert_eq!(
        field.register_attack(5, 9),
        (Some(SquareStatus::Empty), ShotResult::Miss)
    );
    assert_eq!(field.square(5, 9), Some(SquareStatus::Miss));
    assert_eq!(
        field.register_attack(5, 9),
        (Some(SquareStatus::Miss), ShotResult::Miss)
    );
}

#[test]
fn test_register_attack_off_field() {
    let mut field = Field::own();
    field.add_boat(0, 0, BoatDirection::East, BoatType::Small).unwrap();
    let before = field.clone();
    assert_eq!(field.register_attack(FIELD_ROWS, 0), (None, ShotResult::Miss));
    assert_eq!(field.register_attack(0, 200), (None, ShotResult::Miss));
    assert_eq!(field, before);
}

#[test]
fn test_apply_known_result() {
    let mut opp = Field::opponent();
    assert_eq!(
        opp.apply_known_result(1, 1, ShotResult::Hit),
        Some(SquareStatus::Unknown)
    );
    assert_eq!(opp.square(1, 1), Some(SquareStatus::Hit));
    assert_eq!(opp.lives(BoatType::Large), 5);

    assert_eq!(
        opp.apply_known_result(1, 2, ShotResult::Miss),
        Some(SquareStatus::Unknown)
    );
    assert_eq!(opp.square(1, 2), Some(SquareStatus::Miss));

    opp.apply_known_result(1, 3, ShotResult::LargeSunk);
    assert_eq!(opp.lives(BoatType::Large), 0);
    assert_eq!(opp.alive_fleet_bitmask(), 0x0F & !BoatType::Large.status_bit());

    assert_eq!(opp.apply_known_result(9, 9, ShotResult::Hit), None);
    assert_eq!(opp.unknown_squares().count_ones(), FIELD_ROWS * FIELD_COLS - 3);
}

#[test]
fn test_sinking_every_boat_clears_bitmask() {
    let mut opp = Field::opponent();
    for (i, result) in [
        ShotResult::SmallSunk,
        ShotResult::MediumSunk,
        ShotResult::LargeSunk,
        ShotResult::HugeSunk,
    ]
    .into_iter()
    .enumerate()
    {
        assert_ne!(opp.alive_fleet_bitmask(), 0);
        opp.apply_known_result(0, i, result);
    }
    assert_eq!(opp.alive_fleet_bitmask(), 0);
}

#[test]
fn test_random_fleet_placement() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut field = Field::own();
    AiPlayer::new().place_boats(&mut rng, &mut field).unwrap();

    let boat_squares = field
        .rows()
        .iter()
        .flatten()
        .filter(|s| matches!(s, SquareStatus::Boat(_)))
        .count();
    assert_eq!(boat_squares, 3 + 4 + 5 + 6);
    assert_eq!(field.alive_fleet_bitmask(), 0x0F);
    for boat in BoatType::ALL {
        assert_eq!(field.lives(boat), boat.size());
    }
}

#[test]
fn test_display_renders_grid() {
    let mut field = Field::own();
    field.add_boat(0, 0, BoatDirection::East, BoatType::Small).unwrap();
    field.register_attack(0, 0);
    field.register_attack(1, 0);
    let text = field.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), FIELD_ROWS + 1);
    assert_eq!(lines[0], "   0 1 2 3 4 5 6 7 8 9");
    assert_eq!(lines[1], "0  X 3 3 . . . . . . .");
    assert_eq!(lines[2], "1  o . . . . . . . . .");
}
