use battleboats::{Boat, BoatDirection, BoatType, FieldError};

#[test]
fn test_sizes_and_status_bits() {
    let sizes: Vec<u8> = BoatType::ALL.iter().map(|b| b.size()).collect();
    assert_eq!(sizes, vec![3, 4, 5, 6]);
    let bits: Vec<u8> = BoatType::ALL.iter().map(|b| b.status_bit()).collect();
    assert_eq!(bits, vec![0x01, 0x02, 0x04, 0x08]);
}

#[test]
fn test_new_and_mask() -> Result<(), FieldError> {
    let boat = Boat::new(BoatType::Medium, BoatDirection::East, 2, 1)?;
    let cells: Vec<_> = boat.mask().iter_set_bits().collect();
    assert_eq!(cells, vec![(2, 1), (2, 2), (2, 3), (2, 4)]);
    assert_eq!(boat.origin(), (2, 1));
    assert_eq!(boat.direction(), BoatDirection::East);
    Ok(())
}

#[test]
fn test_south_mask() -> Result<(), FieldError> {
    let boat = Boat::new(BoatType::Huge, BoatDirection::South, 0, 9)?;
    let cells: Vec<_> = boat.mask().iter_set_bits().collect();
    assert_eq!(cells, (0..6).map(|r| (r, 9)).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_out_of_bounds() {
    // huge boat fills a whole column but cannot start on row 1
    assert_eq!(
        Boat::new(BoatType::Huge, BoatDirection::South, 1, 0),
        Err(FieldError::BoatOutOfBounds)
    );
    assert_eq!(
        Boat::new(BoatType::Small, BoatDirection::East, 0, 8),
        Err(FieldError::BoatOutOfBounds)
    );
    assert_eq!(
        Boat::new(BoatType::Small, BoatDirection::East, 6, 0),
        Err(FieldError::BoatOutOfBounds)
    );
    assert!(Boat::new(BoatType::Small, BoatDirection::East, 5, 7).is_ok());
}
