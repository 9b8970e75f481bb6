use rand::rngs::SmallRng;

use crate::common::{FieldError, GuessData};
use crate::field::Field;

/// Interface implemented by different player types.
pub trait Player {
    /// Place the whole fleet onto the provided own field.
    fn place_boats(&mut self, rng: &mut SmallRng, field: &mut Field) -> Result<(), FieldError>;

    /// Choose the next square to shoot at given what is known of the opponent.
    fn decide_guess(&mut self, rng: &mut SmallRng, opponent: &Field) -> (u8, u8);

    /// Inform the player of the result of its last guess.
    fn handle_guess_result(&mut self, _guess: GuessData) {}

    /// Forget everything about the current match.
    fn reset(&mut self) {}
}
