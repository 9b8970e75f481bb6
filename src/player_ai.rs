use rand::rngs::SmallRng;

use crate::{
    ai::Targeting,
    common::{FieldError, GuessData},
    config::PLACEMENT_ORDER,
    field::Field,
    player::Player,
};

/// Computer player: random fleet layout and hunt/target shooting.
#[derive(Debug, Default)]
pub struct AiPlayer {
    targeting: Targeting,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targeting(&self) -> Targeting {
        self.targeting
    }
}

impl Player for AiPlayer {
    fn place_boats(&mut self, rng: &mut SmallRng, field: &mut Field) -> Result<(), FieldError> {
        for boat_type in PLACEMENT_ORDER {
            let boat = field.random_placement(rng, boat_type)?;
            field.place(&boat)?;
        }
        Ok(())
    }

    fn decide_guess(&mut self, rng: &mut SmallRng, opponent: &Field) -> (u8, u8) {
        match self.targeting.next_guess(rng, opponent) {
            Some((r, c)) => (r as u8, c as u8),
            None => {
                log::warn!("No unknown squares left, shooting at the origin");
                (0, 0)
            }
        }
    }

    fn handle_guess_result(&mut self, guess: GuessData) {
        self.targeting
            .record((guess.row as usize, guess.col as usize), guess.result);
    }

    fn reset(&mut self) {
        self.targeting.reset();
    }
}
