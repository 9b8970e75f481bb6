//! Game protocol state machine.
//!
//! One [`Agent`] holds everything a node knows about the current match: the
//! protocol state, both fields, the handshake secrets and the pending guess.
//! [`Agent::step`] consumes exactly one [`Event`] and returns at most one
//! [`Message`] to put on the wire. Events that make no sense in the current
//! state are dropped without touching anything.

use core::fmt;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::{GuessData, ShotResult};
use crate::field::Field;
use crate::message::{Event, Message};
use crate::negotiation::{self, CoinOutcome, Commitment, Secret};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    Start,
    Challenging,
    Accepting,
    Attacking,
    Defending,
    WaitingToSend,
    EndScreen,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentState::Start => "START",
            AgentState::Challenging => "CHALLENGING",
            AgentState::Accepting => "ACCEPTING",
            AgentState::Attacking => "ATTACKING",
            AgentState::Defending => "DEFENDING",
            AgentState::WaitingToSend => "WAITING_TO_SEND",
            AgentState::EndScreen => "END_SCREEN",
        };
        f.write_str(name)
    }
}

/// How a match ended, from this node's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameOutcome {
    Victory,
    Defeat,
    Draw,
    /// The revealed secret did not match the challenger's commitment.
    CheatingDetected,
}

impl GameOutcome {
    /// Outcome implied by the two fleet alive bitmasks, if either fleet is gone.
    pub const fn from_fleets(own_alive: u8, opponent_alive: u8) -> Option<Self> {
        match (own_alive == 0, opponent_alive == 0) {
            (false, true) => Some(GameOutcome::Victory),
            (true, false) => Some(GameOutcome::Defeat),
            (true, true) => Some(GameOutcome::Draw),
            (false, false) => None,
        }
    }

    /// Text shown on the end screen.
    pub const fn banner(self) -> &'static str {
        match self {
            GameOutcome::Victory => "VICTORY",
            GameOutcome::Defeat => "ALAS DEFEAT...",
            GameOutcome::Draw => "DRAW",
            GameOutcome::CheatingDetected => "ERROR: Cheating Detected",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.banner())
    }
}

/// Secrets exchanged during the coin flip.
///
/// The challenger fills `a` and `hash_a` up front and learns `b` from ACC.
/// The acceptor fills `hash_a` and `b` up front and learns `a` from REV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Handshake {
    pub a: Secret,
    pub b: Secret,
    pub hash_a: Commitment,
}

pub struct Agent<P: Player> {
    state: AgentState,
    player: P,
    rng: SmallRng,
    own_field: Field,
    opponent_field: Field,
    handshake: Handshake,
    own_guess: GuessData,
    turn_counter: u32,
    outcome: Option<GameOutcome>,
}

impl<P: Player> Agent<P> {
    pub fn new(player: P, rng: SmallRng) -> Self {
        Agent {
            state: AgentState::Start,
            player,
            rng,
            own_field: Field::own(),
            opponent_field: Field::opponent(),
            handshake: Handshake::default(),
            own_guess: GuessData::new(0, 0),
            turn_counter: 0,
            outcome: None,
        }
    }

    /// Throw away the current match and return to START.
    pub fn reset(&mut self) {
        self.player.reset();
        self.own_field = Field::own();
        self.opponent_field = Field::opponent();
        self.handshake = Handshake::default();
        self.own_guess = GuessData::new(0, 0);
        self.turn_counter = 0;
        self.outcome = None;
        if self.state != AgentState::Start {
            log::debug!("{} -> {} (reset)", self.state, AgentState::Start);
        }
        self.state = AgentState::Start;
    }

    /// Process one event, returning the message to send, if any.
    pub fn step(&mut self, event: Event) -> Option<Message> {
        match (self.state, event) {
            (_, Event::ResetButton) => {
                self.reset();
                None
            }
            (AgentState::Start, Event::StartButton) => self.challenge(),
            (AgentState::Start, Event::ChaReceived { commitment }) => self.accept(commitment),
            (AgentState::Challenging, Event::AccReceived { secret }) => self.reveal(secret),
            (AgentState::Accepting, Event::RevReceived { secret }) => self.check_reveal(secret),
            (AgentState::Attacking, Event::ResReceived { row, col, result }) => {
                self.record_result(row, col, result);
                None
            }
            (AgentState::Defending, Event::ShoReceived { row, col }) => {
                Some(self.answer_shot(row, col))
            }
            (AgentState::WaitingToSend, Event::MessageSent) => {
                self.turn_counter += 1;
                let shot = self.next_shot();
                self.transition(AgentState::Attacking);
                Some(shot)
            }
            (state, event) => {
                log::trace!("{} ignores {:?}", state, event);
                None
            }
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn own_field(&self) -> &Field {
        &self.own_field
    }

    pub fn opponent_field(&self) -> &Field {
        &self.opponent_field
    }

    pub fn handshake(&self) -> Handshake {
        self.handshake
    }

    /// Shots fired after the opening one.
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// Terminal outcome, set once END_SCREEN is reached.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    fn challenge(&mut self) -> Option<Message> {
        if !self.place_fleet() {
            return None;
        }
        let a: Secret = self.rng.random();
        let hash_a = negotiation::commit(a);
        self.handshake = Handshake { a, b: 0, hash_a };
        log::debug!("challenging with A={} hashA={}", a, hash_a);
        self.transition(AgentState::Challenging);
        Some(Message::Cha { commitment: hash_a })
    }

    fn accept(&mut self, commitment: Commitment) -> Option<Message> {
        if !self.place_fleet() {
            return None;
        }
        let b: Secret = self.rng.random();
        self.handshake = Handshake {
            a: 0,
            b,
            hash_a: commitment,
        };
        log::debug!("accepting hashA={} with B={}", commitment, b);
        self.transition(AgentState::Accepting);
        Some(Message::Acc { secret: b })
    }

    fn reveal(&mut self, peer_b: Secret) -> Option<Message> {
        self.handshake.b = peer_b;
        let next = match negotiation::coin_flip(self.handshake.a, peer_b) {
            CoinOutcome::Heads => AgentState::WaitingToSend,
            CoinOutcome::Tails => AgentState::Defending,
        };
        self.transition(next);
        Some(Message::Rev {
            secret: self.handshake.a,
        })
    }

    fn check_reveal(&mut self, peer_a: Secret) -> Option<Message> {
        self.handshake.a = peer_a;
        if !negotiation::verify(peer_a, self.handshake.hash_a) {
            log::warn!(
                "revealed A={} does not match hashA={}",
                peer_a,
                self.handshake.hash_a
            );
            self.finish(GameOutcome::CheatingDetected);
            return None;
        }
        let next = match negotiation::coin_flip(peer_a, self.handshake.b) {
            CoinOutcome::Tails => AgentState::Attacking,
            CoinOutcome::Heads => AgentState::Defending,
        };
        let shot = self.next_shot();
        self.transition(next);
        Some(shot)
    }

    fn record_result(&mut self, row: u16, col: u16, result: ShotResult) {
        let guess = &mut self.own_guess;
        if (row, col) != (guess.row as u16, guess.col as u16) {
            log::warn!(
                "result for ({}, {}) but last shot was ({}, {})",
                row,
                col,
                guess.row,
                guess.col
            );
        }
        guess.result = result;
        let guess = *guess;
        self.opponent_field
            .apply_known_result(guess.row as usize, guess.col as usize, result);
        self.player.handle_guess_result(guess);

        if self.opponent_field.alive_fleet_bitmask() == 0 {
            self.finish_by_fleets();
        } else {
            self.transition(AgentState::Defending);
        }
    }

    fn answer_shot(&mut self, row: i16, col: i16) -> Message {
        let (_, result) = match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) => self.own_field.register_attack(r, c),
            _ => (None, ShotResult::Miss),
        };
        log::debug!("incoming shot ({}, {}): {:?}", row, col, result);

        if self.own_field.alive_fleet_bitmask() == 0 {
            self.finish_by_fleets();
        } else {
            self.transition(AgentState::WaitingToSend);
        }
        // negative coordinates wrap into the unsigned RES fields
        Message::Res {
            row: row as u16,
            col: col as u16,
            result,
        }
    }

    fn next_shot(&mut self) -> Message {
        let (row, col) = self
            .player
            .decide_guess(&mut self.rng, &self.opponent_field);
        self.own_guess = GuessData::new(row, col);
        Message::Sho {
            row: row as i16,
            col: col as i16,
        }
    }

    fn place_fleet(&mut self) -> bool {
        match self.player.place_boats(&mut self.rng, &mut self.own_field) {
            Ok(()) => true,
            Err(err) => {
                log::error!("boat placement failed: {}", err);
                self.own_field = Field::own();
                false
            }
        }
    }

    fn finish_by_fleets(&mut self) {
        let own = self.own_field.alive_fleet_bitmask();
        let opponent = self.opponent_field.alive_fleet_bitmask();
        match GameOutcome::from_fleets(own, opponent) {
            Some(outcome) => self.finish(outcome),
            None => log::error!("end of match with both fleets afloat"),
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.transition(AgentState::EndScreen);
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
            log::info!("GAME OVER: {} after {} turns", outcome, self.turn_counter);
        }
    }

    fn transition(&mut self, next: AgentState) {
        log::debug!("{} -> {}", self.state, next);
        self.state = next;
    }
}

impl<P: Player> fmt::Debug for Agent<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("state", &self.state)
            .field("handshake", &self.handshake)
            .field("own_guess", &self.own_guess)
            .field("turn_counter", &self.turn_counter)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
