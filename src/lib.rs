#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;
mod agent;
mod ai;
mod bitboard;
mod boat;
pub mod codec;
mod common;
mod config;
mod field;
#[cfg(feature = "std")]
mod logging;
mod message;
pub mod negotiation;
#[cfg(feature = "std")]
pub mod node;
mod player;
mod player_ai;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
mod ui;

pub use agent::*;
pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, FieldMask};
pub use boat::*;
pub use codec::{Decoder, DecodeState, Frame, FrameError};
pub use common::*;
pub use config::*;
pub use field::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use message::*;
pub use negotiation::{CoinOutcome, Commitment, Secret, PUBLIC_KEY};
#[cfg(feature = "std")]
pub use node::AgentNode;
pub use player::*;
pub use player_ai::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
#[cfg(feature = "std")]
pub use ui::*;
