//! Messages exchanged between peers and the events the agent consumes.

use crate::codec::FrameError;
use crate::common::ShotResult;
use crate::negotiation::{Commitment, Secret};

/// One wire message. "No message" is `Option::<Message>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Challenge carrying the commitment to the challenger's secret.
    Cha { commitment: Commitment },
    /// Acceptance carrying the acceptor's secret.
    Acc { secret: Secret },
    /// Reveal of the challenger's secret.
    Rev { secret: Secret },
    /// Shot at (row, col) of the receiver's field.
    Sho { row: i16, col: i16 },
    /// Result of the shot at (row, col).
    Res { row: u16, col: u16, result: ShotResult },
}

impl Message {
    /// Three-letter wire tag.
    pub const fn tag(&self) -> &'static str {
        match self {
            Message::Cha { .. } => "CHA",
            Message::Acc { .. } => "ACC",
            Message::Rev { .. } => "REV",
            Message::Sho { .. } => "SHO",
            Message::Res { .. } => "RES",
        }
    }
}

/// Input to [`Agent::step`](crate::Agent::step): decoded frames plus local
/// triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    NoEvent,
    /// A malformed frame was dropped by the decoder.
    Error(FrameError),
    ResetButton,
    StartButton,
    /// The last emitted message left the node.
    MessageSent,
    ChaReceived { commitment: Commitment },
    AccReceived { secret: Secret },
    RevReceived { secret: Secret },
    ShoReceived { row: i16, col: i16 },
    ResReceived { row: u16, col: u16, result: ShotResult },
}

impl From<Message> for Event {
    fn from(msg: Message) -> Self {
        match msg {
            Message::Cha { commitment } => Event::ChaReceived { commitment },
            Message::Acc { secret } => Event::AccReceived { secret },
            Message::Rev { secret } => Event::RevReceived { secret },
            Message::Sho { row, col } => Event::ShoReceived { row, col },
            Message::Res { row, col, result } => Event::ResReceived { row, col, result },
        }
    }
}
