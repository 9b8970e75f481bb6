//! Byte-stream links between two nodes.
//!
//! Every transport writes whole encoded frames and runs whatever it reads
//! through its own [`Decoder`](crate::codec::Decoder), so the node above only
//! ever sees decoded events.

use crate::message::{Event, Message};

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    /// Next event decoded from the stream; never [`Event::NoEvent`].
    async fn recv(&mut self) -> anyhow::Result<Event>;
}

pub mod in_memory;
pub mod tcp;
