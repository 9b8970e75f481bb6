use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::codec::{self, Decoder};
use crate::message::{Event, Message};
use crate::transport::Transport;

type ByteQueue = Arc<Mutex<VecDeque<u8>>>;

/// Two ends of an in-process byte pipe.
pub struct InMemoryTransport {
    recv_queue: ByteQueue,
    send_queue: ByteQueue,
    decoder: Decoder,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = ByteQueue::default();
        let q2 = ByteQueue::default();
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
                decoder: Decoder::new(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
                decoder: Decoder::new(),
            },
        )
    }

    /// Push arbitrary bytes to the peer, bypassing the encoder.
    pub fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let mut queue = self
            .send_queue
            .lock()
            .map_err(|_| anyhow::anyhow!("Send queue poisoned"))?;
        queue.extend(bytes);
        Ok(())
    }

    fn drain_pending(&mut self) -> anyhow::Result<Option<Event>> {
        let mut queue = self
            .recv_queue
            .lock()
            .map_err(|_| anyhow::anyhow!("Receive queue poisoned"))?;
        while let Some(byte) = queue.pop_front() {
            let event = self.decoder.decode(byte);
            if event != Event::NoEvent {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let frame = codec::encode(&msg);
        self.send_raw(frame.as_bytes())
    }

    async fn recv(&mut self) -> anyhow::Result<Event> {
        loop {
            // sampled before draining so bytes sent just before the peer hung up still arrive
            let closed = Arc::strong_count(&self.recv_queue) == 1;
            if let Some(event) = self.drain_pending()? {
                return Ok(event);
            }
            if closed {
                return Err(anyhow::anyhow!("Channel closed"));
            }
            yield_now().await;
        }
    }
}
