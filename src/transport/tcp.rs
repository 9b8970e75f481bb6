use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::codec::{self, Decoder};
use crate::message::{Event, Message};
use crate::transport::Transport;

/// Default timeout for network operations (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const READ_CHUNK: usize = 256;

pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    decoder: Decoder,
    buf: [u8; READ_CHUNK],
    pos: usize,
    filled: usize,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self {
            stream,
            timeout_duration,
            decoder: Decoder::new(),
            buf: [0; READ_CHUNK],
            pos: 0,
            filled: 0,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Write bytes as-is, bypassing the encoder.
    pub async fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let limit = self.timeout_duration;
        let write_op = async {
            self.stream.write_all(bytes).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::BrokenPipe
                    || e.kind() == std::io::ErrorKind::ConnectionReset
                {
                    anyhow::anyhow!("Connection closed by peer")
                } else {
                    anyhow::anyhow!("Write error: {}", e)
                }
            })
        };
        timeout(limit, write_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", limit))?
    }

    fn drain_buffered(&mut self) -> Option<Event> {
        while self.pos < self.filled {
            let event = self.decoder.decode(self.buf[self.pos]);
            self.pos += 1;
            if event != Event::NoEvent {
                return Some(event);
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let frame = codec::encode(&msg);
        self.send_raw(frame.as_bytes()).await
    }

    async fn recv(&mut self) -> anyhow::Result<Event> {
        loop {
            if let Some(event) = self.drain_buffered() {
                return Ok(event);
            }

            let limit = self.timeout_duration;
            let read_op = async {
                self.stream.read(&mut self.buf).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::ConnectionReset {
                        anyhow::anyhow!("Connection reset by peer")
                    } else {
                        anyhow::anyhow!("Read error: {}", e)
                    }
                })
            };
            let n = timeout(limit, read_op)
                .await
                .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))??;
            if n == 0 {
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }
            self.pos = 0;
            self.filled = n;
        }
    }
}
