//! TCP subscriber with length-prefixed framing
//!
//! Each message on the wire is a `u32` big-endian length prefix followed by
//! the message body. The body is delivered verbatim; a zero-length body is a
//! legal (empty) message. Subscription interest is registered by sending one
//! frame whose body is `0x01` followed by the filter prefix, the shape an
//! XPUB-style publisher expects; an empty filter subscribes to everything.

use crate::error::{Result, TransportError};
use crate::Subscription;
use async_trait::async_trait;
use bytes::BytesMut;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

/// First byte of a subscription frame: register interest in a prefix.
pub const SUBSCRIBE_FLAG: u8 = 0x01;

/// Default cap on a single frame body.
pub const DEFAULT_MAX_FRAME_BYTES: usize = 64 * 1024;

/// A connected subscriber endpoint over TCP
pub struct TcpSubscriber {
    stream: TcpStream,
    peer_addr: SocketAddr,
    max_frame_bytes: usize,
    bytes_received: u64,
    messages_received: u64,
}

impl TcpSubscriber {
    /// Establish a subscriber connection to the publisher endpoint
    ///
    /// Fails with [`TransportError::Connection`] if the endpoint cannot be
    /// reached. No subscription is registered yet; call
    /// [`subscribe`](Self::subscribe) before expecting messages.
    pub async fn connect(address: &str) -> Result<Self> {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|e| TransportError::Connection {
                address: address.to_string(),
                source: e,
            })?;

        let peer_addr = stream.peer_addr().map_err(|e| TransportError::Connection {
            address: address.to_string(),
            source: e,
        })?;

        info!(peer = %peer_addr, "connected to invalidation publisher");

        Ok(Self {
            stream,
            peer_addr,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            bytes_received: 0,
            messages_received: 0,
        })
    }

    /// Override the maximum accepted frame body size.
    pub fn with_max_frame_bytes(mut self, max_frame_bytes: usize) -> Self {
        self.max_frame_bytes = max_frame_bytes;
        self
    }

    /// Register interest in messages matching `filter`
    ///
    /// An empty filter subscribes to every message on the channel. The
    /// publisher matches on prefix; this consumer always passes an empty
    /// filter, but the frame shape supports any prefix.
    pub async fn subscribe(&mut self, filter: &[u8]) -> Result<()> {
        let body_len = 1 + filter.len();

        let mut frame = BytesMut::with_capacity(4 + body_len);
        frame.extend_from_slice(&(body_len as u32).to_be_bytes());
        frame.extend_from_slice(&[SUBSCRIBE_FLAG]);
        frame.extend_from_slice(filter);

        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;

        debug!(
            peer = %self.peer_addr,
            filter_len = filter.len(),
            "sent subscription frame"
        );
        Ok(())
    }

    /// Peer address of the publisher endpoint.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Total message count delivered so far.
    pub fn messages_received(&self) -> u64 {
        self.messages_received
    }

    /// Total bytes read so far, length prefixes included.
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }
}

#[async_trait]
impl Subscription for TcpSubscriber {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        let mut len_buf = [0u8; 4];
        match self.stream.read_exact(&mut len_buf).await {
            Ok(_) => {}
            // EOF on a frame boundary is a clean end of stream.
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                info!(
                    peer = %self.peer_addr,
                    messages = self.messages_received,
                    "publisher closed the stream"
                );
                return Ok(None);
            }
            Err(e) => return Err(TransportError::Io(e)),
        }

        let len = u32::from_be_bytes(len_buf) as usize;
        if len > self.max_frame_bytes {
            return Err(TransportError::FrameTooLarge {
                size: len,
                max: self.max_frame_bytes,
            });
        }

        // EOF inside a frame body is a real error, not a clean close.
        let mut body = vec![0u8; len];
        self.stream.read_exact(&mut body).await?;

        self.messages_received += 1;
        self.bytes_received += 4 + len as u64;

        debug!(
            peer = %self.peer_addr,
            bytes = len,
            total = self.messages_received,
            "received message"
        );

        Ok(Some(body))
    }
}
