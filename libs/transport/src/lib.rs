//! # Invalidation Feed Transport
//!
//! ## Purpose
//!
//! The subscriber side of the invalidation channel: an explicitly owned
//! connection that delivers raw byte messages, one at a time, blocking until
//! the next one arrives. The consumer loop sees only the [`Subscription`]
//! trait, so a replayed message sequence can stand in for a live endpoint in
//! tests.
//!
//! ## What This Crate Contains
//! - [`Subscription`] - the "deliver the next raw message" capability
//! - [`TcpSubscriber`] - length-prefixed framing over a TCP connection
//! - [`ReplaySource`] - in-process test double yielding a fixed sequence
//!
//! ## What This Crate Does NOT Contain
//! - Wire format interpretation (belongs in `codec`); frames are opaque here
//! - Reconnect or backoff policy; a dead connection surfaces as an error

pub mod error;
pub mod replay;
pub mod tcp;

pub use error::{Result, TransportError};
pub use replay::ReplaySource;
pub use tcp::TcpSubscriber;

use async_trait::async_trait;

/// A subscribed endpoint on the invalidation channel
///
/// `receive` suspends until the next message is available. `Ok(None)` means
/// the stream ended cleanly and no further messages will arrive; the loop
/// can terminate deterministically on it.
#[async_trait]
pub trait Subscription {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>>;
}
