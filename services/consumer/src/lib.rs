//! # Cacheflush Consumer
//!
//! The service shell around the invalidation codec: connect to the publisher
//! endpoint, subscribe to everything, then fetch one message at a time,
//! decode it, and render `'C'` events to the console. Messages are
//! independent; nothing is shared between iterations except counters.
//!
//! Decode failures are per-message and never stop the loop. The loop itself
//! is cancellable: it selects between the next message and a shutdown
//! channel, so it terminates deterministically in tests and on ctrl-c.

pub mod config;
pub mod consumer;

pub use config::{ConsumerConfig, SubscriberSettings};
pub use consumer::{run, ConsumerError, ConsumerStats};
