//! Transport error types
//!
//! Connection errors are fatal at startup; everything after that is a
//! per-connection failure the caller decides how to handle.

use thiserror::Error;

/// Main transport error type
#[derive(Error, Debug)]
pub enum TransportError {
    /// The subscriber endpoint could not be reached.
    #[error("connection to {address} failed: {source}")]
    Connection {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failure on an established connection.
    #[error("transport i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame declared a length beyond the configured maximum. Usually a
    /// desynchronized stream rather than a genuinely huge message.
    #[error("frame too large: {size} bytes exceeds maximum {max}")]
    FrameTooLarge { size: usize, max: usize },
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;
