//! Decode errors for the invalidation wire format
//!
//! Both variants are per-message failures: the consume loop logs them and
//! moves on to the next message rather than terminating.

use thiserror::Error;

/// Errors produced while decoding one raw message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A zero-length message carries no kind tag to classify.
    #[error("empty message: no kind byte available")]
    Empty,

    /// A `'C'` record shorter than its fixed layout. The timestamp read at
    /// byte 17 would run past the end of the buffer.
    #[error("truncated change record: need {need} bytes, got {got}")]
    Truncated { need: usize, got: usize },
}

/// Result type for decode operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
