//! # Cache Invalidation Codec
//!
//! ## Purpose
//!
//! This crate contains the "rules" layer of the invalidation feed: the wire
//! format for cache-invalidation events and the functions that decode, build,
//! and render them. Everything here is a pure function of a byte slice.
//!
//! ## Wire Format
//!
//! An invalidation record is a fixed-offset binary layout, no length prefix,
//! no varint, no checksum:
//!
//! | Offset | Length | Field     | Encoding                       |
//! |--------|--------|-----------|--------------------------------|
//! | 0      | 1      | kind      | raw byte (ASCII tag)           |
//! | 1      | 16     | key       | opaque binary blob             |
//! | 17     | 8      | timestamp | little-endian IEEE-754 double  |
//!
//! A `'C'` (cache key changed) record is exactly 25 bytes; trailing bytes are
//! ignored. No other kind's payload layout is defined - the decoder accepts
//! them and leaves the payload untouched. Offsets are hard-coded constants
//! rather than computed: the format is frozen, and a new event kind with a
//! different shape gets a new branch, not a generalized schema.
//!
//! ## What This Crate Contains
//! - `decode` - classify one raw message and extract the change payload
//! - `encode_change` - builder-side counterpart for the `'C'` record
//! - Rendering helpers for the console output format
//! - Wire format constants and error types
//!
//! ## What This Crate Does NOT Contain
//! - Network transport logic (belongs in `transport`)
//! - The consume loop or any per-process state (belongs in the consumer)

pub mod constants;
pub mod decoder;
pub mod error;
pub mod render;

// Re-export key types for convenience
pub use constants::{
    CHANGE_RECORD_SIZE, KEY_OFFSET, KEY_SIZE, KIND_CHANGE, KIND_HEARTBEAT, KIND_OFFSET,
    TIMESTAMP_OFFSET, TIMESTAMP_SIZE,
};
pub use decoder::{decode, encode_change, ChangeRecord, InvalidationEvent};
pub use error::{DecodeError, DecodeResult};
pub use render::{format_key, format_timestamp, render};
