//! Wire format constants for invalidation records
//!
//! The byte layout is frozen: the publisher writes records with these exact
//! offsets, so they are spelled out as constants instead of being computed
//! from field sizes at runtime.

/// Offset of the single-byte kind tag.
pub const KIND_OFFSET: usize = 0;

/// Offset of the invalidated key within a `'C'` record.
pub const KEY_OFFSET: usize = 1;

/// Size of the invalidated key (an opaque 16-byte identifier).
pub const KEY_SIZE: usize = 16;

/// Offset of the event timestamp within a `'C'` record.
pub const TIMESTAMP_OFFSET: usize = 17;

/// Size of the little-endian IEEE-754 timestamp.
pub const TIMESTAMP_SIZE: usize = 8;

/// Total size of a `'C'` record: 1 tag byte + 16 key bytes + 8 timestamp bytes.
pub const CHANGE_RECORD_SIZE: usize = 25;

/// Kind tag for "cache key invalidated/changed".
pub const KIND_CHANGE: u8 = b'C';

/// Kind tag the publisher uses for its periodic heartbeat. The heartbeat is
/// a single byte with no payload; the decoder treats it like any other
/// non-`'C'` kind.
pub const KIND_HEARTBEAT: u8 = b'P';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_size_matches_field_layout() {
        assert_eq!(CHANGE_RECORD_SIZE, 1 + KEY_SIZE + TIMESTAMP_SIZE);
        assert_eq!(TIMESTAMP_OFFSET, KEY_OFFSET + KEY_SIZE);
    }
}
