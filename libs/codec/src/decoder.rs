//! Invalidation record decoder
//!
//! Converts one opaque raw message into a classified [`InvalidationEvent`],
//! or reports that the message is malformed. Decoding is a pure function of
//! the input slice: no allocation beyond the fixed-size payload copy, no
//! state carried between calls.
//!
//! The decoder is deliberately permissive about kinds it does not recognize.
//! The publisher only defines a payload layout for `'C'`; every other tag is
//! accepted as-is with no payload interpretation, so that new event kinds on
//! the channel never break existing consumers.

use crate::constants::{
    CHANGE_RECORD_SIZE, KEY_OFFSET, KEY_SIZE, KIND_CHANGE, TIMESTAMP_OFFSET, TIMESTAMP_SIZE,
};
use crate::error::{DecodeError, DecodeResult};

/// Payload of a `'C'` (cache key changed) record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeRecord {
    /// The invalidated cache key. An opaque 16-byte identifier, not a string.
    pub key: [u8; KEY_SIZE],
    /// Seconds since the reference epoch, with sub-second fraction.
    pub timestamp: f64,
}

/// The decoded form of one raw message
///
/// `kind` always reflects byte 0 of the input. `change` is populated if and
/// only if the kind is [`KIND_CHANGE`]; for every other kind the payload
/// shape is undefined and left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidationEvent {
    /// Single-byte tag identifying the event type.
    pub kind: u8,
    /// Structured payload, present only for `'C'` events.
    pub change: Option<ChangeRecord>,
}

impl InvalidationEvent {
    /// Whether this event invalidates a cache key.
    pub fn is_change(&self) -> bool {
        self.change.is_some()
    }

    /// The invalidated key, if this is a `'C'` event.
    pub fn key(&self) -> Option<&[u8; KEY_SIZE]> {
        self.change.as_ref().map(|c| &c.key)
    }

    /// The event timestamp, if this is a `'C'` event.
    pub fn timestamp(&self) -> Option<f64> {
        self.change.as_ref().map(|c| c.timestamp)
    }
}

/// Decode one raw message from the invalidation channel
///
/// Classifies the message by its first byte and, for `'C'` records, extracts
/// the fixed-offset payload. Bytes past the 25-byte record are ignored.
///
/// # Errors
/// - [`DecodeError::Empty`] if the message has no bytes at all
/// - [`DecodeError::Truncated`] if a `'C'` record is shorter than 25 bytes
pub fn decode(message: &[u8]) -> DecodeResult<InvalidationEvent> {
    let kind = *message.first().ok_or(DecodeError::Empty)?;

    if kind != KIND_CHANGE {
        return Ok(InvalidationEvent { kind, change: None });
    }

    if message.len() < CHANGE_RECORD_SIZE {
        return Err(DecodeError::Truncated {
            need: CHANGE_RECORD_SIZE,
            got: message.len(),
        });
    }

    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&message[KEY_OFFSET..KEY_OFFSET + KEY_SIZE]);

    let mut timestamp = [0u8; TIMESTAMP_SIZE];
    timestamp.copy_from_slice(&message[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + TIMESTAMP_SIZE]);

    Ok(InvalidationEvent {
        kind,
        change: Some(ChangeRecord {
            key,
            timestamp: f64::from_le_bytes(timestamp),
        }),
    })
}

/// Build the 25-byte wire form of a `'C'` record
///
/// Counterpart of [`decode`] for the publisher side of the channel. The
/// timestamp is a direct bit copy, so a decode of the result recovers it
/// bit-identically.
pub fn encode_change(key: &[u8; KEY_SIZE], timestamp: f64) -> [u8; CHANGE_RECORD_SIZE] {
    let mut record = [0u8; CHANGE_RECORD_SIZE];
    record[0] = KIND_CHANGE;
    record[KEY_OFFSET..KEY_OFFSET + KEY_SIZE].copy_from_slice(key);
    record[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + TIMESTAMP_SIZE]
        .copy_from_slice(&timestamp.to_le_bytes());
    record
}
