//! Console rendering for decoded events
//!
//! One line per `'C'` event: the kind character, the key as 32 lowercase hex
//! characters, and the timestamp with exactly three digits after the decimal
//! point. Kinds without a defined payload render nothing.

use crate::constants::KEY_SIZE;
use crate::decoder::InvalidationEvent;

/// Render a key as lowercase hex, no separators (32 chars for 16 bytes).
pub fn format_key(key: &[u8; KEY_SIZE]) -> String {
    hex::encode(key)
}

/// Render a timestamp with exactly three digits after the decimal point.
pub fn format_timestamp(timestamp: f64) -> String {
    format!("{:.3}", timestamp)
}

/// Render one decoded event as a console line
///
/// Returns `Some` only for `'C'` events; other kinds have no defined payload
/// and produce no output.
pub fn render(event: &InvalidationEvent) -> Option<String> {
    let change = event.change.as_ref()?;
    Some(format!(
        "{} {} {}",
        event.kind as char,
        format_key(&change.key),
        format_timestamp(change.timestamp)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{decode, encode_change};

    #[test]
    fn key_renders_as_lowercase_hex() {
        let mut key = [0u8; KEY_SIZE];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = (i as u8) * 0x11; // 0x00, 0x11, ..., 0xFF
        }

        let rendered = format_key(&key);
        assert_eq!(rendered.len(), 32);
        assert_eq!(rendered, "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn timestamp_renders_three_decimals() {
        assert_eq!(format_timestamp(1700000000.1234), "1700000000.123");
        assert_eq!(format_timestamp(0.0), "0.000");
        assert_eq!(format_timestamp(1.0), "1.000");
    }

    #[test]
    fn change_event_renders_one_line() {
        let key = *b"\x00\x11\x22\x33\x44\x55\x66\x77\x88\x99\xaa\xbb\xcc\xdd\xee\xff";
        let event = decode(&encode_change(&key, 1700000000.1234)).unwrap();

        assert_eq!(
            render(&event).unwrap(),
            "C 00112233445566778899aabbccddeeff 1700000000.123"
        );
    }

    #[test]
    fn zero_record_renders_zero_timestamp() {
        let event = decode(&encode_change(&[0u8; KEY_SIZE], 0.0)).unwrap();
        assert_eq!(
            render(&event).unwrap(),
            "C 00000000000000000000000000000000 0.000"
        );
    }

    #[test]
    fn non_change_events_render_nothing() {
        let event = decode(b"Xwhatever").unwrap();
        assert_eq!(render(&event), None);
    }
}
