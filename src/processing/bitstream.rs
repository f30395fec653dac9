//! # Message Bit Packing
//!
//! Converts message text to and from the bit layout hidden in the carrier:
//!
//! 1. The literal terminator `END` is appended to the message
//! 2. Each character becomes its 8-bit code point, most significant bit first
//! 3. Only printable ASCII (32-126) is representable
//!
//! Decoding has no length prefix. Bytes are read until the first
//! non-printable code point, and the message counts as found only if the
//! text read so far ends with the terminator.

use crate::error::{Result, StegoError};
use crate::processing::channel::BitSequence;

/// Marker appended to every hidden message.
pub const TERMINATOR: &str = "END";

const PRINTABLE: std::ops::RangeInclusive<u8> = 32..=126;

/// Pack `message` followed by [`TERMINATOR`] into bits.
///
/// # Errors
/// [`StegoError::Encoding`] for the first character outside printable ASCII.
pub fn encode(message: &str) -> Result<BitSequence> {
    let mut bits = BitSequence::with_capacity(encoded_len(message));

    for (position, character) in message.chars().chain(TERMINATOR.chars()).enumerate() {
        let code = u32::from(character);
        let byte = u8::try_from(code)
            .ok()
            .filter(|b| PRINTABLE.contains(b))
            .ok_or_else(|| StegoError::Encoding {
                character,
                position,
            })?;

        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }

    Ok(bits)
}

/// Recover a message from a bit stream.
///
/// Returns `None` when the stream ends, or hits a non-printable byte,
/// before the terminator is seen.
pub fn decode(bits: &[u8]) -> Option<String> {
    let mut text = String::new();

    for group in bits.chunks_exact(8) {
        let byte = group.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1));
        if !PRINTABLE.contains(&byte) {
            break;
        }
        text.push(char::from(byte));

        if text.ends_with(TERMINATOR) {
            text.truncate(text.len() - TERMINATOR.len());
            return Some(text);
        }
    }

    None
}

/// Number of bits [`encode`] produces for `message`.
pub fn encoded_len(message: &str) -> usize {
    (message.chars().count() + TERMINATOR.len()) * 8
}

/// Longest message, in characters, that fits in `capacity_bits`.
pub fn max_message_len(capacity_bits: usize) -> usize {
    (capacity_bits / 8).saturating_sub(TERMINATOR.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_msb_first() {
        let bits = encode("A").unwrap();
        // 'A' = 0x41, then "END"
        assert_eq!(&bits.as_slice()[..8], &[0, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(bits.len(), 32);
        assert_eq!(encoded_len("A"), 32);
    }

    #[test]
    fn test_encode_rejects_non_printable() {
        match encode("hi\tthere") {
            Err(StegoError::Encoding {
                character,
                position,
            }) => {
                assert_eq!(character, '\t');
                assert_eq!(position, 2);
            }
            other => panic!("expected encoding error, got {:?}", other),
        }
        assert!(encode("café").is_err());
    }

    #[test]
    fn test_decode_round_trip() {
        let bits = encode("Meet at 9, pier 4!").unwrap();
        assert_eq!(decode(bits.as_slice()), Some("Meet at 9, pier 4!".to_string()));
    }

    #[test]
    fn test_empty_message_is_distinct_from_none() {
        let bits = encode("").unwrap();
        assert_eq!(decode(bits.as_slice()), Some(String::new()));
        assert_eq!(decode(&[]), None);
    }

    #[test]
    fn test_decode_stops_at_non_printable_byte() {
        let mut bits = encode("AB").unwrap().as_slice()[..16].to_vec();
        bits.extend_from_slice(&[0; 8]);
        bits.extend_from_slice(encode("").unwrap().as_slice());
        assert_eq!(decode(&bits), None);
    }

    #[test]
    fn test_decode_ignores_incomplete_trailing_group() {
        let mut bits = encode("ok").unwrap().as_slice().to_vec();
        bits.extend_from_slice(&[1, 1, 1]);
        assert_eq!(decode(&bits), Some("ok".to_string()));
    }

    #[test]
    fn test_decode_without_terminator() {
        let bits = encode("SENDER").unwrap();
        // Only "SEN" survives, no terminator
        assert_eq!(decode(&bits.as_slice()[..24]), None);
        // "SEND" contains the terminator, so decoding stops early
        assert_eq!(decode(&bits.as_slice()[..32]), Some("S".to_string()));
    }

    #[test]
    fn test_max_message_len() {
        assert_eq!(max_message_len(64), 5);
        assert_eq!(max_message_len(20), 0);
        assert_eq!(max_message_len(200 * 200), 4997);
    }
}
