//! # Message Hiding
//!
//! Embeds text in, and recovers text from, the least significant bit of a
//! single colour channel.
//!
//! - [`channel`]: pixel channel and bit sequence types
//! - [`bitstream`]: message text to bits and back (`END` terminator)
//! - [`steganography`]: LSB embedding and extraction

pub mod bitstream;
pub mod channel;
pub mod steganography;

// Re-export main functions for convenience
pub use channel::{BitSequence, Channel, PixelChannel};
pub use steganography::{embed_message, embed_text_in_image, extract_message, extract_text_from_image};
