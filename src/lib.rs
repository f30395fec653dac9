//! # LSB Detector
//!
//! Hide text in the least significant bit of one colour channel, get it
//! back out, and score images for signs of an LSB payload even when no
//! readable message is present.
//!
//! ```rust,ignore
//! use lsb_detector::{LsbDetector, PixelChannel, embed_message};
//!
//! let cover = PixelChannel::filled(200, 200, 128)?;
//! let stego = embed_message(&cover, "HELLO")?;
//! let verdict = LsbDetector::new().analyze(&stego);
//! assert_eq!(verdict.message.as_deref(), Some("HELLO"));
//! ```

pub mod analysis;
pub mod common;
pub mod detector;
pub mod error;
pub mod processing;
pub mod utils;

pub use detector::{DetectionStatus, LsbDetector, SuspicionVerdict};
pub use error::{Result, StegoError};
pub use processing::{embed_message, extract_message, BitSequence, Channel, PixelChannel};
