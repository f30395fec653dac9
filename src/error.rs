//! # Error Types
//!
//! [`StegoError`] covers every failure the core can report: message
//! characters that cannot be represented, payloads that do not fit in the
//! carrier channel, malformed pixel grids, and the image collaborator
//! boundary.
//!
//! Finding no hidden message is *not* an error; it is the `None` outcome of
//! [`decode`](crate::processing::bitstream::decode).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// A message character falls outside printable ASCII (32-126).
    #[error("character {character:?} at position {position} is outside printable ASCII (32-126)")]
    Encoding { character: char, position: usize },

    /// The encoded message needs more bits than the channel has pixels.
    #[error("message too long: need {required} bits but only {available} pixels are available")]
    CapacityExceeded { required: usize, available: usize },

    #[error("pixel channel must have non-zero width and height")]
    EmptyChannel,

    #[error("pixel data has {actual} samples, expected {expected} for the given dimensions")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, StegoError>;
