//! # Pixel Channels and Bit Sequences
//!
//! A [`PixelChannel`] is one colour plane of an image flattened into a
//! row-major buffer of `u8` samples: row 0 left-to-right, then row 1, and
//! so on. Every codec and statistic in this crate walks that buffer in the
//! same order, which is what makes embed and extract agree.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, StegoError};

/// Colour channel of an RGB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Red => write!(f, "red"),
            Channel::Green => write!(f, "green"),
            Channel::Blue => write!(f, "blue"),
        }
    }
}

/// Immutable height × width grid of 8-bit samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelChannel {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelChannel {
    /// Build a channel from row-major samples.
    ///
    /// # Errors
    /// - [`StegoError::EmptyChannel`] if either dimension is zero
    /// - [`StegoError::DimensionMismatch`] if `data.len() != width * height`
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StegoError::EmptyChannel);
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(StegoError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A channel where every sample has the same value.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    /// Copy one colour plane out of an RGB image.
    pub fn from_rgb(image: &RgbImage, channel: Channel) -> Result<Self> {
        let (width, height) = image.dimensions();
        let idx = channel.index();
        let data = image.pixels().map(|p| p.0[idx]).collect();
        Self::new(width, height, data)
    }

    /// Return a copy of `image` with this channel substituted for `channel`.
    ///
    /// The other two planes are left untouched.
    pub fn substitute_into(&self, image: &RgbImage, channel: Channel) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        if (width, height) != (self.width, self.height) {
            return Err(StegoError::DimensionMismatch {
                expected: width as usize * height as usize,
                actual: self.data.len(),
            });
        }
        let idx = channel.index();
        let mut output = image.clone();
        for (pixel, &sample) in output.pixels_mut().zip(self.data.iter()) {
            pixel.0[idx] = sample;
        }
        Ok(output)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat row-major samples.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width as usize)
    }

    /// Number of bits that can be hidden: one per pixel.
    pub fn capacity_bits(&self) -> usize {
        self.data.len()
    }
}

/// Ordered sequence of single bits, each stored as `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence(Vec<u8>);

impl BitSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Append a bit. Any non-zero value counts as `1`.
    pub fn push(&mut self, bit: u8) {
        self.0.push(u8::from(bit != 0));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u8> for BitSequence {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().map(|b| u8::from(b != 0)).collect())
    }
}
