//! # LSB Steganography Implementation
//!
//! Hides text in the least significant bit of a single colour channel.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Pack the message plus the `END` terminator into bits (see [`bitstream`])
//! 2. Check the channel has one pixel per bit; fail before touching anything otherwise
//! 3. Visit pixels row-major and for each remaining bit:
//!    - Clear the LSB of the sample
//!    - Set the LSB to the data bit
//! 4. Leave every pixel past the payload unchanged
//!
//! ### Decoding Process
//! 1. Read the LSB of every pixel in the same row-major order
//! 2. Hand the bits to [`bitstream::decode`], which stops at the terminator
//!
//! ### Capacity
//! A `width × height` channel carries `width × height` bits, i.e.
//! `width × height / 8 - 3` message characters.
//!
//! Example: a 200x200 image can hide 4997 characters.
//!
//! [`bitstream`]: crate::processing::bitstream

use image::RgbImage;
use log::{debug, info};
use rand::Rng;

use crate::error::{Result, StegoError};
use crate::processing::bitstream;
use crate::processing::channel::{BitSequence, Channel, PixelChannel};

/// Embed `bits` into the LSBs of `channel`, one bit per pixel.
///
/// Returns a new channel; the input is not modified.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if there are more bits than pixels.
pub fn embed_bits(channel: &PixelChannel, bits: &BitSequence) -> Result<PixelChannel> {
    let available = channel.capacity_bits();
    if bits.len() > available {
        return Err(StegoError::CapacityExceeded {
            required: bits.len(),
            available,
        });
    }

    let mut data = channel.samples().to_vec();
    for (sample, bit) in data.iter_mut().zip(bits.iter()) {
        *sample = (*sample & 0xFE) | bit;
    }

    debug!("Embedded {} bits into {} pixels", bits.len(), available);
    PixelChannel::new(channel.width(), channel.height(), data)
}

/// Read the LSB of every pixel, row-major.
///
/// Always yields `width × height` bits; finding the end of a message is
/// the bit stream decoder's job.
pub fn extract_bits(channel: &PixelChannel) -> BitSequence {
    channel.samples().iter().map(|&v| v & 1).collect()
}

/// Encode `message` and embed it into `channel`.
///
/// # Errors
/// - [`StegoError::Encoding`] if the message has non-printable characters
/// - [`StegoError::CapacityExceeded`] if the message does not fit
pub fn embed_message(channel: &PixelChannel, message: &str) -> Result<PixelChannel> {
    let bits = bitstream::encode(message)?;
    embed_bits(channel, &bits)
}

/// Extract and decode a hidden message, if one is present.
pub fn extract_message(channel: &PixelChannel) -> Option<String> {
    bitstream::decode(extract_bits(channel).as_slice())
}

/// Hide `text` in one channel of an RGB image.
///
/// The other two channels are copied through unchanged.
///
/// # Example
/// ```ignore
/// let cover = image::open("input.png")?.to_rgb8();
/// let stego = embed_text_in_image(&cover, Channel::Red, "Secret message")?;
/// stego.save("output.png")?;
/// ```
pub fn embed_text_in_image(image: &RgbImage, channel: Channel, text: &str) -> Result<RgbImage> {
    let plane = PixelChannel::from_rgb(image, channel)?;
    let modified = embed_message(&plane, text)?;
    info!(
        "Hid {} characters in the {} channel of a {}x{} image",
        text.chars().count(),
        channel,
        image.width(),
        image.height()
    );
    modified.substitute_into(image, channel)
}

/// Extract text hidden in one channel of an RGB image.
pub fn extract_text_from_image(image: &RgbImage, channel: Channel) -> Result<Option<String>> {
    let plane = PixelChannel::from_rgb(image, channel)?;
    Ok(extract_message(&plane))
}

/// Generate a random cover image with samples uniform in `[min_value, max_value)`.
///
/// Falls back to a single value when the range is empty.
pub fn random_cover<R: Rng>(
    rng: &mut R,
    width: u32,
    height: u32,
    min_value: u8,
    max_value: u8,
) -> RgbImage {
    RgbImage::from_fn(width, height, |_, _| {
        let mut sample = || {
            if min_value < max_value {
                rng.gen_range(min_value..max_value)
            } else {
                min_value
            }
        };
        image::Rgb([sample(), sample(), sample()])
    })
}
