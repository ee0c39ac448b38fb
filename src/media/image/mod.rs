//! Text hidden directly in pixel color channels, one character per pixel.
//!
//! Both layouts keep the message length in a single channel of a single
//! pixel, which caps every message at [`MAX_MESSAGE_LEN`] characters. This is
//! a known limitation of the layout and is kept for compatibility with images
//! that were already encoded this way.

mod alpha_codec;
mod rgb_codec;

pub use alpha_codec::AlphaChannelCodec;
pub use rgb_codec::RgbChannelCodec;

use image::RgbaImage;

use crate::error::{Result, StegoError};

/// The length header is one 8 bit channel.
pub const MAX_MESSAGE_LEN: usize = u8::MAX as usize;

/// Channel indices of an `Rgba<u8>` pixel.
pub(crate) const RED: usize = 0;
pub(crate) const GREEN: usize = 1;
pub(crate) const BLUE: usize = 2;
pub(crate) const ALPHA: usize = 3;

/// A pixel layout for text, encoding mutates the image in place.
pub trait ChannelCodec {
    fn encode(&self, carrier: &mut RgbaImage, message: &str) -> Result<()>;
    fn decode(&self, carrier: &RgbaImage) -> Result<String>;
}

/// Row major position of the `index`th pixel.
#[inline]
pub(crate) fn position(index: usize, width: u32) -> (u32, u32) {
    let width = width as usize;
    ((index % width) as u32, (index / width) as u32)
}

pub(crate) fn ensure_header_fits(length: usize) -> Result<()> {
    if length > MAX_MESSAGE_LEN {
        return Err(StegoError::PayloadTooLarge {
            length,
            max: MAX_MESSAGE_LEN,
        });
    }

    Ok(())
}

/// Fails unless the image has at least `required` pixels.
pub(crate) fn ensure_pixels(carrier: &RgbaImage, required: usize) -> Result<()> {
    let (width, height) = carrier.dimensions();
    if width == 0 || height == 0 || (width as usize) * (height as usize) < required {
        return Err(StegoError::ImageTooSmall {
            width,
            height,
            required,
        });
    }

    Ok(())
}
