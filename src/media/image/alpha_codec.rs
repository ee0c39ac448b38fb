use image::RgbaImage;
use log::debug;

use super::{ensure_header_fits, ensure_pixels, position, ChannelCodec, ALPHA};
use crate::error::{Result, StegoError};

/// One character per pixel in the alpha channel.
///
/// The length lives in the alpha channel of the origin pixel, characters
/// follow from pixel index 1 onwards. Only code points up to `0xFF` fit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlphaChannelCodec;

impl ChannelCodec for AlphaChannelCodec {
    fn encode(&self, carrier: &mut RgbaImage, message: &str) -> Result<()> {
        let mut bytes = Vec::with_capacity(message.len());
        for (index, character) in message.chars().enumerate() {
            let byte = u8::try_from(character as u32)
                .map_err(|_| StegoError::UnrepresentableCharacter { index, character })?;
            bytes.push(byte);
        }
        ensure_header_fits(bytes.len())?;
        ensure_pixels(carrier, bytes.len() + 1)?;

        let width = carrier.width();
        carrier.get_pixel_mut(0, 0).0[ALPHA] = bytes.len() as u8;
        for (i, byte) in (1..).zip(bytes.iter()) {
            let (x, y) = position(i, width);
            carrier.get_pixel_mut(x, y).0[ALPHA] = *byte;
        }
        debug!("{} characters hidden in the alpha channel", bytes.len());

        Ok(())
    }

    fn decode(&self, carrier: &RgbaImage) -> Result<String> {
        ensure_pixels(carrier, 1)?;

        let (width, height) = carrier.dimensions();
        let length = carrier.get_pixel(0, 0).0[ALPHA] as usize;
        debug!("length header claims {length} characters");

        let mut text = String::with_capacity(length);
        for i in 1..=length {
            let (x, y) = position(i, width);
            if y >= height {
                return Err(StegoError::IncompleteMessage);
            }
            text.push(carrier.get_pixel(x, y).0[ALPHA] as char);
        }

        Ok(text)
    }
}
