use image::RgbaImage;
use log::debug;

use super::{ensure_header_fits, ensure_pixels, position, ChannelCodec, BLUE, GREEN, RED};
use crate::error::{Result, StegoError};

/// One character per pixel, its code point spread over red, green and blue.
///
/// The length lives in the blue channel of the bottom right pixel. Characters
/// start at the origin, so that pixel is never available for text.
///
/// ```rust
/// use image::RgbaImage;
/// use stegotext::media::image::{ChannelCodec, RgbChannelCodec};
///
/// let mut carrier = RgbaImage::new(4, 4);
/// RgbChannelCodec.encode(&mut carrier, "Hi").unwrap();
/// assert_eq!(RgbChannelCodec.decode(&carrier).unwrap(), "Hi");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RgbChannelCodec;

impl RgbChannelCodec {
    /// Composes a code point from the three color channels: `((R << 8) + G) << 8) + B`.
    #[inline]
    fn compose(rgb: [u8; 3]) -> u32 {
        (((rgb[0] as u32) << 8) + rgb[1] as u32) << 8 | rgb[2] as u32
    }
}

impl ChannelCodec for RgbChannelCodec {
    fn encode(&self, carrier: &mut RgbaImage, message: &str) -> Result<()> {
        let chars: Vec<char> = message.chars().collect();
        ensure_header_fits(chars.len())?;
        // the header pixel is not part of the character cells
        ensure_pixels(carrier, chars.len() + 1)?;

        let (width, height) = carrier.dimensions();
        carrier.get_pixel_mut(width - 1, height - 1).0[BLUE] = chars.len() as u8;

        for (i, c) in chars.iter().enumerate() {
            let (x, y) = position(i, width);
            let value = *c as u32;
            let pixel = carrier.get_pixel_mut(x, y);
            pixel.0[RED] = (value >> 16) as u8;
            pixel.0[GREEN] = (value >> 8) as u8;
            pixel.0[BLUE] = value as u8;
        }
        debug!("{} characters hidden in the color channels", chars.len());

        Ok(())
    }

    fn decode(&self, carrier: &RgbaImage) -> Result<String> {
        ensure_pixels(carrier, 1)?;

        let (width, height) = carrier.dimensions();
        let length = carrier.get_pixel(width - 1, height - 1).0[BLUE] as usize;
        if length > (width as usize) * (height as usize) {
            return Err(StegoError::IncompleteMessage);
        }
        debug!("length header claims {length} characters");

        (0..length)
            .map(|i| {
                let (x, y) = position(i, width);
                let [r, g, b, _] = carrier.get_pixel(x, y).0;
                let value = Self::compose([r, g, b]);
                char::from_u32(value).ok_or(StegoError::InvalidCharacter { index: i, value })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_5x5_image;

    #[test]
    fn should_store_length_in_blue_of_last_pixel() {
        let mut img = prepare_5x5_image();
        RgbChannelCodec.encode(&mut img, "abc").unwrap();

        let last = img.get_pixel(4, 4);
        assert_eq!(last.0[BLUE], 3);
        // red, green and alpha of the header pixel are untouched
        assert_eq!(last.0[RED], 96);
        assert_eq!(last.0[GREEN], 97);
        assert_eq!(last.0[3], 99);
    }

    #[test]
    fn should_spread_code_point_over_rgb() {
        let mut img = prepare_5x5_image();
        RgbChannelCodec.encode(&mut img, "A\u{1F600}").unwrap();

        assert_eq!(img.get_pixel(0, 0).0, [0x00, 0x00, 0x41, 3]);
        assert_eq!(img.get_pixel(1, 0).0, [0x01, 0xF6, 0x00, 7]);
    }

    #[test]
    fn should_round_trip_any_character() {
        let mut img = prepare_5x5_image();
        let message = "Grüße \u{1F600}!";
        RgbChannelCodec.encode(&mut img, message).unwrap();

        assert_eq!(RgbChannelCodec.decode(&img).unwrap(), message);
    }

    #[test]
    fn should_continue_on_next_row() {
        let mut img = prepare_5x5_image();
        RgbChannelCodec.encode(&mut img, "abcdefg").unwrap();

        assert_eq!(img.get_pixel(0, 1).0[BLUE], b'f');
        assert_eq!(img.get_pixel(1, 1).0[BLUE], b'g');
        assert_eq!(RgbChannelCodec.decode(&img).unwrap(), "abcdefg");
    }

    #[test]
    fn should_refuse_256_characters() {
        let mut img = RgbaImage::new(32, 32);
        let before = img.clone();
        let message = "x".repeat(256);

        assert!(matches!(
            RgbChannelCodec.encode(&mut img, &message),
            Err(StegoError::PayloadTooLarge {
                length: 256,
                max: 255
            })
        ));
        assert_eq!(img, before);
    }

    #[test]
    fn should_accept_255_characters() {
        let mut img = RgbaImage::new(16, 16);
        let message = "y".repeat(255);
        RgbChannelCodec.encode(&mut img, &message).unwrap();

        assert_eq!(RgbChannelCodec.decode(&img).unwrap(), message);
    }

    #[test]
    fn should_keep_header_pixel_out_of_capacity() {
        let mut img = RgbaImage::new(2, 2);

        assert!(RgbChannelCodec.encode(&mut img, "abc").is_ok());
        assert!(matches!(
            RgbChannelCodec.encode(&mut img, "abcd"),
            Err(StegoError::ImageTooSmall {
                width: 2,
                height: 2,
                required: 5
            })
        ));
    }

    #[test]
    fn should_fail_decoding_when_header_exceeds_image() {
        let mut img = RgbaImage::new(3, 2);
        img.get_pixel_mut(2, 1).0[BLUE] = 7;

        assert!(matches!(
            RgbChannelCodec.decode(&img),
            Err(StegoError::IncompleteMessage)
        ));
    }

    #[test]
    fn should_fail_decoding_invalid_code_point() {
        let mut img = RgbaImage::new(3, 3);
        img.get_pixel_mut(2, 2).0[BLUE] = 1;
        // 0x00D800 is a surrogate
        img.get_pixel_mut(0, 0).0 = [0x00, 0xD8, 0x00, 255];

        assert!(matches!(
            RgbChannelCodec.decode(&img),
            Err(StegoError::InvalidCharacter {
                index: 0,
                value: 0xD800
            })
        ));
    }

    #[test]
    fn should_decode_nothing_from_blank_image() {
        assert_eq!(RgbChannelCodec.decode(&RgbaImage::new(3, 3)).unwrap(), "");
    }

    #[test]
    fn should_fail_on_empty_image() {
        assert!(matches!(
            RgbChannelCodec.decode(&RgbaImage::new(0, 0)),
            Err(StegoError::ImageTooSmall { .. })
        ));
    }
}
