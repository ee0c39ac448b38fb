use image::RgbaImage;
use speculate::speculate;

use stegotext::jpeg::{read_metadata, write_metadata};
use stegotext::media::eof::{read_past_marker, write_past_marker};
use stegotext::media::image::{AlphaChannelCodec, ChannelCodec, RgbChannelCodec};
use stegotext::media::metadata::{get_comment, set_comment, ImageMetadata, USER_COMMENT};
use stegotext::*;

fn tiny_jpeg() -> Vec<u8> {
    vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00,
        0x12, 0x34, 0xFF, 0x00, 0x56, 0xFF, 0xD9,
    ]
}

fn ascii_message(length: usize) -> String {
    (0..length).map(|i| (b' ' + (i % 95) as u8) as char).collect()
}

speculate! {
    describe "locate" {
        it "should find a single occurrence" {
            assert_eq!(locate(&[0x00, 0x11, 0xFF, 0xD9, 0x22], &[0xFF, 0xD9]), Some(2));
        }

        it "should report a missing pattern as None" {
            assert_eq!(locate(&[0xFF, 0x00, 0xD9], &[0xFF, 0xD9]), None);
        }

        it "should return the smallest of multiple offsets" {
            assert_eq!(locate(&[0xFF, 0xD9, 0xFF, 0xD9], &[0xFF, 0xD9]), Some(0));
        }

        it "should never find a pattern longer than the buffer" {
            assert_eq!(locate(&[0xFF], &[0xFF, 0xD9]), None);
            assert_eq!(locate(&[], &[0xFF]), None);
        }
    }

    describe "end of image technique" {
        it "should grow the buffer by the message length" {
            let jpeg = tiny_jpeg();
            let secret = write_past_marker(jpeg.clone(), "HI").unwrap();

            assert_eq!(secret.len(), jpeg.len() + 2);
            assert_eq!(&secret[secret.len() - 2..], b"HI");
            assert_eq!(read_past_marker(&secret).unwrap().as_deref(), Some("HI"));
        }

        it "should fail without end of image marker" {
            let mut jpeg = tiny_jpeg();
            jpeg.truncate(jpeg.len() - 1);

            assert!(matches!(
                write_past_marker(jpeg, "HI"),
                Err(StegoError::MarkerNotFound)
            ));
        }
    }

    describe "rgb channel codec" {
        it "should round trip ascii messages up to 255 characters" {
            for length in [0, 1, 42, 255] {
                let mut img = RgbaImage::new(16, 16);
                let message = ascii_message(length);
                RgbChannelCodec.encode(&mut img, &message).unwrap();

                assert_eq!(RgbChannelCodec.decode(&img).unwrap(), message);
            }
        }

        it "should round trip characters beyond latin1" {
            let mut img = RgbaImage::new(8, 8);
            RgbChannelCodec.encode(&mut img, "\u{1F980} \u{4E16}\u{754C}").unwrap();

            assert_eq!(RgbChannelCodec.decode(&img).unwrap(), "\u{1F980} \u{4E16}\u{754C}");
        }

        it "should refuse 256 characters" {
            let mut img = RgbaImage::new(32, 32);

            assert!(matches!(
                RgbChannelCodec.encode(&mut img, &ascii_message(256)),
                Err(StegoError::PayloadTooLarge { length: 256, max: 255 })
            ));
            assert_eq!(img, RgbaImage::new(32, 32));
        }
    }

    describe "alpha channel codec" {
        it "should round trip ascii messages up to 255 characters" {
            for length in [0, 1, 42, 255] {
                let mut img = RgbaImage::new(16, 16);
                let message = ascii_message(length);
                AlphaChannelCodec.encode(&mut img, &message).unwrap();

                assert_eq!(AlphaChannelCodec.decode(&img).unwrap(), message);
            }
        }

        it "should fail on a header beyond the pixel count" {
            let mut img = RgbaImage::new(2, 2);
            img.get_pixel_mut(0, 0).0[3] = 4;

            assert!(matches!(
                AlphaChannelCodec.decode(&img),
                Err(StegoError::IncompleteMessage)
            ));
        }
    }

    describe "exif user comment" {
        it "should be None without a comment" {
            let metadata = read_metadata(&tiny_jpeg()).unwrap();

            assert!(metadata.get(USER_COMMENT).is_none());
            assert_eq!(get_comment(&metadata), None);
        }

        it "should survive a round trip through the jpeg header" {
            let mut metadata = ImageMetadata::default();
            set_comment(&mut metadata, "meet at noon").unwrap();
            let secret = write_metadata(&tiny_jpeg(), &metadata).unwrap();

            assert!(secret.ends_with(&tiny_jpeg()[20..]));
            assert_eq!(
                get_comment(&read_metadata(&secret).unwrap()).as_deref(),
                Some("meet at noon")
            );
        }
    }

    describe "technique" {
        it "should be selectable by name" {
            for kind in TechniqueKind::ALL {
                assert_eq!(kind.name().parse::<TechniqueKind>().unwrap(), kind);
                assert_eq!(kind.technique().kind(), kind);
            }
            assert!(matches!(
                "lsb".parse::<TechniqueKind>(),
                Err(StegoError::UnknownTechnique(_))
            ));
        }

        it "should hide in a jpeg with both byte techniques" {
            let mut carrier = Carrier::from(tiny_jpeg());
            TechniqueKind::ExifComment.technique().embed(&mut carrier, "one").unwrap();
            TechniqueKind::EndOfImage.technique().embed(&mut carrier, "two").unwrap();

            assert_eq!(
                TechniqueKind::ExifComment.technique().extract(&carrier).unwrap().as_deref(),
                Some("one")
            );
            assert_eq!(
                TechniqueKind::EndOfImage.technique().extract(&carrier).unwrap().as_deref(),
                Some("two")
            );
        }
    }
}
