//! All hiding techniques behind one capability.
//!
//! ```rust
//! use image::RgbaImage;
//! use stegotext::media::Carrier;
//! use stegotext::technique::{Technique, TechniqueKind};
//!
//! let technique = TechniqueKind::AlphaChannel.technique();
//! let mut carrier = Carrier::from(RgbaImage::new(8, 8));
//!
//! technique.embed(&mut carrier, "Hello World!").unwrap();
//! assert_eq!(technique.extract(&carrier).unwrap().as_deref(), Some("Hello World!"));
//! ```

mod kind;

pub use kind::TechniqueKind;

use enum_dispatch::enum_dispatch;

use crate::error::{Result, StegoError};
use crate::jpeg::{read_metadata, write_metadata};
use crate::media::eof::{embed_past_marker, read_past_marker};
use crate::media::image::{AlphaChannelCodec, ChannelCodec, RgbChannelCodec};
use crate::media::metadata::{get_comment, set_comment};
use crate::media::Carrier;

#[enum_dispatch]
pub trait Technique {
    fn kind(&self) -> TechniqueKind;

    /// Hides the message in the carrier, the carrier is unchanged on error.
    fn embed(&self, carrier: &mut Carrier, message: &str) -> Result<()>;

    /// Unveils the hidden message, `None` when there is nothing hidden.
    fn extract(&self, carrier: &Carrier) -> Result<Option<String>>;
}

#[enum_dispatch(Technique)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Techniques {
    EndOfImage(EndOfImage),
    RgbChannels(RgbChannels),
    AlphaChannel(AlphaChannel),
    ExifComment(ExifComment),
}

fn unsupported(kind: TechniqueKind) -> StegoError {
    StegoError::UnsupportedCarrier {
        technique: kind,
        expected: kind.carrier_kind(),
    }
}

fn non_empty(text: String) -> Option<String> {
    Some(text).filter(|t| !t.is_empty())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EndOfImage;

impl Technique for EndOfImage {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::EndOfImage
    }

    fn embed(&self, carrier: &mut Carrier, message: &str) -> Result<()> {
        match carrier {
            Carrier::Jpeg(bytes) => embed_past_marker(bytes, message),
            Carrier::Image(_) => Err(unsupported(self.kind())),
        }
    }

    fn extract(&self, carrier: &Carrier) -> Result<Option<String>> {
        match carrier {
            Carrier::Jpeg(bytes) => read_past_marker(bytes),
            Carrier::Image(_) => Err(unsupported(self.kind())),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RgbChannels;

impl Technique for RgbChannels {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::RgbChannels
    }

    fn embed(&self, carrier: &mut Carrier, message: &str) -> Result<()> {
        match carrier {
            Carrier::Image(img) => RgbChannelCodec.encode(img, message),
            Carrier::Jpeg(_) => Err(unsupported(self.kind())),
        }
    }

    fn extract(&self, carrier: &Carrier) -> Result<Option<String>> {
        match carrier {
            Carrier::Image(img) => RgbChannelCodec.decode(img).map(non_empty),
            Carrier::Jpeg(_) => Err(unsupported(self.kind())),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlphaChannel;

impl Technique for AlphaChannel {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::AlphaChannel
    }

    fn embed(&self, carrier: &mut Carrier, message: &str) -> Result<()> {
        match carrier {
            Carrier::Image(img) => AlphaChannelCodec.encode(img, message),
            Carrier::Jpeg(_) => Err(unsupported(self.kind())),
        }
    }

    fn extract(&self, carrier: &Carrier) -> Result<Option<String>> {
        match carrier {
            Carrier::Image(img) => AlphaChannelCodec.decode(img).map(non_empty),
            Carrier::Jpeg(_) => Err(unsupported(self.kind())),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExifComment;

impl Technique for ExifComment {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::ExifComment
    }

    fn embed(&self, carrier: &mut Carrier, message: &str) -> Result<()> {
        match carrier {
            Carrier::Jpeg(bytes) => {
                let mut metadata = read_metadata(bytes)?;
                set_comment(&mut metadata, message)?;
                *bytes = write_metadata(bytes, &metadata)?;
                Ok(())
            }
            Carrier::Image(_) => Err(unsupported(self.kind())),
        }
    }

    fn extract(&self, carrier: &Carrier) -> Result<Option<String>> {
        match carrier {
            Carrier::Jpeg(bytes) => Ok(get_comment(&read_metadata(bytes)?)),
            Carrier::Image(_) => Err(unsupported(self.kind())),
        }
    }
}
