use std::fmt;

pub use image::RgbaImage;

/// a container carrying a hidden message
#[derive(Debug, Clone, PartialEq)]
pub enum Carrier {
    /// raw JPEG file content
    Jpeg(Vec<u8>),
    /// decoded pixels
    Image(RgbaImage),
}

/// What a technique needs to work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    Bytes,
    Pixels,
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarrierKind::Bytes => write!(f, "raw JPEG bytes"),
            CarrierKind::Pixels => write!(f, "decoded pixel image"),
        }
    }
}

impl From<Vec<u8>> for Carrier {
    fn from(bytes: Vec<u8>) -> Self {
        Carrier::Jpeg(bytes)
    }
}

impl From<RgbaImage> for Carrier {
    fn from(img: RgbaImage) -> Self {
        Carrier::Image(img)
    }
}
