//! Image metadata as a list of property items, and the user comment codec on top of it.
//!
//! The property items mirror the EXIF entries of the primary image directory
//! and its Exif sub-directory. The raw value bytes are kept in the byte order
//! of the container they were read from, see [`Endianness`].

use log::debug;

use crate::error::Result;
use crate::text::{ascii_bytes, ascii_lossy};

/// EXIF `UserComment`, the field used to carry the hidden message.
pub const USER_COMMENT: u16 = 0x9286;

/// Character code prefix of a `UserComment` written by cameras.
const ASCII_CHARACTER_CODE: &[u8; 8] = b"ASCII\0\0\0";

/// Byte order of multi byte values, `II` and `MM` in TIFF terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// The image file directory a property item belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directory {
    /// IFD0, describing the primary image.
    Primary,
    /// The Exif sub-IFD referenced from IFD0 by tag `0x8769`.
    Exif,
}

/// EXIF value formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
}

impl Format {
    pub fn from_u16(n: u16) -> Option<Format> {
        use Format::*;
        match n {
            1 => Some(Byte),
            2 => Some(Ascii),
            3 => Some(Short),
            4 => Some(Long),
            5 => Some(Rational),
            6 => Some(SByte),
            7 => Some(Undefined),
            8 => Some(SShort),
            9 => Some(SLong),
            10 => Some(SRational),
            11 => Some(Float),
            12 => Some(Double),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        use Format::*;
        match self {
            Byte => 1,
            Ascii => 2,
            Short => 3,
            Long => 4,
            Rational => 5,
            SByte => 6,
            Undefined => 7,
            SShort => 8,
            SLong => 9,
            SRational => 10,
            Float => 11,
            Double => 12,
        }
    }

    /// Size in bytes of one value of this format.
    pub fn unit_size(self) -> usize {
        use Format::*;
        match self {
            Byte | Ascii | SByte | Undefined => 1,
            Short | SShort => 2,
            Long | SLong | Float => 4,
            Rational | SRational | Double => 8,
        }
    }
}

/// One metadata field, identified by its numeric tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyItem {
    pub tag: u16,
    pub format: Format,
    /// raw value bytes, always a multiple of the format unit size
    pub value: Vec<u8>,
    pub directory: Directory,
}

impl PropertyItem {
    /// Number of values of `format` held by this item.
    pub fn count(&self) -> u32 {
        (self.value.len() / self.format.unit_size()) as u32
    }
}

/// All property items of an image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    pub endianness: Endianness,
    items: Vec<PropertyItem>,
}

impl ImageMetadata {
    pub fn new(endianness: Endianness) -> Self {
        Self {
            endianness,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[PropertyItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, tag: u16) -> Option<&PropertyItem> {
        self.items.iter().find(|item| item.tag == tag)
    }

    /// Inserts the item, replacing an existing one with the same tag.
    pub fn set(&mut self, item: PropertyItem) {
        match self.items.iter_mut().find(|i| i.tag == item.tag) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
}

/// Reads the hidden message from the user comment.
///
/// A missing comment is a normal outcome and results in `None`.
pub fn get_comment(metadata: &ImageMetadata) -> Option<String> {
    let item = metadata.get(USER_COMMENT)?;
    let mut raw = item.value.as_slice();
    if let Some(text) = raw.strip_prefix(ASCII_CHARACTER_CODE) {
        raw = text;
    }
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    debug!("user comment of {} bytes found", item.value.len());

    Some(ascii_lossy(&raw[..end]))
}

/// Stores the message as raw ASCII bytes in the user comment, creating it if absent.
pub fn set_comment(metadata: &mut ImageMetadata, message: &str) -> Result<()> {
    let value = ascii_bytes(message)?;
    debug!("setting user comment of {} bytes", value.len());
    metadata.set(PropertyItem {
        tag: USER_COMMENT,
        format: Format::Undefined,
        value,
        directory: Directory::Exif,
    });

    Ok(())
}
