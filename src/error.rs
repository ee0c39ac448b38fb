use thiserror::Error;

use crate::media::CarrierKind;
use crate::technique::TechniqueKind;

/// Result type alias used all over the crate.
pub type Result<T> = std::result::Result<T, StegoError>;

#[derive(Error, Debug)]
pub enum StegoError {
    /// The end of image marker `0xFF 0xD9` was not found, the JPEG is presumed broken
    #[error("Broken JPEG: end of image marker not found")]
    MarkerNotFound,

    /// The message does not fit into the one byte length header
    #[error("Message of {length} characters exceeds the maximum of {max} characters")]
    PayloadTooLarge { length: usize, max: usize },

    /// The carrier image has not enough pixels for the message and its header
    #[error(
        "Capacity Error: The image with the dimensions {width}x{height} is too small, {required} pixels are required"
    )]
    ImageTooSmall {
        width: u32,
        height: u32,
        required: usize,
    },

    /// The length header points beyond the last pixel of the image
    #[error("Image does not contain the full message")]
    IncompleteMessage,

    /// A decoded channel value is no valid unicode scalar value
    #[error("Invalid character value {value:#08x} at position {index}")]
    InvalidCharacter { index: usize, value: u32 },

    /// A character can not be represented by the channel layout
    #[error("Character {character:?} at position {index} does not fit into the color channel")]
    UnrepresentableCharacter { index: usize, character: char },

    /// Only ASCII text can be written to raw bytes
    #[error("Non ASCII character at position {index}")]
    NonAsciiPayload { index: usize },

    /// Represents a JPEG that could not be walked segment by segment
    #[error("Invalid JPEG: {reason}")]
    InvalidJpeg { reason: String },

    /// Represents broken EXIF data inside an APP1 segment
    #[error("Invalid metadata: {reason}")]
    InvalidMetadata { reason: String },

    /// EXIF data must fit into a single APP1 segment
    #[error("Metadata of {size} bytes does not fit into a single JPEG segment")]
    MetadataTooLarge { size: usize },

    /// The technique does not work on the given carrier, e.g. alpha channel on raw JPEG bytes
    #[error("{technique} requires {expected} as carrier")]
    UnsupportedCarrier {
        technique: TechniqueKind,
        expected: CarrierKind,
    },

    /// Represents an unknown technique name, for example from a config value
    #[error("Unknown technique: {0}")]
    UnknownTechnique(String),

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target folder set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}
