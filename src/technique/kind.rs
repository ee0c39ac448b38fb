use std::fmt;
use std::str::FromStr;

use super::{AlphaChannel, EndOfImage, ExifComment, RgbChannels, Techniques};
use crate::error::StegoError;
use crate::media::CarrierKind;

/// Selects a technique, for example from a configuration value.
///
/// ```rust
/// use stegotext::technique::TechniqueKind;
///
/// let kind: TechniqueKind = "alpha".parse().unwrap();
/// assert_eq!(kind, TechniqueKind::AlphaChannel);
/// assert_eq!(kind.to_string(), "alpha");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechniqueKind {
    /// text behind the JPEG end of image marker
    EndOfImage,
    /// one character per pixel in red, green and blue
    #[default]
    RgbChannels,
    /// one character per pixel in alpha
    AlphaChannel,
    /// text in the EXIF user comment
    ExifComment,
}

impl TechniqueKind {
    pub const ALL: [TechniqueKind; 4] = [
        TechniqueKind::EndOfImage,
        TechniqueKind::RgbChannels,
        TechniqueKind::AlphaChannel,
        TechniqueKind::ExifComment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TechniqueKind::EndOfImage => "eof",
            TechniqueKind::RgbChannels => "rgb",
            TechniqueKind::AlphaChannel => "alpha",
            TechniqueKind::ExifComment => "exif-comment",
        }
    }

    /// The kind of carrier the technique operates on.
    pub fn carrier_kind(self) -> CarrierKind {
        match self {
            TechniqueKind::EndOfImage | TechniqueKind::ExifComment => CarrierKind::Bytes,
            TechniqueKind::RgbChannels | TechniqueKind::AlphaChannel => CarrierKind::Pixels,
        }
    }

    pub fn technique(self) -> Techniques {
        match self {
            TechniqueKind::EndOfImage => EndOfImage.into(),
            TechniqueKind::RgbChannels => RgbChannels.into(),
            TechniqueKind::AlphaChannel => AlphaChannel.into(),
            TechniqueKind::ExifComment => ExifComment.into(),
        }
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TechniqueKind {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TechniqueKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| StegoError::UnknownTechnique(s.to_string()))
    }
}

impl From<TechniqueKind> for Techniques {
    fn from(kind: TechniqueKind) -> Self {
        kind.technique()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::technique::Technique;

    #[test]
    fn should_parse_every_name() {
        for kind in TechniqueKind::ALL {
            assert_eq!(kind.name().parse::<TechniqueKind>().unwrap(), kind);
        }
        assert_eq!(
            " EXIF-Comment ".parse::<TechniqueKind>().unwrap(),
            TechniqueKind::ExifComment
        );
    }

    #[test]
    fn should_reject_unknown_name() {
        assert!(matches!(
            "lsb".parse::<TechniqueKind>(),
            Err(StegoError::UnknownTechnique(name)) if name == "lsb"
        ));
    }

    #[test]
    fn should_build_matching_technique() {
        for kind in TechniqueKind::ALL {
            assert_eq!(kind.technique().kind(), kind);
        }
        assert_eq!(TechniqueKind::default(), TechniqueKind::RgbChannels);
    }
}
