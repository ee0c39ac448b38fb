//! JPEG marker definitions (ITU T.81 Table B.1), reduced to what the
//! container walk needs.

/// Every marker is introduced by this byte, it may also repeat as fill byte.
pub const PADDING: u8 = 0xFF;

/// The two bytes closing every JPEG stream.
pub const END_OF_IMAGE: [u8; 2] = [PADDING, 0xD9];

/// The two bytes opening every JPEG stream.
pub const START_OF_IMAGE: [u8; 2] = [PADDING, 0xD8];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Marker {
    /// Start of Image.
    SOI,
    /// End of Image.
    EOI,
    /// Start of Scan, entropy coded data follows.
    SOS,
    /// Restart marker (0-7).
    RST(u8),
    /// Temporary marker for arithmetic coding.
    TEM,
    /// Application segment (0-15), APP1 carries EXIF.
    APP(u8),
    /// Any other marker with a length field, kept as raw byte.
    Other(u8),
}

impl Marker {
    /// Returns true if this marker has a length field following it.
    pub fn has_length(self) -> bool {
        !matches!(
            self,
            Marker::RST(..) | Marker::SOI | Marker::EOI | Marker::TEM
        )
    }

    /// Convert a byte to a Marker.
    ///
    /// Returns None for 0x00 (stuffed byte) and 0xFF (fill byte).
    pub fn from_u8(n: u8) -> Option<Marker> {
        use Marker::*;
        match n {
            0x00 | 0xFF => None,
            0x01 => Some(TEM),
            0xD0..=0xD7 => Some(RST(n - 0xD0)),
            0xD8 => Some(SOI),
            0xD9 => Some(EOI),
            0xDA => Some(SOS),
            0xE0..=0xEF => Some(APP(n - 0xE0)),
            n => Some(Other(n)),
        }
    }

    /// Convert marker back to its byte representation.
    pub fn to_u8(self) -> u8 {
        use Marker::*;
        match self {
            TEM => 0x01,
            RST(n) => 0xD0 + n,
            SOI => 0xD8,
            EOI => 0xD9,
            SOS => 0xDA,
            APP(n) => 0xE0 + n,
            Other(n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_bytes_back_and_forth() {
        for n in 0x01..=0xFEu8 {
            let marker = Marker::from_u8(n).expect("marker byte");
            assert_eq!(marker.to_u8(), n, "marker {marker:?}");
        }
    }

    #[test]
    fn should_not_map_stuffed_and_fill_bytes() {
        assert_eq!(Marker::from_u8(0x00), None);
        assert_eq!(Marker::from_u8(PADDING), None);
    }

    #[test]
    fn should_know_standalone_markers() {
        assert!(!Marker::SOI.has_length());
        assert!(!Marker::EOI.has_length());
        assert!(!Marker::RST(3).has_length());
        assert!(Marker::APP(1).has_length());
        assert!(Marker::SOS.has_length());
        assert_eq!(END_OF_IMAGE, [0xFF, Marker::EOI.to_u8()]);
    }
}
