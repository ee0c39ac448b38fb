//! Just enough JPEG container handling to reach the EXIF metadata.
//!
//! ```text
//! SOI [APP0] [APP1 "Exif\0\0" TIFF] ... SOS <scan data> EOI
//! ```
//!
//! Segments are copied verbatim, only the EXIF APP1 segment is replaced or inserted.

pub mod exif;
pub mod marker;
pub mod segments;

pub use marker::{Marker, END_OF_IMAGE, PADDING, START_OF_IMAGE};
pub use segments::{header_segments, write_segment, Segment, MAX_SEGMENT_PAYLOAD};

use log::debug;

use crate::error::Result;
use crate::media::metadata::ImageMetadata;

fn exif_segment<'s>(jpeg: &[u8], segments: &'s [Segment]) -> Option<&'s Segment> {
    segments
        .iter()
        .find(|s| s.marker == Marker::APP(1) && exif::is_exif(&jpeg[s.payload.clone()]))
}

/// Reads the property items of a JPEG, an image without EXIF has empty metadata.
pub fn read_metadata(jpeg: &[u8]) -> Result<ImageMetadata> {
    let segments = header_segments(jpeg)?;

    match exif_segment(jpeg, &segments) {
        Some(segment) => exif::parse(&jpeg[segment.payload.clone()]),
        None => {
            debug!("no EXIF segment found");
            Ok(ImageMetadata::default())
        }
    }
}

/// Returns a copy of the JPEG carrying the given metadata.
///
/// An existing EXIF segment is replaced in place, otherwise a new one is put
/// right after SOI, or after a leading JFIF APP0 segment.
pub fn write_metadata(jpeg: &[u8], metadata: &ImageMetadata) -> Result<Vec<u8>> {
    let segments = header_segments(jpeg)?;
    let payload = exif::serialize(metadata)?;

    let (keep_until, resume_at) = match exif_segment(jpeg, &segments) {
        Some(segment) => (segment.start, segment.end()),
        None => {
            let after = segments
                .get(1)
                .filter(|s| s.marker == Marker::APP(0))
                .map_or(START_OF_IMAGE.len(), Segment::end);
            (after, after)
        }
    };

    let mut output = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    output.extend_from_slice(&jpeg[..keep_until]);
    write_segment(&mut output, Marker::APP(1), &payload)?;
    output.extend_from_slice(&jpeg[resume_at..]);
    debug!(
        "EXIF segment of {} bytes written at offset {keep_until}",
        payload.len()
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::metadata::{get_comment, set_comment};
    use crate::test_utils::minimal_jpeg;

    #[test]
    fn should_read_empty_metadata_without_exif() {
        let metadata = read_metadata(&minimal_jpeg()).expect("valid jpeg");

        assert!(metadata.is_empty());
        assert_eq!(get_comment(&metadata), None);
    }

    #[test]
    fn should_insert_exif_after_jfif() {
        let jpeg = minimal_jpeg();
        let mut metadata = ImageMetadata::default();
        set_comment(&mut metadata, "Hello World!").unwrap();

        let written = write_metadata(&jpeg, &metadata).expect("writable");
        let segments = header_segments(&written).expect("valid jpeg");

        assert_eq!(segments[1].marker, Marker::APP(0));
        assert_eq!(segments[2].marker, Marker::APP(1));
        assert!(written.ends_with(&jpeg[segments[1].end()..]));
        assert_eq!(
            get_comment(&read_metadata(&written).unwrap()).as_deref(),
            Some("Hello World!")
        );
    }

    #[test]
    fn should_replace_existing_exif() {
        let jpeg = minimal_jpeg();
        let mut metadata = ImageMetadata::default();
        set_comment(&mut metadata, "first").unwrap();
        let once = write_metadata(&jpeg, &metadata).unwrap();

        set_comment(&mut metadata, "second message").unwrap();
        let twice = write_metadata(&once, &metadata).unwrap();

        let app1_count = header_segments(&twice)
            .unwrap()
            .iter()
            .filter(|s| s.marker == Marker::APP(1))
            .count();
        assert_eq!(app1_count, 1);
        assert_eq!(
            get_comment(&read_metadata(&twice).unwrap()).as_deref(),
            Some("second message")
        );
    }

    #[test]
    fn should_insert_after_soi_without_jfif() {
        let jpeg = minimal_jpeg();
        let segments = header_segments(&jpeg).unwrap();
        // drop the APP0 segment
        let mut bare = jpeg[..2].to_vec();
        bare.extend_from_slice(&jpeg[segments[1].end()..]);

        let written = write_metadata(&bare, &ImageMetadata::default()).unwrap();

        assert_eq!(&written[..4], &[0xFF, 0xD8, 0xFF, 0xE1]);
        assert!(written.ends_with(&bare[2..]));
    }
}
