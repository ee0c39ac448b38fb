//! Walks the marker segments in front of the entropy coded scan data.

use std::ops::Range;

use byteorder::{BigEndian, ByteOrder};

use super::marker::{Marker, PADDING, START_OF_IMAGE};
use crate::error::{Result, StegoError};

/// Largest payload a segment can carry, the length field counts itself.
pub const MAX_SEGMENT_PAYLOAD: usize = u16::MAX as usize - 2;

/// Position of one marker segment inside the JPEG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub marker: Marker,
    /// Offset of the `0xFF` that introduces the marker.
    pub start: usize,
    /// Payload bytes, excluding marker and length field.
    pub payload: Range<usize>,
}

impl Segment {
    /// Offset of the first byte after this segment.
    pub fn end(&self) -> usize {
        self.payload.end
    }
}

fn invalid(reason: impl Into<String>) -> StegoError {
    StegoError::InvalidJpeg {
        reason: reason.into(),
    }
}

/// Lists all segments from SOI up to and including SOS (or EOI).
///
/// The scan data after SOS is not touched, metadata always lives in front of it.
pub fn header_segments(data: &[u8]) -> Result<Vec<Segment>> {
    if !data.starts_with(&START_OF_IMAGE) {
        return Err(invalid("not a JPEG file (missing SOI marker)"));
    }

    let mut segments = vec![Segment {
        marker: Marker::SOI,
        start: 0,
        payload: 2..2,
    }];
    let mut pos = 2;

    loop {
        let start = pos;
        if data.get(pos) != Some(&PADDING) {
            return Err(invalid(format!("expected marker at offset {pos}")));
        }
        while data.get(pos) == Some(&PADDING) {
            pos += 1;
        }
        let marker = data
            .get(pos)
            .copied()
            .and_then(Marker::from_u8)
            .ok_or_else(|| invalid(format!("unexpected end or stuffed byte at offset {pos}")))?;
        pos += 1;

        if !marker.has_length() {
            segments.push(Segment {
                marker,
                start,
                payload: pos..pos,
            });
            if marker == Marker::EOI {
                break;
            }
            continue;
        }

        let length_field = data
            .get(pos..pos + 2)
            .ok_or_else(|| invalid(format!("truncated length of {marker:?} segment")))?;
        let length = BigEndian::read_u16(length_field) as usize;
        if length < 2 {
            return Err(invalid(format!("invalid length {length} of {marker:?} segment")));
        }
        let payload = pos + 2..pos + length;
        if payload.end > data.len() {
            return Err(invalid(format!("{marker:?} segment exceeds the file")));
        }
        pos = payload.end;
        segments.push(Segment {
            marker,
            start,
            payload,
        });

        if marker == Marker::SOS {
            break;
        }
    }

    Ok(segments)
}

/// Writes one complete segment, marker and length field included.
pub fn write_segment(output: &mut Vec<u8>, marker: Marker, payload: &[u8]) -> Result<()> {
    if payload.len() > MAX_SEGMENT_PAYLOAD {
        return Err(StegoError::MetadataTooLarge {
            size: payload.len(),
        });
    }
    let mut length = [0u8; 2];
    BigEndian::write_u16(&mut length, (payload.len() + 2) as u16);

    output.push(PADDING);
    output.push(marker.to_u8());
    output.extend_from_slice(&length);
    output.extend_from_slice(payload);

    Ok(())
}
