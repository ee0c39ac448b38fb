//! EXIF payload of an APP1 segment: `Exif\0\0` followed by a TIFF structure.
//!
//! Only IFD0 and the Exif sub-IFD are read. GPS and interoperability
//! directories as well as the thumbnail directory (IFD1) are dropped when the
//! metadata gets written back.

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use log::debug;

use crate::error::{Result, StegoError};
use crate::media::metadata::{Directory, Endianness, Format, ImageMetadata, PropertyItem};

/// Identifier at the start of an EXIF APP1 payload.
pub const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// IFD0 entry pointing to the Exif sub-IFD.
pub const EXIF_POINTER: u16 = 0x8769;
const GPS_POINTER: u16 = 0x8825;
const INTEROPERABILITY_POINTER: u16 = 0xA005;

const TIFF_MAGIC: u16 = 42;
const TIFF_HEADER_LEN: usize = 8;
const ENTRY_LEN: usize = 12;

pub fn is_exif(payload: &[u8]) -> bool {
    payload.starts_with(EXIF_HEADER)
}

fn invalid(reason: impl Into<String>) -> StegoError {
    StegoError::InvalidMetadata {
        reason: reason.into(),
    }
}

/// Parses an APP1 payload including the `Exif\0\0` identifier.
pub fn parse(payload: &[u8]) -> Result<ImageMetadata> {
    let tiff = payload
        .strip_prefix(EXIF_HEADER)
        .ok_or_else(|| invalid("missing Exif identifier"))?;

    match tiff.get(..2) {
        Some(b"II") => parse_tiff::<LittleEndian>(tiff, Endianness::Little),
        Some(b"MM") => parse_tiff::<BigEndian>(tiff, Endianness::Big),
        _ => Err(invalid("unknown TIFF byte order")),
    }
}

fn u16_at<B: ByteOrder>(tiff: &[u8], pos: usize) -> Result<u16> {
    tiff.get(pos..pos + 2)
        .map(B::read_u16)
        .ok_or_else(|| invalid(format!("offset {pos} out of bounds")))
}

fn u32_at<B: ByteOrder>(tiff: &[u8], pos: usize) -> Result<u32> {
    tiff.get(pos..pos + 4)
        .map(B::read_u32)
        .ok_or_else(|| invalid(format!("offset {pos} out of bounds")))
}

fn parse_tiff<B: ByteOrder>(tiff: &[u8], endianness: Endianness) -> Result<ImageMetadata> {
    if u16_at::<B>(tiff, 2)? != TIFF_MAGIC {
        return Err(invalid("TIFF magic number mismatch"));
    }

    let mut metadata = ImageMetadata::new(endianness);
    let ifd0 = u32_at::<B>(tiff, 4)? as usize;
    let exif_ifd = read_ifd::<B>(tiff, ifd0, Directory::Primary, &mut metadata)?;
    if let Some(offset) = exif_ifd {
        read_ifd::<B>(tiff, offset, Directory::Exif, &mut metadata)?;
    }

    Ok(metadata)
}

/// Reads all entries of one directory, returns the Exif sub-IFD offset if referenced.
fn read_ifd<B: ByteOrder>(
    tiff: &[u8],
    offset: usize,
    directory: Directory,
    metadata: &mut ImageMetadata,
) -> Result<Option<usize>> {
    let count = u16_at::<B>(tiff, offset)? as usize;
    let mut exif_ifd = None;

    for n in 0..count {
        let entry = offset + 2 + n * ENTRY_LEN;
        let tag = u16_at::<B>(tiff, entry)?;
        let raw_format = u16_at::<B>(tiff, entry + 2)?;
        let format = Format::from_u16(raw_format)
            .ok_or_else(|| invalid(format!("unknown format {raw_format} of tag {tag:#06x}")))?;
        let values = u32_at::<B>(tiff, entry + 4)? as usize;
        let size = values
            .checked_mul(format.unit_size())
            .ok_or_else(|| invalid(format!("size overflow of tag {tag:#06x}")))?;

        if tag == EXIF_POINTER && directory == Directory::Primary {
            exif_ifd = Some(u32_at::<B>(tiff, entry + 8)? as usize);
            continue;
        }
        if matches!(tag, EXIF_POINTER | GPS_POINTER | INTEROPERABILITY_POINTER) {
            debug!("skipping sub directory pointer {tag:#06x}");
            continue;
        }

        let at = if size <= 4 {
            entry + 8
        } else {
            u32_at::<B>(tiff, entry + 8)? as usize
        };
        let value = tiff
            .get(at..at + size)
            .ok_or_else(|| invalid(format!("value of tag {tag:#06x} out of bounds")))?;

        metadata.set(PropertyItem {
            tag,
            format,
            value: value.to_vec(),
            directory,
        });
    }

    Ok(exif_ifd)
}

/// Serializes the metadata to an APP1 payload including the `Exif\0\0` identifier.
pub fn serialize(metadata: &ImageMetadata) -> Result<Vec<u8>> {
    match metadata.endianness {
        Endianness::Little => serialize_tiff::<LittleEndian>(metadata, b"II"),
        Endianness::Big => serialize_tiff::<BigEndian>(metadata, b"MM"),
    }
}

struct Entry {
    tag: u16,
    format: Format,
    count: u32,
    value: Vec<u8>,
}

impl From<&PropertyItem> for Entry {
    fn from(item: &PropertyItem) -> Self {
        Self {
            tag: item.tag,
            format: item.format,
            count: item.count(),
            value: item.value.clone(),
        }
    }
}

fn entries_of(metadata: &ImageMetadata, directory: Directory) -> Vec<Entry> {
    metadata
        .items()
        .iter()
        .filter(|item| item.directory == directory)
        .map(Entry::from)
        .collect()
}

fn ifd_len(entries: &[Entry]) -> usize {
    2 + entries.len() * ENTRY_LEN + 4
}

/// Bytes of values that do not fit inline, each padded to an even length.
fn data_area_len(entries: &[Entry]) -> usize {
    entries
        .iter()
        .filter(|e| e.value.len() > 4)
        .map(|e| (e.value.len() + 1) & !1)
        .sum()
}

fn serialize_tiff<B: ByteOrder>(metadata: &ImageMetadata, order: &[u8; 2]) -> Result<Vec<u8>> {
    let mut primary = entries_of(metadata, Directory::Primary);
    let mut exif = entries_of(metadata, Directory::Exif);
    exif.sort_by_key(|e| e.tag);

    let has_exif = !exif.is_empty();
    if has_exif {
        primary.push(Entry {
            tag: EXIF_POINTER,
            format: Format::Long,
            count: 1,
            value: vec![0; 4],
        });
    }
    primary.sort_by_key(|e| e.tag);

    let ifd0_offset = TIFF_HEADER_LEN;
    let exif_offset = ifd0_offset + ifd_len(&primary) + data_area_len(&primary);
    if has_exif {
        if let Some(pointer) = primary.iter_mut().find(|e| e.tag == EXIF_POINTER) {
            B::write_u32(&mut pointer.value, exif_offset as u32);
        }
    }

    let mut out = Vec::with_capacity(EXIF_HEADER.len() + exif_offset + ifd_len(&exif) + data_area_len(&exif));
    out.write_all(EXIF_HEADER)?;
    out.write_all(order)?;
    out.write_u16::<B>(TIFF_MAGIC)?;
    out.write_u32::<B>(ifd0_offset as u32)?;

    write_ifd::<B>(&mut out, &primary, ifd0_offset)?;
    if has_exif {
        write_ifd::<B>(&mut out, &exif, exif_offset)?;
    }
    debug!(
        "serialized {} primary and {} exif entries into {} bytes",
        primary.len(),
        exif.len(),
        out.len()
    );

    Ok(out)
}

/// Writes one directory at `offset` (relative to the TIFF header), its values follow directly.
fn write_ifd<B: ByteOrder>(out: &mut Vec<u8>, entries: &[Entry], offset: usize) -> Result<()> {
    let mut data_offset = offset + ifd_len(entries);

    out.write_u16::<B>(entries.len() as u16)?;
    for entry in entries {
        out.write_u16::<B>(entry.tag)?;
        out.write_u16::<B>(entry.format.to_u16())?;
        out.write_u32::<B>(entry.count)?;
        if entry.value.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..entry.value.len()].copy_from_slice(&entry.value);
            out.write_all(&inline)?;
        } else {
            out.write_u32::<B>(data_offset as u32)?;
            data_offset += (entry.value.len() + 1) & !1;
        }
    }
    // no further directory, IFD1 is not carried over
    out.write_u32::<B>(0)?;

    for entry in entries.iter().filter(|e| e.value.len() > 4) {
        out.write_all(&entry.value)?;
        if entry.value.len() % 2 == 1 {
            out.push(0);
        }
    }

    Ok(())
}
