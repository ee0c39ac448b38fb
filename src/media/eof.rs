//! Hides text behind the end of image marker of a JPEG.
//!
//! Decoders stop at `0xFF 0xD9`, whatever follows is invisible to them.

use log::debug;

use crate::error::{Result, StegoError};
use crate::jpeg::END_OF_IMAGE;
use crate::locator::locate;
use crate::text::{ascii_bytes, ascii_lossy};

/// Writes the ASCII message right after the first end of image marker.
///
/// The buffer grows by exactly the message length. Bytes up to and including
/// the marker stay untouched, bytes that trailed the marker are lost.
///
/// ```rust
/// use stegotext::media::eof::write_past_marker;
///
/// let jpeg = vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9];
/// let secret = write_past_marker(jpeg, "HI").unwrap();
/// assert_eq!(secret, vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9, b'H', b'I']);
/// ```
pub fn write_past_marker(mut buffer: Vec<u8>, message: &str) -> Result<Vec<u8>> {
    embed_past_marker(&mut buffer, message)?;

    Ok(buffer)
}

/// In place variant of [`write_past_marker`], the buffer is untouched on error.
pub fn embed_past_marker(buffer: &mut Vec<u8>, message: &str) -> Result<()> {
    let message = ascii_bytes(message)?;
    let marker = locate(buffer, &END_OF_IMAGE).ok_or(StegoError::MarkerNotFound)?;

    let original_len = buffer.len();
    let insert_at = marker + END_OF_IMAGE.len();
    buffer.resize(original_len + message.len(), 0);
    buffer[insert_at..insert_at + message.len()].copy_from_slice(&message);
    buffer[insert_at + message.len()..].fill(0);
    debug!(
        "{} bytes written after the end of image marker at offset {marker}",
        message.len()
    );

    Ok(())
}

/// Reads the text behind the first end of image marker, `None` if there is nothing.
///
/// Trailing NUL bytes are taken as zero padding and stripped, so NULs at the
/// end of the written message do not come back.
pub fn read_past_marker(buffer: &[u8]) -> Result<Option<String>> {
    let marker = locate(buffer, &END_OF_IMAGE).ok_or(StegoError::MarkerNotFound)?;
    let trailer = &buffer[marker + END_OF_IMAGE.len()..];
    let end = trailer.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);

    if end == 0 {
        return Ok(None);
    }
    debug!("{end} bytes found after the end of image marker at offset {marker}");

    Ok(Some(ascii_lossy(&trailer[..end])))
}
