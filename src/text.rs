//! ASCII conversion between messages and raw bytes.

use log::warn;

use crate::error::{Result, StegoError};

/// Substitute for bytes outside of the ASCII range when decoding.
pub const REPLACEMENT: char = '?';

/// Converts a message into its ASCII bytes, refusing anything outside of ASCII.
pub fn ascii_bytes(message: &str) -> Result<Vec<u8>> {
    if let Some(index) = message.chars().position(|c| !c.is_ascii()) {
        return Err(StegoError::NonAsciiPayload { index });
    }

    Ok(message.as_bytes().to_vec())
}

/// Interprets raw bytes as ASCII text, bytes above `0x7F` turn into [`REPLACEMENT`].
pub fn ascii_lossy(bytes: &[u8]) -> String {
    let mut replaced = 0;
    let text = bytes
        .iter()
        .map(|&b| {
            if b.is_ascii() {
                b as char
            } else {
                replaced += 1;
                REPLACEMENT
            }
        })
        .collect();

    if replaced > 0 {
        warn!("{replaced} non ASCII bytes replaced while decoding text");
    }

    text
}
