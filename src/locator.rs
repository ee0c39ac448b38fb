//! Binary pattern search over raw container bytes.

/// Returns the offset of the first occurrence of `pattern` inside `buffer`.
///
/// Candidate offsets are checked in ascending order, the comparison is exact
/// and order sensitive. An empty pattern or a pattern longer than the buffer
/// is never found.
///
/// ```rust
/// use stegotext::locator::locate;
///
/// assert_eq!(locate(&[0x00, 0xFF, 0xD9, 0xFF, 0xD9], &[0xFF, 0xD9]), Some(1));
/// assert_eq!(locate(&[0x00, 0xFF], &[0xFF, 0xD9]), None);
/// ```
pub fn locate(buffer: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > buffer.len() {
        return None;
    }

    (0..=buffer.len() - pattern.len()).find(|&offset| {
        pattern
            .iter()
            .enumerate()
            .all(|(i, b)| buffer[offset + i] == *b)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_find_single_occurrence() {
        let buffer = [0x10, 0x20, 0x30, 0x40, 0x50];

        assert_eq!(locate(&buffer, &[0x30, 0x40]), Some(2));
        assert_eq!(locate(&buffer, &[0x10]), Some(0));
        assert_eq!(locate(&buffer, &[0x40, 0x50]), Some(3));
    }

    #[test]
    fn should_report_the_smallest_offset() {
        let buffer = [0xFF, 0xD9, 0x00, 0xFF, 0xD9, 0xFF, 0xD9];

        assert_eq!(locate(&buffer, &[0xFF, 0xD9]), Some(0));
    }

    #[test]
    fn should_handle_overlapping_prefixes() {
        let buffer = [0xFF, 0xFF, 0xFF, 0xD9];

        assert_eq!(locate(&buffer, &[0xFF, 0xD9]), Some(2));
        assert_eq!(locate(&buffer, &[0xFF, 0xFF, 0xD9]), Some(1));
    }

    #[test]
    fn should_not_find_absent_pattern() {
        assert_eq!(locate(&[0xD9, 0xFF], &[0xFF, 0xD9]), None);
        assert_eq!(locate(&[], &[0xFF, 0xD9]), None);
    }

    #[test]
    fn should_not_find_pattern_longer_than_buffer() {
        assert_eq!(locate(&[0xFF], &[0xFF, 0xD9]), None);
    }

    #[test]
    fn should_not_find_empty_pattern() {
        assert_eq!(locate(&[0xFF, 0xD9], &[]), None);
    }

    #[test]
    fn should_match_whole_buffer() {
        assert_eq!(locate(&[0xFF, 0xD9], &[0xFF, 0xD9]), Some(0));
    }
}
