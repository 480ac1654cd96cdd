/// Record framing
///
/// Strips the optional session marker so the payload starts at the timestamp.

use crate::protocol::SESSION_MARKER;

/// Return the canonical payload of a raw record. Never fails.
#[inline]
pub fn frame(record: &[u8]) -> &[u8] {
    match record.split_first() {
        Some((&SESSION_MARKER, rest)) => rest,
        _ => record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_marker() {
        assert_eq!(frame(b"S28800011AXYZ"), b"28800011AXYZ");
    }

    #[test]
    fn test_unmarked_record_unchanged() {
        assert_eq!(frame(b"28800011AXYZ"), b"28800011AXYZ");
    }

    #[test]
    fn test_only_one_marker_removed() {
        assert_eq!(frame(b"SS1"), b"S1");
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(frame(b""), b"");
        assert_eq!(frame(b"S"), b"");
    }
}
