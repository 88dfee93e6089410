//! Binary vs ASCII detection.
//!
//! Real-world files ignore the nominal rules (binary files starting with
//! "solid", ASCII files without it), so the check is a stack of heuristics
//! applied in a fixed order.

use super::binary::{HEADER_SIZE, PREAMBLE_SIZE};
use crate::types::FACET_STRIDE;

/// Smallest possible binary STL: header, count, and one facet.
pub const MIN_BINARY_SIZE: usize = PREAMBLE_SIZE + FACET_STRIDE;

const SOLID_PREFIX: &[u8; 6] = b"solid ";

/// Returns `true` if the buffer should be decoded as binary STL.
///
/// Anything shorter than [`MIN_BINARY_SIZE`] is treated as ASCII; the text
/// decoder rejects it if it is not STL at all.
pub fn is_binary(bytes: &[u8]) -> bool {
    if bytes.len() < MIN_BINARY_SIZE {
        return false;
    }

    // Binary headers are usually null padded
    if bytes[..HEADER_SIZE].contains(&0) {
        return true;
    }

    // Facet count and first facet almost always contain non-printable bytes
    if bytes[HEADER_SIZE..MIN_BINARY_SIZE].iter().any(|&b| b > 126) {
        return true;
    }

    !bytes.starts_with(SOLID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printable(len: usize) -> Vec<u8> {
        let mut bytes = b"solid ".to_vec();
        bytes.resize(len, b'a');
        bytes
    }

    #[test]
    fn test_short_buffers_are_not_binary() {
        assert!(!is_binary(&[]));
        assert!(!is_binary(&[0u8; 84]));
        assert!(!is_binary(&[0xFFu8; MIN_BINARY_SIZE - 1]));
    }

    #[test]
    fn test_minimum_binary_length() {
        let mut bytes = printable(MIN_BINARY_SIZE);
        bytes[10] = 0;
        assert_eq!(bytes.len(), 130);
        assert!(is_binary(&bytes));

        bytes.pop();
        assert!(!is_binary(&bytes));
    }

    #[test]
    fn test_null_in_header_wins() {
        let mut bytes = printable(200);
        bytes[40] = 0;
        assert!(is_binary(&bytes));
    }

    #[test]
    fn test_high_bytes_after_header() {
        let mut bytes = printable(200);
        bytes[100] = 200;
        assert!(is_binary(&bytes));

        // Bytes past the first facet are not inspected
        let mut bytes = printable(200);
        bytes[150] = 200;
        assert!(!is_binary(&bytes));
    }

    #[test]
    fn test_solid_prefix_fallback() {
        assert!(!is_binary(&printable(200)));

        let mut bytes = printable(200);
        bytes[5] = b'\n';
        assert!(is_binary(&bytes));

        let mut bytes = printable(200);
        bytes[..6].copy_from_slice(b"SOLID ");
        assert!(is_binary(&bytes));
    }

    #[test]
    fn test_deterministic() {
        let bytes = printable(300);
        assert_eq!(is_binary(&bytes), is_binary(&bytes.clone()));
    }
}
