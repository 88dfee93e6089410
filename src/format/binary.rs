//! Binary STL decoding and encoding.
//!
//! ```text
//! UINT8[80]    header (ignored on decode)
//! UINT32       facet count, little endian
//! foreach facet
//!     REAL32[3]  normal
//!     REAL32[3]  vertex 1
//!     REAL32[3]  vertex 2
//!     REAL32[3]  vertex 3
//!     UINT16     attribute byte count (ignored, written as zero)
//! ```

use crate::diagnostics::{Diagnostics, ImportWarning};
use crate::error::{Result, StlError};
use crate::types::{Facet, FACET_SIZE, FACET_STRIDE};

/// Size of the free-form header.
pub const HEADER_SIZE: usize = 80;

/// Header plus the facet count.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Header written by [`encode_binary`]. The leading null byte makes the
/// output classify as binary no matter what follows.
pub const ENCODED_HEADER: [u8; HEADER_SIZE] = encoded_header();

const SIGNATURE: &[u8] = b"stl-import canonical binary";

const fn encoded_header() -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let mut i = 0;
    while i < SIGNATURE.len() {
        header[i + 1] = SIGNATURE[i];
        i += 1;
    }
    header
}

/// Read the facet count stored at offset 80.
pub fn declared_facet_count(bytes: &[u8]) -> Result<u32> {
    if bytes.len() < PREAMBLE_SIZE {
        return Err(StlError::BinaryTooShort { len: bytes.len() });
    }
    Ok(u32::from_le_bytes([
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ]))
}

/// Decode a binary STL buffer into facets.
///
/// A header count larger than the buffer can hold is fatal. A smaller one is
/// reported as [`ImportWarning::FacetCountMismatch`]. Either way exactly
/// `min(declared, calculated)` facets are decoded, so trailing padding is
/// skipped.
pub fn decode_binary(bytes: &[u8], diagnostics: &dyn Diagnostics) -> Result<Vec<Facet>> {
    let declared = declared_facet_count(bytes)?;
    let calculated = ((bytes.len() - PREAMBLE_SIZE) / FACET_STRIDE).min(u32::MAX as usize) as u32;

    if declared > calculated {
        return Err(StlError::TruncatedBinary {
            declared,
            available: calculated,
        });
    }
    if declared < calculated {
        diagnostics.warn(ImportWarning::FacetCountMismatch { declared, calculated });
    }

    let count = declared.min(calculated) as usize;
    let body = &bytes[PREAMBLE_SIZE..PREAMBLE_SIZE + count * FACET_STRIDE];

    tracing::debug!("decoding {} binary facets", count);

    let facets = body
        .chunks_exact(FACET_STRIDE)
        .map(|record| read_facet(&record[..FACET_SIZE]))
        .collect();

    Ok(facets)
}

/// Encode facets as binary STL with the fixed [`ENCODED_HEADER`].
///
/// `decode_binary(&encode_binary(f))` returns `f` bit for bit.
pub fn encode_binary(facets: &[Facet]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(PREAMBLE_SIZE + facets.len() * FACET_STRIDE);

    buf.extend_from_slice(&ENCODED_HEADER);
    buf.extend_from_slice(&(facets.len() as u32).to_le_bytes());

    for facet in facets {
        for value in facet.to_array() {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    buf
}

fn read_facet(record: &[u8]) -> Facet {
    let mut values = [0.0f32; 12];
    for (value, raw) in values.iter_mut().zip(record.chunks_exact(4)) {
        *value = f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    }
    Facet::from_array(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::format::sniff::is_binary;

    fn sample_facets() -> Vec<Facet> {
        vec![
            Facet::new(
                [0.0, 0.0, 1.0],
                [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            ),
            Facet::new(
                [0.25, -0.5, 0.75],
                [[-1.5, 2.25, 1e-7], [3.0e8, -0.0, 42.0], [0.1, 0.2, 0.3]],
            ),
        ]
    }

    #[test]
    fn test_round_trip() {
        let facets = sample_facets();
        let diagnostics = CollectingDiagnostics::new();
        let decoded = decode_binary(&encode_binary(&facets), &diagnostics).unwrap();
        assert_eq!(decoded, facets);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_encoded_layout() {
        let bytes = encode_binary(&sample_facets());
        assert_eq!(bytes.len(), PREAMBLE_SIZE + 2 * FACET_STRIDE);
        assert_eq!(bytes[0], 0);
        assert!(bytes[1..HEADER_SIZE].iter().any(|&b| b != 0));
        assert_eq!(&bytes[HEADER_SIZE..PREAMBLE_SIZE], &2u32.to_le_bytes());
        // Attribute bytes of the first facet
        assert_eq!(&bytes[PREAMBLE_SIZE + 48..PREAMBLE_SIZE + 50], &[0, 0]);
        // Second facet starts on the 50-byte stride
        assert_eq!(
            &bytes[PREAMBLE_SIZE + 50..PREAMBLE_SIZE + 54],
            &0.25f32.to_le_bytes()
        );
        assert!(is_binary(&bytes));
    }

    #[test]
    fn test_empty_round_trip() {
        let bytes = encode_binary(&[]);
        assert_eq!(bytes.len(), PREAMBLE_SIZE);
        let decoded = decode_binary(&bytes, &CollectingDiagnostics::new()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_declared_less_than_calculated() {
        let mut bytes = encode_binary(&sample_facets());
        bytes[HEADER_SIZE..PREAMBLE_SIZE].copy_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&[0xAB; 60]);

        let diagnostics = CollectingDiagnostics::new();
        let decoded = decode_binary(&bytes, &diagnostics).unwrap();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0], sample_facets()[0]);
        assert_eq!(
            diagnostics.warnings(),
            vec![ImportWarning::FacetCountMismatch { declared: 1, calculated: 3 }]
        );
    }

    #[test]
    fn test_declared_more_than_calculated() {
        let mut bytes = encode_binary(&sample_facets());
        bytes[HEADER_SIZE..PREAMBLE_SIZE].copy_from_slice(&3u32.to_le_bytes());

        let diagnostics = CollectingDiagnostics::new();
        let err = decode_binary(&bytes, &diagnostics).unwrap_err();
        assert!(matches!(
            err,
            StlError::TruncatedBinary { declared: 3, available: 2 }
        ));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_partial_trailing_facet_ignored() {
        let mut bytes = encode_binary(&sample_facets());
        bytes.extend_from_slice(&[1u8; FACET_STRIDE - 1]);
        let diagnostics = CollectingDiagnostics::new();
        let decoded = decode_binary(&bytes, &diagnostics).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_too_short() {
        let err = decode_binary(&[0u8; 40], &CollectingDiagnostics::new()).unwrap_err();
        assert!(matches!(err, StlError::BinaryTooShort { len: 40 }));
    }
}
