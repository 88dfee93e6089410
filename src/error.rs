//! Error types for STL import.

use thiserror::Error;

/// Result type alias using StlError.
pub type Result<T> = std::result::Result<T, StlError>;

/// Main error type for STL decoding and import.
///
/// Only unrecoverable conditions live here. Lenient cases (trailing bytes after
/// the last binary facet, a garbled ASCII body) are reported through
/// [`Diagnostics`](crate::diagnostics::Diagnostics) instead.
#[derive(Error, Debug)]
pub enum StlError {
    /// The binary header claims more facets than the buffer can hold.
    #[error("Corrupt binary STL: header declares {declared} facets but only {available} fit in the file")]
    TruncatedBinary { declared: u32, available: u32 },

    /// The buffer is shorter than the 80-byte header plus facet count.
    #[error("Binary STL too short: {len} bytes, need at least 84")]
    BinaryTooShort { len: usize },

    /// ASCII input did not begin with the `solid` keyword.
    #[error("ASCII STL is missing the leading 'solid' keyword")]
    MissingSolidHeader,

    /// Failed to parse an import configuration.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading an STL file from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
