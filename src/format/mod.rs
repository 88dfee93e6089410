//! STL wire formats.
//!
//! [`sniff`] decides which decoder a buffer goes to, [`binary`] and [`ascii`]
//! turn bytes into [`Facet`](crate::types::Facet)s and back.

pub mod ascii;
pub mod binary;
pub mod sniff;

pub use ascii::{decode_ascii, encode_ascii, AsciiSolid};
pub use binary::{decode_binary, encode_binary};
pub use sniff::is_binary;

use serde::{Deserialize, Serialize};

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    Binary,
    Ascii,
}

impl StlFormat {
    /// Classify a buffer with [`is_binary`].
    pub fn detect(bytes: &[u8]) -> Self {
        if is_binary(bytes) {
            StlFormat::Binary
        } else {
            StlFormat::Ascii
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StlFormat::Binary => "binary",
            StlFormat::Ascii => "ascii",
        }
    }
}

impl std::fmt::Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
