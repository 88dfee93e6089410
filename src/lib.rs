//! # STL Import
//!
//! A Rust library for turning STL files into render-ready mesh buffers.
//!
//! ## Overview
//!
//! This library takes the bytes of one `.stl` file (binary or ASCII) and
//! produces vertex, normal and index buffers in a left-handed, Y-up space,
//! together with a content hash that identifies the model.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stl_import::{import_stl, Importer, ImportConfig};
//!
//! let bytes = std::fs::read("benchy.stl")?;
//!
//! // Default pipeline: centered mesh, warnings logged through `tracing`
//! let model = import_stl(&bytes)?;
//! println!("{} triangles, hash {}", model.mesh.triangle_count(), model.hash);
//!
//! // Keep the original placement
//! let importer = Importer::with_config(ImportConfig::default().with_centering(false));
//! let model = importer.import(&bytes)?;
//! ```
//!
//! ## Lower-level pieces
//!
//! The stages can be used on their own:
//!
//! ```ignore
//! use stl_import::{is_binary, decode_binary, build_mesh, ContentHash, TracingDiagnostics};
//!
//! if is_binary(&bytes) {
//!     let facets = decode_binary(&bytes, &TracingDiagnostics)?;
//!     let mesh = build_mesh(&facets, true);
//!     let hash = ContentHash::of(&bytes);
//! }
//! ```

pub mod diagnostics;
pub mod error;
pub mod format;
pub mod hash;
pub mod import;
pub mod mesh_output;
pub mod mesher;
pub mod types;

// Re-export main types for convenience
pub use diagnostics::{CollectingDiagnostics, Diagnostics, ImportWarning, TracingDiagnostics};
pub use error::{Result, StlError};
pub use format::{
    decode_ascii, decode_binary, encode_ascii, encode_binary, is_binary, AsciiSolid, StlFormat,
};
pub use hash::ContentHash;
pub use import::{ImportConfig, ImportSummary, ImportedModel, Importer};
pub use mesh_output::MeshBuffers;
pub use mesher::build_mesh;
pub use types::{BoundingBox, Facet, FACET_SIZE, FACET_STRIDE};

/// Import STL bytes with the default configuration.
pub fn import_stl(bytes: &[u8]) -> Result<ImportedModel> {
    Importer::new().import(bytes)
}

/// Read an STL file from disk and import it.
pub fn import_file<P: AsRef<std::path::Path>>(path: P, config: ImportConfig) -> Result<ImportedModel> {
    Importer::with_config(config).import_file(path)
}

#[cfg(feature = "wasm")]
pub mod wasm;
