//! The import pipeline: sniff, decode, hash, build.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::Result;
use crate::format::{decode_ascii, decode_binary, encode_binary, StlFormat};
use crate::hash::ContentHash;
use crate::mesh_output::MeshBuffers;
use crate::mesher::build_mesh;
use crate::types::BoundingBox;

/// Import configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Translate the mesh so its bounding-box center sits at the origin.
    pub center_vertices: bool,
    /// Hash ASCII files through their canonical binary encoding instead of
    /// their raw text, so reformatting the text does not change identity.
    pub hash_ascii_as_binary: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            center_vertices: true,
            hash_ascii_as_binary: true,
        }
    }
}

impl ImportConfig {
    /// Enable or disable the centering pass.
    pub fn with_centering(mut self, center_vertices: bool) -> Self {
        self.center_vertices = center_vertices;
        self
    }

    /// Choose what ASCII files are hashed over.
    pub fn with_ascii_hash_as_binary(mut self, enabled: bool) -> Self {
        self.hash_ascii_as_binary = enabled;
        self
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A fully imported model.
#[derive(Debug, Clone)]
pub struct ImportedModel {
    pub mesh: MeshBuffers,
    pub hash: ContentHash,
    /// Encoding the file was decoded as.
    pub format: StlFormat,
    /// Name after `solid` for ASCII files.
    pub solid_name: Option<String>,
    /// Number of facets decoded.
    pub facet_count: usize,
}

impl ImportedModel {
    /// Split into the mesh buffers and the content hash.
    pub fn into_parts(self) -> (MeshBuffers, ContentHash) {
        (self.mesh, self.hash)
    }

    /// A serializable description without the buffers.
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            format: self.format,
            solid_name: self.solid_name.clone(),
            facet_count: self.facet_count,
            vertex_count: self.mesh.vertex_count(),
            hash: self.hash.clone(),
            bounds: self.mesh.bounds,
            center: self.mesh.center,
        }
    }
}

/// Metadata of an import, for reports and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub format: StlFormat,
    pub solid_name: Option<String>,
    pub facet_count: usize,
    pub vertex_count: usize,
    pub hash: ContentHash,
    pub bounds: BoundingBox,
    pub center: [f32; 3],
}

/// Runs the import pipeline on in-memory STL files.
///
/// Holds no per-file state, so one importer can serve concurrent imports.
pub struct Importer<D: Diagnostics = TracingDiagnostics> {
    config: ImportConfig,
    diagnostics: D,
}

impl Importer {
    /// Create an importer with default configuration that logs through `tracing`.
    pub fn new() -> Self {
        Self::with_config(ImportConfig::default())
    }

    /// Create an importer with custom configuration.
    pub fn with_config(config: ImportConfig) -> Self {
        Self {
            config,
            diagnostics: TracingDiagnostics,
        }
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Diagnostics> Importer<D> {
    /// Create an importer that reports warnings to `diagnostics`.
    pub fn with_diagnostics(config: ImportConfig, diagnostics: D) -> Self {
        Self { config, diagnostics }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Get a reference to the diagnostics sink.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Import one STL file's bytes.
    ///
    /// Fails only on a corrupt binary file or text without a `solid` header;
    /// recoverable problems go to the diagnostics sink.
    pub fn import(&self, bytes: &[u8]) -> Result<ImportedModel> {
        let format = StlFormat::detect(bytes);
        tracing::debug!("importing {} bytes as {} STL", bytes.len(), format);

        match format {
            StlFormat::Binary => self.import_binary(bytes),
            StlFormat::Ascii => self.import_ascii(bytes),
        }
    }

    /// Read a file from disk and import it.
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<ImportedModel> {
        let bytes = std::fs::read(path)?;
        self.import(&bytes)
    }

    fn import_binary(&self, bytes: &[u8]) -> Result<ImportedModel> {
        // The raw bytes are the identity, so hashing does not wait for decoding
        let (hash, built) = rayon::join(
            || ContentHash::of(bytes),
            || -> Result<(usize, MeshBuffers)> {
                let facets = decode_binary(bytes, &self.diagnostics)?;
                Ok((facets.len(), build_mesh(&facets, self.config.center_vertices)))
            },
        );
        let (facet_count, mesh) = built?;

        Ok(ImportedModel {
            mesh,
            hash,
            format: StlFormat::Binary,
            solid_name: None,
            facet_count,
        })
    }

    fn import_ascii(&self, bytes: &[u8]) -> Result<ImportedModel> {
        let solid = decode_ascii(bytes, &self.diagnostics)?;

        let (hash, mesh) = rayon::join(
            || {
                if self.config.hash_ascii_as_binary {
                    ContentHash::of(&encode_binary(&solid.facets))
                } else {
                    ContentHash::of(bytes)
                }
            },
            || build_mesh(&solid.facets, self.config.center_vertices),
        );

        Ok(ImportedModel {
            mesh,
            hash,
            format: StlFormat::Ascii,
            facet_count: solid.facets.len(),
            solid_name: Some(solid.name),
        })
    }
}
