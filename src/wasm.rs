//! WASM bindings for stl-import.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Import options.
#[wasm_bindgen]
pub struct ImportOptions {
    center_vertices: bool,
    hash_ascii_as_binary: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ImportOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ImportOptions {
        let config = crate::ImportConfig::default();
        ImportOptions {
            center_vertices: config.center_vertices,
            hash_ascii_as_binary: config.hash_ascii_as_binary,
        }
    }

    #[wasm_bindgen(setter)]
    pub fn set_center_vertices(&mut self, value: bool) {
        self.center_vertices = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_hash_ascii_as_binary(&mut self, value: bool) {
        self.hash_ascii_as_binary = value;
    }
}

/// An imported STL model.
#[wasm_bindgen]
pub struct StlModel {
    inner: crate::ImportedModel,
}

#[wasm_bindgen]
impl StlModel {
    /// Import a model from an STL file's bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(data: &[u8], options: Option<ImportOptions>) -> Result<StlModel, JsError> {
        let options = options.unwrap_or_default();
        let config = crate::ImportConfig::default()
            .with_centering(options.center_vertices)
            .with_ascii_hash_as_binary(options.hash_ascii_as_binary);

        let inner = crate::Importer::with_config(config)
            .import(data)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(StlModel { inner })
    }

    /// Vertex positions as a flat `Float32Array`.
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.inner.mesh.positions_flat().as_slice())
    }

    /// Vertex normals as a flat `Float32Array`.
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.inner.mesh.normals_flat().as_slice())
    }

    /// Triangle indices as a `Uint32Array`.
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(self.inner.mesh.indices.as_slice())
    }

    /// Base64 content hash.
    #[wasm_bindgen(getter)]
    pub fn hash(&self) -> String {
        self.inner.hash.to_string()
    }

    /// "binary" or "ascii".
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn facet_count(&self) -> usize {
        self.inner.facet_count
    }

    /// Center offset that was subtracted from every vertex.
    #[wasm_bindgen(getter)]
    pub fn center(&self) -> Vec<f32> {
        self.inner.mesh.center.to_vec()
    }
}

/// Check whether bytes would be decoded as binary STL.
#[wasm_bindgen]
pub fn is_binary_stl(data: &[u8]) -> bool {
    crate::is_binary(data)
}

/// Re-encode any STL as canonical binary.
#[wasm_bindgen]
pub fn to_binary_stl(data: &[u8]) -> Result<Vec<u8>, JsError> {
    let diagnostics = crate::TracingDiagnostics;
    let facets = match crate::StlFormat::detect(data) {
        crate::StlFormat::Binary => crate::decode_binary(data, &diagnostics),
        crate::StlFormat::Ascii => crate::decode_ascii(data, &diagnostics).map(|s| s.facets),
    }
    .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(crate::encode_binary(&facets))
}
