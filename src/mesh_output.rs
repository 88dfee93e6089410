//! Render-ready mesh buffers.
//!
//! [`MeshBuffers`] is what the import pipeline hands to a renderer: one
//! position and normal per emitted vertex, plus the triangle index list, with
//! zero-copy byte accessors for GPU upload.

use crate::types::BoundingBox;
use std::mem;

/// Vertex, normal and index buffers built from a list of facets.
///
/// Vertices are not shared between facets: facet `i` owns vertex slots
/// `3i..3i + 3`, and its three index entries point back at those slots.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions, three per facet, in the left-handed target space.
    pub positions: Vec<[f32; 3]>,
    /// Flat facet normal repeated for each of the facet's vertices.
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices, three per facet.
    pub indices: Vec<u32>,
    /// Bounds of `positions` as emitted.
    pub bounds: BoundingBox,
    /// Offset subtracted from every position by the centering pass.
    /// Zero when centering was not requested.
    pub center: [f32; 3],
}

impl MeshBuffers {
    /// An empty mesh.
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            bounds: BoundingBox::zero(),
            center: [0.0; 3],
        }
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of vertices (three per facet).
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles, equal to the facet count.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of facets the buffers were built from.
    pub fn facet_count(&self) -> usize {
        self.triangle_count()
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` array.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.iter().copied()).collect()
    }

    /// Normals as a flat array.
    pub fn normals_flat(&self) -> Vec<f32> {
        self.normals.iter().flat_map(|n| n.iter().copied()).collect()
    }

    /// Raw bytes of the positions array. Zero-allocation view.
    pub fn positions_bytes(&self) -> &[u8] {
        cast_slice(&self.positions)
    }

    /// Raw bytes of the normals array. Zero-allocation view.
    pub fn normals_bytes(&self) -> &[u8] {
        cast_slice(&self.normals)
    }

    /// Raw bytes of the indices array. Zero-allocation view.
    pub fn indices_bytes(&self) -> &[u8] {
        cast_slice(&self.indices)
    }
}

impl Default for MeshBuffers {
    fn default() -> Self {
        Self::empty()
    }
}

/// Cast a slice of `T` to a byte slice without allocation.
fn cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    let ptr = slice.as_ptr() as *const u8;
    let len = slice.len() * mem::size_of::<T>();
    // SAFETY: only called with [f32; 3] and u32, which have no padding.
    unsafe { std::slice::from_raw_parts(ptr, len) }
}
