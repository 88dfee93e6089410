//! Mesh generation from decoded facets.
//!
//! Converts a facet list into [`MeshBuffers`]: positions flipped into the
//! left-handed target space, recomputed flat normals, reversed-winding
//! indices, and an optional recentering about the bounding-box center.

pub mod geometry;

use rayon::prelude::*;

use crate::mesh_output::MeshBuffers;
use crate::types::{BoundingBox, Facet};
use geometry::{facet_normal, to_left_handed};

/// Build render buffers from facets.
///
/// Facet `i` writes vertex slots `3i..3i + 3` and index entries
/// `(3i + 2, 3i + 1, 3i)`, so the per-facet pass runs in parallel without
/// any ordering concerns. The declared facet normal is ignored.
///
/// With `center_vertices`, a second parallel pass subtracts the bounding-box
/// center from every position once the first pass has finished.
pub fn build_mesh(facets: &[Facet], center_vertices: bool) -> MeshBuffers {
    if facets.is_empty() {
        return MeshBuffers::empty();
    }

    let vertex_count = facets.len() * 3;
    let mut positions = vec![[0.0f32; 3]; vertex_count];
    let mut normals = vec![[0.0f32; 3]; vertex_count];
    let mut indices = vec![0u32; vertex_count];

    positions
        .par_chunks_mut(3)
        .zip(normals.par_chunks_mut(3))
        .zip(facets.par_iter())
        .for_each(|((position_slots, normal_slots), facet)| {
            let [v0, v1, v2] = facet.vertices.map(to_left_handed);
            let normal = facet_normal(v0, v1, v2).to_array();

            position_slots[0] = v0.to_array();
            position_slots[1] = v1.to_array();
            position_slots[2] = v2.to_array();
            normal_slots.fill(normal);
        });

    indices
        .par_chunks_mut(3)
        .enumerate()
        .for_each(|(i, triangle)| {
            let slot = (i * 3) as u32;
            triangle.copy_from_slice(&[slot + 2, slot + 1, slot]);
        });

    let bounds = parallel_bounds(&positions).unwrap_or_else(BoundingBox::zero);

    let (bounds, center) = if center_vertices {
        let center = bounds.center();
        positions.par_iter_mut().for_each(|p| {
            p[0] -= center[0];
            p[1] -= center[1];
            p[2] -= center[2];
        });
        let centered = BoundingBox::new(
            [
                bounds.min[0] - center[0],
                bounds.min[1] - center[1],
                bounds.min[2] - center[2],
            ],
            [
                bounds.max[0] - center[0],
                bounds.max[1] - center[1],
                bounds.max[2] - center[2],
            ],
        );
        (centered, center)
    } else {
        (bounds, [0.0; 3])
    };

    tracing::debug!(
        "built mesh: {} facets, {} vertices, centered: {}",
        facets.len(),
        vertex_count,
        center_vertices
    );

    MeshBuffers {
        positions,
        normals,
        indices,
        bounds,
        center,
    }
}

fn parallel_bounds(positions: &[[f32; 3]]) -> Option<BoundingBox> {
    positions
        .par_iter()
        .map(|p| BoundingBox::new(*p, *p))
        .reduce_with(|a, b| a.union(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Facet {
        Facet::new(
            [0.0, 0.0, 1.0],
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        )
    }

    fn scattered_facets(count: usize) -> Vec<Facet> {
        (0..count)
            .map(|i| {
                let o = i as f32;
                Facet::from_vertices(
                    [o, 2.0 * o, -o],
                    [o + 1.0, 3.0, 5.0 - o],
                    [10.0 - o, o * 0.5, 7.0],
                )
            })
            .collect()
    }

    #[test]
    fn test_coordinate_flip() {
        let facet = Facet::from_vertices([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]);
        let mesh = build_mesh(&[facet], false);
        assert_eq!(mesh.positions[0], [-2.0, 3.0, 1.0]);
        assert_eq!(mesh.positions[1], [-5.0, 6.0, 4.0]);
        assert_eq!(mesh.positions[2], [-8.0, 10.0, 7.0]);
    }

    #[test]
    fn test_reversed_winding() {
        let mesh = build_mesh(&scattered_facets(3), false);
        assert_eq!(mesh.indices, vec![2, 1, 0, 5, 4, 3, 8, 7, 6]);
    }

    #[test]
    fn test_normals_are_recomputed() {
        let mut facet = unit_triangle();
        facet.normal = [9.0, 9.0, 9.0];
        let mesh = build_mesh(&[facet], false);
        assert_eq!(mesh.normals, vec![[0.0, 1.0, 0.0]; 3]);
    }

    #[test]
    fn test_buffer_lengths() {
        let facets = scattered_facets(1000);
        let mesh = build_mesh(&facets, true);
        assert_eq!(mesh.positions_flat().len(), 9 * facets.len());
        assert_eq!(mesh.normals_flat().len(), 9 * facets.len());
        assert_eq!(mesh.indices.len(), 3 * facets.len());
        assert_eq!(mesh.facet_count(), facets.len());
    }

    #[test]
    fn test_matches_sequential_order() {
        let facets = scattered_facets(5000);
        let mesh = build_mesh(&facets, false);
        for (i, facet) in facets.iter().enumerate() {
            for (k, vertex) in facet.vertices.iter().enumerate() {
                assert_eq!(mesh.positions[3 * i + k], to_left_handed(*vertex).to_array());
            }
        }
    }

    #[test]
    fn test_centering() {
        let facets = scattered_facets(64);
        let raw = build_mesh(&facets, false);
        let centered = build_mesh(&facets, true);

        let bounds = BoundingBox::from_points(centered.positions.iter().copied()).unwrap();
        for axis in bounds.center() {
            assert!(axis.abs() < 1e-4, "center component {} not at origin", axis);
        }
        assert_eq!(centered.bounds, bounds);
        assert_eq!(centered.center, raw.bounds.center());

        for (a, b) in raw.positions.iter().zip(&centered.positions) {
            for axis in 0..3 {
                assert!((a[axis] - centered.center[axis] - b[axis]).abs() < 1e-5);
            }
        }
        assert_eq!(raw.normals, centered.normals);
    }

    #[test]
    fn test_without_centering_keeps_positions() {
        let facets = vec![Facet::from_vertices([10.0, 0.0, 0.0], [11.0, 0.0, 0.0], [10.0, 1.0, 0.0])];
        let mesh = build_mesh(&facets, false);
        assert_eq!(mesh.center, [0.0; 3]);
        assert_eq!(mesh.positions[0], [-0.0, 0.0, 10.0]);
        assert_eq!(mesh.bounds.max[2], 11.0);
    }

    #[test]
    fn test_empty_input() {
        let mesh = build_mesh(&[], true);
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
