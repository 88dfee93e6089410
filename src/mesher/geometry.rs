//! Per-vertex and per-facet geometry helpers.

use glam::Vec3;

/// Convert an STL (right-handed, Z up) position into the left-handed,
/// Y-up target space: `(x, y, z) -> (-y, z, x)`.
#[inline]
pub fn to_left_handed(p: [f32; 3]) -> Vec3 {
    Vec3::new(-p[1], p[2], p[0])
}

/// Flat normal of a transformed triangle.
///
/// Degenerate triangles get a zero normal.
#[inline]
pub fn facet_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v0 - v1).cross(v2 - v0).normalize_or_zero()
}
