//! Shared types used throughout the library.

use serde::Serialize;

/// Bytes of float payload in one facet: normal plus three vertices.
pub const FACET_SIZE: usize = 48;

/// Bytes occupied by one facet in a binary STL file (payload plus the
/// 2-byte attribute count).
pub const FACET_STRIDE: usize = 50;

/// One triangle as stored in an STL file.
///
/// The field order mirrors the binary wire layout: normal first, then the
/// three vertices, twelve `f32` values in total.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Facet {
    /// Normal as declared by the file. Often wrong or zero; the mesher ignores it.
    pub normal: [f32; 3],
    /// Triangle corners in file order.
    pub vertices: [[f32; 3]; 3],
}

const _: () = assert!(std::mem::size_of::<Facet>() == FACET_SIZE);

impl Facet {
    pub fn new(normal: [f32; 3], vertices: [[f32; 3]; 3]) -> Self {
        Self { normal, vertices }
    }

    /// Create a facet with a zero normal.
    pub fn from_vertices(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Self {
        Self {
            normal: [0.0; 3],
            vertices: [v0, v1, v2],
        }
    }

    /// Build a facet from twelve floats in wire order.
    pub fn from_array(values: [f32; 12]) -> Self {
        Self {
            normal: [values[0], values[1], values[2]],
            vertices: [
                [values[3], values[4], values[5]],
                [values[6], values[7], values[8]],
                [values[9], values[10], values[11]],
            ],
        }
    }

    /// The twelve floats of this facet in wire order.
    pub fn to_array(&self) -> [f32; 12] {
        let mut out = [0.0f32; 12];
        out[..3].copy_from_slice(&self.normal);
        for (i, vertex) in self.vertices.iter().enumerate() {
            out[3 + i * 3..6 + i * 3].copy_from_slice(vertex);
        }
        out
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// An empty box at the origin, used for meshes without vertices.
    pub fn zero() -> Self {
        Self::new([0.0; 3], [0.0; 3])
    }

    pub fn from_points(points: impl Iterator<Item = [f32; 3]>) -> Option<Self> {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        let mut has_points = false;

        for p in points {
            has_points = true;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Grow this box to also cover `other`.
    pub fn union(&self, other: &BoundingBox) -> Self {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn dimensions(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
