//! Vertex types: the working vertex carried through generation and the packed GPU vertex.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Normal assigned to every vertex until normals are recomputed.
pub const PLACEHOLDER_NORMAL: Vec3 = Vec3::Y;

/// Default vertex color.
pub const WHITE: Vec3 = Vec3::ONE;

/// A vertex as it flows through base construction, subdivision and displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    /// Model-space position. Unit length after normalization.
    pub position: Vec3,
    /// Per-vertex normal.
    pub normal: Vec3,
    /// Per-vertex color.
    pub color: Vec3,
}

impl MeshVertex {
    /// A vertex at `position` with the placeholder normal and the given color.
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            normal: PLACEHOLDER_NORMAL,
            color,
        }
    }

    /// The vertex halfway between `a` and `b`, before any normalization.
    ///
    /// The sum is taken as `a + b`, which is bit-identical to `b + a`, so two
    /// triangles sharing an edge always produce the same midpoint.
    pub fn midpoint(a: &Self, b: &Self) -> Self {
        Self {
            position: (a.position + b.position) / 2.0,
            normal: PLACEHOLDER_NORMAL,
            color: (a.color + b.color) / 2.0,
        }
    }

    /// Push the position onto the unit sphere.
    pub fn normalize(&mut self) {
        self.position = self.position.normalize();
    }

    /// Returns a copy with the position pushed onto the unit sphere.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

/// GPU vertex: position, normal, color, each three contiguous `f32`s.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl From<&MeshVertex> for Vertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            color: v.color.to_array(),
        }
    }
}
