//! Canonical `wgpu::VertexBufferLayout` for planet mesh rendering.
//!
//! Every render pipeline (points, lines, triangles) references
//! [`PLANET_VERTEX_LAYOUT`] so the three draw modes cannot drift apart.
//!
//! ## Attribute Packing
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x3 | color    |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::vertex::Vertex;

/// Vertex attributes for [`Vertex`].
pub const PLANET_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 24,
        shader_location: 2,
    },
];

/// The vertex buffer layout shared by all planet pipelines (36-byte stride).
pub const PLANET_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<Vertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &PLANET_VERTEX_ATTRIBUTES,
};

/// Return the planet vertex buffer layout as an owned value.
pub fn planet_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    PLANET_VERTEX_LAYOUT
}

// ---------------------------------------------------------------------------
// Compile-time validation
// ---------------------------------------------------------------------------

const _: () = assert!(
    mem::size_of::<Vertex>() == 36,
    "Vertex size changed, update PLANET_VERTEX_LAYOUT"
);

const _: () = assert!(mem::offset_of!(Vertex, position) as u64 == PLANET_VERTEX_ATTRIBUTES[0].offset);
const _: () = assert!(mem::offset_of!(Vertex, normal) as u64 == PLANET_VERTEX_ATTRIBUTES[1].offset);
const _: () = assert!(mem::offset_of!(Vertex, color) as u64 == PLANET_VERTEX_ATTRIBUTES[2].offset);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(
            PLANET_VERTEX_LAYOUT.array_stride,
            mem::size_of::<Vertex>() as u64
        );
    }

    #[test]
    fn test_attributes_fit_within_stride() {
        let stride = PLANET_VERTEX_LAYOUT.array_stride;
        for (i, attr) in PLANET_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.format, VertexFormat::Float32x3);
            assert!(
                attr.offset + 12 <= stride,
                "Attribute {i} at offset {} exceeds stride {stride}",
                attr.offset
            );
        }
    }

    #[test]
    fn test_shader_locations_are_sequential() {
        for (i, attr) in PLANET_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }

    #[test]
    fn test_helper_returns_same_layout() {
        let layout = planet_vertex_buffer_layout();
        assert_eq!(layout.array_stride, PLANET_VERTEX_LAYOUT.array_stride);
        assert_eq!(layout.attributes.len(), 3);
    }
}
