//! Vertex and index buffers for one planet mesh.

use planetgen_mesh::MeshExport;
use wgpu::util::DeviceExt;

/// A u32 index buffer and its length.
pub struct IndexBuffer {
    pub buffer: wgpu::Buffer,
    pub count: u32,
}

impl IndexBuffer {
    pub fn new(device: &wgpu::Device, label: &str, indices: &[u32]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            count: indices.len() as u32,
        }
    }
}

/// GPU copy of a [`MeshExport`], ready to draw as points, lines or triangles.
///
/// Triangle indices are only present for indexed exports. Line indices are
/// always built, since a wireframe needs each edge listed explicitly.
pub struct PlanetBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub triangle_indices: Option<IndexBuffer>,
    pub line_indices: IndexBuffer,
}

impl PlanetBuffers {
    pub fn from_export(device: &wgpu::Device, export: &MeshExport) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("planet-vertices"),
            contents: export.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let triangle_indices = export
            .indices()
            .map(|indices| IndexBuffer::new(device, "planet-triangle-indices", indices));
        let line_indices =
            IndexBuffer::new(device, "planet-line-indices", &export.wireframe_indices());

        log::debug!(
            "Uploaded planet mesh: {} vertices, {} triangles, {} line indices",
            export.vertices().len(),
            export.triangle_count(),
            line_indices.count
        );

        Self {
            vertex_buffer,
            vertex_count: export.vertices().len() as u32,
            triangle_indices,
            line_indices,
        }
    }

    /// Bind the buffers and issue the draw call for `topology`.
    ///
    /// Only list topologies are supported; strips draw nothing.
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, topology: wgpu::PrimitiveTopology) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match topology {
            wgpu::PrimitiveTopology::PointList => pass.draw(0..self.vertex_count, 0..1),
            wgpu::PrimitiveTopology::LineList => {
                pass.set_index_buffer(
                    self.line_indices.buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..self.line_indices.count, 0, 0..1);
            }
            wgpu::PrimitiveTopology::TriangleList => match &self.triangle_indices {
                Some(indices) => {
                    pass.set_index_buffer(indices.buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..indices.count, 0, 0..1);
                }
                None => pass.draw(0..self.vertex_count, 0..1),
            },
            other => log::warn!("Unsupported topology {other:?}, skipping draw"),
        }
    }
}
