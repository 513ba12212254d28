//! Flattening a finished mesh into GPU-ready vertex and index data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseParamError;
use crate::mesh::{IndexedMesh, TriangleSoup};
use crate::vertex::Vertex;

/// Which buffer layout to hand to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Three vertices per triangle, no index buffer.
    Unindexed,
    /// The vertex pool as-is plus three indices per triangle.
    #[default]
    Indexed,
}

impl ExportFormat {
    const NAMES: &'static str = "indexed, unindexed";
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Unindexed => "unindexed",
            ExportFormat::Indexed => "indexed",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indexed" => Ok(ExportFormat::Indexed),
            "unindexed" => Ok(ExportFormat::Unindexed),
            _ => Err(ParseParamError {
                kind: "export format",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Vertex data plus optional triangle indices, ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshExport {
    vertices: Vec<Vertex>,
    indices: Option<Vec<u32>>,
}

impl MeshExport {
    /// Export `mesh` in the requested format.
    pub fn from_mesh(mesh: &IndexedMesh, format: ExportFormat) -> Self {
        match format {
            ExportFormat::Indexed => Self::indexed(mesh),
            ExportFormat::Unindexed => Self::unindexed(&mesh.to_soup()),
        }
    }

    pub fn indexed(mesh: &IndexedMesh) -> Self {
        let vertices = mesh.vertices().iter().map(Vertex::from).collect();
        let indices = mesh.triangles().iter().flatten().copied().collect();
        Self {
            vertices,
            indices: Some(indices),
        }
    }

    pub fn unindexed(soup: &TriangleSoup) -> Self {
        Self {
            vertices: soup.corners().map(Vertex::from).collect(),
            indices: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn format(&self) -> ExportFormat {
        if self.indices.is_some() {
            ExportFormat::Indexed
        } else {
            ExportFormat::Unindexed
        }
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    /// Line-list indices drawing every triangle edge: `a-b`, `b-c`, `c-a`.
    ///
    /// Works for both formats; for unindexed data the triangle indices are
    /// implicit `0, 1, 2, ...`.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut lines = Vec::with_capacity(self.triangle_count() * 6);
        let mut push = |a: u32, b: u32, c: u32| lines.extend_from_slice(&[a, b, b, c, c, a]);
        match &self.indices {
            Some(indices) => {
                for tri in indices.chunks_exact(3) {
                    push(tri[0], tri[1], tri[2]);
                }
            }
            None => {
                for t in 0..self.triangle_count() as u32 {
                    push(3 * t, 3 * t + 1, 3 * t + 2);
                }
            }
        }
        lines
    }

    /// Raw vertex bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
