//! The two mesh representations: an indexed mesh over a shared vertex pool,
//! and a triangle soup where every triangle owns copies of its corners.

use glam::Vec3;

use crate::error::MeshError;
use crate::vertex::MeshVertex;

/// Squared length below which a vertex or an edge counts as degenerate.
const DEGENERATE_EPSILON_SQ: f32 = 1e-12;

/// Where a mesh is in the generation pipeline.
///
/// Displacement is only valid on a `Normalized` mesh and may only happen once;
/// nothing may subdivide or renormalize a `Displaced` mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshStage {
    /// Positions are as constructed; not necessarily unit length.
    Raw,
    /// Every position is unit length.
    Normalized,
    /// Radii have been perturbed by the displacement pass.
    Displaced,
}

/// A mesh whose triangles reference a shared vertex pool by index.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedMesh {
    pub(crate) vertices: Vec<MeshVertex>,
    pub(crate) triangles: Vec<[u32; 3]>,
    pub(crate) stage: MeshStage,
}

impl IndexedMesh {
    /// Build a raw mesh from a vertex pool and index triples. Call
    /// [`validate`](Self::validate) before trusting foreign data.
    pub fn new(vertices: Vec<MeshVertex>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
            stage: MeshStage::Raw,
        }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn stage(&self) -> MeshStage {
        self.stage
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of triangle `i`.
    pub fn triangle_positions(&self, i: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[i];
        [
            self.vertices[a as usize].position,
            self.vertices[b as usize].position,
            self.vertices[c as usize].position,
        ]
    }

    /// Check that every vertex is finite and non-zero, every index is in
    /// range, and no triangle has repeated or coincident corners.
    pub fn validate(&self) -> Result<(), MeshError> {
        for (index, v) in self.vertices.iter().enumerate() {
            check_vertex(index, v)?;
        }
        let len = self.vertices.len();
        for (triangle, tri) in self.triangles.iter().enumerate() {
            for &index in tri {
                if index as usize >= len {
                    return Err(MeshError::IndexOutOfBounds {
                        triangle,
                        index,
                        len,
                    });
                }
            }
            let [a, b, c] = *tri;
            if a == b || b == c || c == a {
                return Err(MeshError::DegenerateTriangle { triangle });
            }
            check_corners(triangle, self.triangle_positions(triangle))?;
        }
        Ok(())
    }

    /// Push every vertex onto the unit sphere.
    ///
    /// Idempotent on an already normalized mesh. Refused once the mesh has been
    /// displaced, since it would erase the relief.
    pub fn normalize(&mut self) -> Result<(), MeshError> {
        if self.stage == MeshStage::Displaced {
            return Err(MeshError::AlreadyDisplaced);
        }
        for v in &mut self.vertices {
            v.normalize();
        }
        self.stage = MeshStage::Normalized;
        Ok(())
    }

    /// Expand into a triangle soup, copying each corner.
    pub fn to_soup(&self) -> TriangleSoup {
        let triangles = self
            .triangles
            .iter()
            .map(|&[a, b, c]| {
                [
                    self.vertices[a as usize],
                    self.vertices[b as usize],
                    self.vertices[c as usize],
                ]
            })
            .collect();
        TriangleSoup { triangles }
    }
}

/// A mesh where every triangle owns three full vertex copies.
///
/// Shared corners are duplicated once per use. Subdivision on a soup computes
/// each shared edge midpoint once per adjacent triangle; the results are
/// bit-identical, so the surface stays watertight.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleSoup {
    pub(crate) triangles: Vec<[MeshVertex; 3]>,
}

impl TriangleSoup {
    pub fn new(triangles: Vec<[MeshVertex; 3]>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[[MeshVertex; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check every corner for degeneracy and every triangle for coincident corners.
    pub fn validate(&self) -> Result<(), MeshError> {
        for (triangle, corners) in self.triangles.iter().enumerate() {
            for (k, v) in corners.iter().enumerate() {
                check_vertex(triangle * 3 + k, v)?;
            }
            check_corners(
                triangle,
                [corners[0].position, corners[1].position, corners[2].position],
            )?;
        }
        Ok(())
    }

    /// Push every corner onto the unit sphere.
    pub fn normalize(&mut self) {
        for corners in &mut self.triangles {
            for v in corners.iter_mut() {
                v.normalize();
            }
        }
    }

    /// Iterate over every corner in triangle order.
    pub fn corners(&self) -> impl Iterator<Item = &MeshVertex> {
        self.triangles.iter().flat_map(|t| t.iter())
    }
}

fn check_vertex(index: usize, v: &MeshVertex) -> Result<(), MeshError> {
    if !v.position.is_finite() || v.position.length_squared() < DEGENERATE_EPSILON_SQ {
        return Err(MeshError::DegenerateVertex { index });
    }
    Ok(())
}

fn check_corners(triangle: usize, [a, b, c]: [Vec3; 3]) -> Result<(), MeshError> {
    let coincident = |p: Vec3, q: Vec3| (p - q).length_squared() < DEGENERATE_EPSILON_SQ;
    if coincident(a, b) || coincident(b, c) || coincident(c, a) {
        return Err(MeshError::DegenerateTriangle { triangle });
    }
    Ok(())
}
