//! Recursive midpoint subdivision onto the unit sphere.
//!
//! Each iteration replaces every triangle `(v1, v2, v3)` with four children,
//! in this order:
//!
//! ```text
//! (v1,  m12, m31)   corner at v1
//! (m12, v2,  m23)   corner at v2
//! (m31, m23, v3)    corner at v3
//! (m12, m23, m31)   center
//! ```
//!
//! so child `4i + j` always descends from parent `i` and every child keeps its
//! parent's winding. Midpoints are taken from the parent coordinates as they
//! stood at the start of the iteration, then normalized. Parents are normalized
//! once the whole generation has been built. The new generation goes into a
//! fresh triangle list; the old one is dropped.
//!
//! The six axis vertices of the seed keep valence 4 forever while every other
//! vertex of a shared-edge mesh has valence 6. The curvature step this leaves
//! at `(±1, 0, 0)`, `(0, ±1, 0)`, `(0, 0, ±1)` shows up as a small dimple at
//! the poles. It is a property of midpoint subdivision of an octahedral seed,
//! not an arithmetic bug.

use std::fmt;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MeshError, ParseParamError};
use crate::mesh::{IndexedMesh, MeshStage, TriangleSoup};
use crate::vertex::MeshVertex;

/// Above this many iterations generation gets slow and memory hungry. Not enforced.
pub const PRACTICAL_ITERATION_LIMIT: u32 = 8;

/// How midpoints on edges shared by two triangles are stored in an indexed mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSharing {
    /// One midpoint per edge, reused by both adjacent triangles.
    #[default]
    Shared,
    /// Every triangle appends its own three midpoints, duplicating shared edges.
    PerTriangle,
}

impl EdgeSharing {
    const NAMES: &'static str = "shared, per-triangle";
}

impl fmt::Display for EdgeSharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EdgeSharing::Shared => "shared",
            EdgeSharing::PerTriangle => "per-triangle",
        })
    }
}

impl FromStr for EdgeSharing {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(EdgeSharing::Shared),
            "per-triangle" | "per_triangle" => Ok(EdgeSharing::PerTriangle),
            _ => Err(ParseParamError {
                kind: "edge sharing",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Vertex and triangle counts of a mesh after some number of iterations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: u64,
    pub triangles: u64,
}

/// Predict the counts `mesh` will have after `iterations`, or `None` if they
/// overflow `u64`.
pub fn predict_counts(mesh: &IndexedMesh, iterations: u32, sharing: EdgeSharing) -> Option<MeshCounts> {
    let mut vertices = mesh.vertex_count() as u64;
    let mut triangles = mesh.triangle_count() as u64;
    let mut edges = count_edges(mesh.triangles()) as u64;

    for _ in 0..iterations {
        let added = match sharing {
            EdgeSharing::Shared => edges,
            EdgeSharing::PerTriangle => triangles.checked_mul(3)?,
        };
        vertices = vertices.checked_add(added)?;
        // Each edge splits in two; each triangle adds three interior edges.
        edges = edges.checked_mul(2)?.checked_add(triangles.checked_mul(3)?)?;
        triangles = triangles.checked_mul(4)?;
    }

    Some(MeshCounts {
        vertices,
        triangles,
    })
}

/// Triangle count of an eight-triangle seed after `iterations`: `8 · 4^k`.
pub fn seed_triangle_count(iterations: u32) -> u64 {
    8 * 4u64.pow(iterations)
}

/// Vertex count of a six-vertex seed after `iterations`.
///
/// `Shared`: `4 · 4^k + 2`. `PerTriangle`: `6 + 8 · (4^k - 1)`.
pub fn seed_vertex_count(iterations: u32, sharing: EdgeSharing) -> u64 {
    let p = 4u64.pow(iterations);
    match sharing {
        EdgeSharing::Shared => 4 * p + 2,
        EdgeSharing::PerTriangle => 6 + 8 * (p - 1),
    }
}

fn count_edges(triangles: &[[u32; 3]]) -> usize {
    let mut edges = FxHashSet::default();
    for &[a, b, c] in triangles {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            edges.insert(edge_key(p, q));
        }
    }
    edges.len()
}

fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Appends midpoints to the vertex pool during one iteration.
struct MidpointPool<'a> {
    vertices: &'a mut Vec<MeshVertex>,
    cache: Option<FxHashMap<(u32, u32), u32>>,
}

impl MidpointPool<'_> {
    fn midpoint(&mut self, a: u32, b: u32) -> u32 {
        let key = edge_key(a, b);
        if let Some(cache) = &self.cache
            && let Some(&idx) = cache.get(&key)
        {
            return idx;
        }

        let mid =
            MeshVertex::midpoint(&self.vertices[a as usize], &self.vertices[b as usize]).normalized();
        let idx = self.vertices.len() as u32;
        self.vertices.push(mid);

        if let Some(cache) = &mut self.cache {
            cache.insert(key, idx);
        }
        idx
    }
}

/// Subdivide an indexed mesh `iterations` times.
///
/// The mesh is validated first. With `iterations == 0` it comes back
/// untouched, still unnormalized if it was raw; callers that need unit
/// vertices must normalize it themselves.
pub fn subdivide(
    mut mesh: IndexedMesh,
    iterations: u32,
    sharing: EdgeSharing,
) -> Result<IndexedMesh, MeshError> {
    if mesh.stage == MeshStage::Displaced {
        return Err(MeshError::AlreadyDisplaced);
    }
    mesh.validate()?;

    let counts = predict_counts(&mesh, iterations, sharing)
        .filter(|c| c.vertices <= u32::MAX as u64 + 1)
        .ok_or(MeshError::IndexOverflow { iterations })?;

    if iterations > PRACTICAL_ITERATION_LIMIT {
        warn!(
            iterations,
            triangles = counts.triangles,
            "subdivision beyond the practical limit of {PRACTICAL_ITERATION_LIMIT} iterations"
        );
    }

    for generation in 0..iterations {
        mesh = subdivide_once(mesh, sharing);
        debug!(
            generation = generation + 1,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "subdivided"
        );
    }
    Ok(mesh)
}

fn subdivide_once(mesh: IndexedMesh, sharing: EdgeSharing) -> IndexedMesh {
    let IndexedMesh {
        mut vertices,
        triangles: parents,
        ..
    } = mesh;
    let parent_vertices = vertices.len();

    let mut children = Vec::with_capacity(parents.len() * 4);
    {
        let mut pool = MidpointPool {
            vertices: &mut vertices,
            cache: match sharing {
                EdgeSharing::Shared => Some(FxHashMap::default()),
                EdgeSharing::PerTriangle => None,
            },
        };

        for &[v1, v2, v3] in &parents {
            let m12 = pool.midpoint(v1, v2);
            let m23 = pool.midpoint(v2, v3);
            let m31 = pool.midpoint(v3, v1);

            children.push([v1, m12, m31]);
            children.push([m12, v2, m23]);
            children.push([m31, m23, v3]);
            children.push([m12, m23, m31]);
        }
    }

    for v in &mut vertices[..parent_vertices] {
        v.normalize();
    }

    IndexedMesh {
        vertices,
        triangles: children,
        stage: MeshStage::Normalized,
    }
}

/// Subdivide a triangle soup `iterations` times.
///
/// Same child order and normalization rule as [`subdivide`]; each triangle
/// normalizes its own corner copies.
pub fn subdivide_soup(mut soup: TriangleSoup, iterations: u32) -> Result<TriangleSoup, MeshError> {
    soup.validate()?;

    for _ in 0..iterations {
        let mut children = Vec::with_capacity(soup.triangles.len() * 4);
        for [v1, v2, v3] in &soup.triangles {
            let m12 = MeshVertex::midpoint(v1, v2).normalized();
            let m23 = MeshVertex::midpoint(v2, v3).normalized();
            let m31 = MeshVertex::midpoint(v3, v1).normalized();
            let (v1, v2, v3) = (v1.normalized(), v2.normalized(), v3.normalized());

            children.push([v1, m12, m31]);
            children.push([m12, v2, m23]);
            children.push([m31, m23, v3]);
            children.push([m12, m23, m31]);
        }
        soup.triangles = children;
    }
    Ok(soup)
}
