//! Procedural planet meshes: seed polyhedra, midpoint subdivision onto the
//! unit sphere, noise displacement, normals, and GPU export.

pub mod base;
pub mod displacement;
pub mod error;
pub mod export;
pub mod generate;
pub mod mesh;
pub mod normals;
pub mod params;
pub mod subdivide;
pub mod vertex;
pub mod vertex_format;
pub mod winding;

pub use base::{SEED_POSITIONS, bipyramid, bipyramid_soup, octahedron};
pub use displacement::{
    DisplacementCurve, NoiseKind, NoiseParams, NoiseSampler, displace, displace_soup,
};
pub use error::{MeshError, ParseParamError};
pub use export::{ExportFormat, MeshExport};
pub use generate::{GenerationStats, PlanetMesh, generate};
pub use mesh::{IndexedMesh, MeshStage, TriangleSoup};
pub use normals::{NormalMode, compute_normals};
pub use params::{BaseShape, GenerationParams};
pub use subdivide::{
    EdgeSharing, MeshCounts, PRACTICAL_ITERATION_LIMIT, predict_counts, seed_triangle_count,
    seed_vertex_count, subdivide, subdivide_soup,
};
pub use vertex::{MeshVertex, PLACEHOLDER_NORMAL, Vertex, WHITE};
pub use vertex_format::{PLANET_VERTEX_ATTRIBUTES, PLANET_VERTEX_LAYOUT, planet_vertex_buffer_layout};
pub use winding::{orientation, winds_outward};
