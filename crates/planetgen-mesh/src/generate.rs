//! One-call planet generation: base, subdivide, normalize, displace, normals, export.

use tracing::{info, instrument};

use crate::displacement::displace;
use crate::error::MeshError;
use crate::export::{ExportFormat, MeshExport};
use crate::mesh::IndexedMesh;
use crate::normals::compute_normals;
use crate::params::GenerationParams;
use crate::subdivide::{predict_counts, subdivide};

/// Summary numbers for a generated planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationStats {
    pub vertices: usize,
    pub triangles: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub elapsed_us: u64,
}

impl GenerationStats {
    fn measure(mesh: &IndexedMesh, elapsed_us: u64) -> Self {
        let (min_radius, max_radius) = mesh.vertices().iter().map(|v| v.position.length()).fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), r| (lo.min(r), hi.max(r)),
        );
        Self {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            min_radius,
            max_radius,
            elapsed_us,
        }
    }
}

/// A finished planet: the working mesh and its export.
#[derive(Clone, Debug)]
pub struct PlanetMesh {
    pub mesh: IndexedMesh,
    pub export: MeshExport,
    pub stats: GenerationStats,
}

/// Run the whole pipeline for `params`.
///
/// Parameters are validated before any allocation. The mesh is always
/// normalized after subdivision, so `iterations == 0` still yields a unit
/// polyhedron.
#[instrument(skip_all, fields(base = %params.base, iterations = params.iterations))]
pub fn generate(params: &GenerationParams) -> Result<PlanetMesh, MeshError> {
    let start = std::time::Instant::now();
    params.validate()?;

    let base = params.base.build(params.color());
    if params.export == ExportFormat::Unindexed {
        check_unindexed_corners(&base, params)?;
    }
    let mut mesh = subdivide(base, params.iterations, params.sharing)?;
    mesh.normalize()?;

    if let Some(curve) = &params.curve {
        displace(&mut mesh, &params.noise, curve)?;
    }
    compute_normals(&mut mesh, params.normals);

    let export = MeshExport::from_mesh(&mesh, params.export);
    let stats = GenerationStats::measure(&mesh, start.elapsed().as_micros() as u64);

    info!(
        vertices = stats.vertices,
        triangles = stats.triangles,
        min_radius = stats.min_radius,
        max_radius = stats.max_radius,
        export = %params.export,
        elapsed_us = stats.elapsed_us,
        "Generated planet"
    );

    Ok(PlanetMesh {
        mesh,
        export,
        stats,
    })
}

/// Unindexed exports address every triangle corner with a `u32`, so the
/// corner count is bounded even when the shared vertex pool is not.
fn check_unindexed_corners(base: &IndexedMesh, params: &GenerationParams) -> Result<(), MeshError> {
    let corners = predict_counts(base, params.iterations, params.sharing)
        .and_then(|c| c.triangles.checked_mul(3));
    match corners {
        Some(n) if n <= u32::MAX as u64 + 1 => Ok(()),
        _ => Err(MeshError::IndexOverflow {
            iterations: params.iterations,
        }),
    }
}
