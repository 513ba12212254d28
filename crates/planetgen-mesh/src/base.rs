//! Seed polyhedra for subdivision.
//!
//! Both seeds share the same six vertices: two apexes at `(0, ±1/√2, 0)` and
//! four equatorial points at `(±0.5, 0, ±0.5)`. Every vertex is at distance
//! `1/√2` from the origin, so the seeds are deliberately left unnormalized;
//! subdivision (or an explicit final normalization) pushes them onto the unit
//! sphere.

use glam::Vec3;

use crate::mesh::{IndexedMesh, TriangleSoup};
use crate::vertex::MeshVertex;

const APEX_Y: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// The six seed positions: top apex, bottom apex, then the equator in the
/// order the bipyramid walks it.
pub const SEED_POSITIONS: [Vec3; 6] = [
    Vec3::new(0.0, APEX_Y, 0.0),
    Vec3::new(0.0, -APEX_Y, 0.0),
    Vec3::new(-0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, -0.5),
    Vec3::new(-0.5, 0.0, -0.5),
];

/// Bipyramid triangles. The bottom fan repeats the top fan's corner order, so
/// the upper hemisphere winds outward and the lower one inward.
const BIPYRAMID_TRIANGLES: [[u32; 3]; 8] = [
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [0, 5, 2],
    [1, 2, 3],
    [1, 3, 4],
    [1, 4, 5],
    [1, 5, 2],
];

/// Octahedron triangles, all counter-clockwise seen from outside.
const OCTAHEDRON_TRIANGLES: [[u32; 3]; 8] = [
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [0, 5, 2],
    [1, 3, 2],
    [1, 4, 3],
    [1, 5, 4],
    [1, 2, 5],
];

fn seed_vertices(color: Vec3) -> Vec<MeshVertex> {
    SEED_POSITIONS
        .iter()
        .map(|&p| MeshVertex::new(p, color))
        .collect()
}

/// Bipyramid over the shared six-vertex pool.
pub fn bipyramid(color: Vec3) -> IndexedMesh {
    IndexedMesh::new(seed_vertices(color), BIPYRAMID_TRIANGLES.to_vec())
}

/// Bipyramid with each triangle carrying its own vertex copies.
pub fn bipyramid_soup(color: Vec3) -> TriangleSoup {
    let pool = seed_vertices(color);
    TriangleSoup::new(
        BIPYRAMID_TRIANGLES
            .iter()
            .map(|&[a, b, c]| [pool[a as usize], pool[b as usize], pool[c as usize]])
            .collect(),
    )
}

/// Octahedron with consistent outward winding.
pub fn octahedron(color: Vec3) -> IndexedMesh {
    IndexedMesh::new(seed_vertices(color), OCTAHEDRON_TRIANGLES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshStage;
    use crate::vertex::WHITE;
    use crate::winding::winds_outward;

    #[test]
    fn test_seeds_have_six_vertices_and_eight_triangles() {
        for mesh in [bipyramid(WHITE), octahedron(WHITE)] {
            assert_eq!(mesh.vertex_count(), 6);
            assert_eq!(mesh.triangle_count(), 8);
            assert_eq!(mesh.stage(), MeshStage::Raw);
            assert_eq!(mesh.validate(), Ok(()));
        }
        assert_eq!(bipyramid_soup(WHITE).triangle_count(), 8);
    }

    #[test]
    fn test_seed_positions_match_reference_values() {
        let mesh = bipyramid(WHITE);
        let p: Vec<Vec3> = mesh.vertices().iter().map(|v| v.position).collect();
        assert!((p[0] - Vec3::new(0.0, 0.707, 0.0)).length() < 1e-3);
        assert!((p[1] - Vec3::new(0.0, -0.707, 0.0)).length() < 1e-3);
        for eq in &p[2..] {
            assert_eq!(eq.y, 0.0);
            assert_eq!(eq.x.abs(), 0.5);
            assert_eq!(eq.z.abs(), 0.5);
        }
    }

    #[test]
    fn test_seeds_are_unnormalized() {
        for v in bipyramid(WHITE).vertices() {
            assert!((v.position.length() - APEX_Y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_normalizing_seed_gives_unit_norms() {
        let mut mesh = bipyramid(WHITE);
        mesh.normalize().unwrap();
        for v in mesh.vertices() {
            assert!((v.position.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_octahedron_winds_outward() {
        let mesh = octahedron(WHITE);
        for i in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle_positions(i);
            assert!(winds_outward(a, b, c), "triangle {i} winds inward");
        }
    }

    #[test]
    fn test_bipyramid_hemispheres_wind_oppositely() {
        let mesh = bipyramid(WHITE);
        for i in 0..4 {
            let [a, b, c] = mesh.triangle_positions(i);
            assert!(winds_outward(a, b, c));
        }
        for i in 4..8 {
            let [a, b, c] = mesh.triangle_positions(i);
            assert!(!winds_outward(a, b, c));
        }
    }

    #[test]
    fn test_soup_matches_indexed_bipyramid() {
        let soup = bipyramid_soup(WHITE);
        assert_eq!(soup, bipyramid(WHITE).to_soup());
    }
}
