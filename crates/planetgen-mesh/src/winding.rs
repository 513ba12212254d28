//! Winding order helpers for triangles around the origin.

use glam::Vec3;

/// Signed orientation of a triangle relative to the origin.
///
/// Positive when `(v1 - v0) × (v2 - v0)` points away from the origin (the
/// triangle is counter-clockwise seen from outside), negative when it points
/// inward. The magnitude has no meaning beyond the sign.
pub fn orientation(v0: Vec3, v1: Vec3, v2: Vec3) -> f32 {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid)
}

/// Returns `true` if the triangle is counter-clockwise when seen from outside.
pub fn winds_outward(v0: Vec3, v1: Vec3, v2: Vec3) -> bool {
    orientation(v0, v1, v2) > 0.0
}
