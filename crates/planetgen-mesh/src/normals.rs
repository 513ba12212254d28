//! Per-vertex normal assignment.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ParseParamError;
use crate::mesh::IndexedMesh;
use crate::vertex::PLACEHOLDER_NORMAL;

/// How vertex normals are filled in after displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalMode {
    /// Every vertex keeps the constant `(0, 1, 0)`.
    #[default]
    Placeholder,
    /// The normalized position, as if the surface were a perfect sphere.
    Radial,
    /// Area-weighted average of the adjacent face normals.
    Smooth,
}

impl NormalMode {
    const NAMES: &'static str = "placeholder, radial, smooth";
}

impl fmt::Display for NormalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NormalMode::Placeholder => "placeholder",
            NormalMode::Radial => "radial",
            NormalMode::Smooth => "smooth",
        })
    }
}

impl FromStr for NormalMode {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "placeholder" => Ok(NormalMode::Placeholder),
            "radial" => Ok(NormalMode::Radial),
            "smooth" => Ok(NormalMode::Smooth),
            _ => Err(ParseParamError {
                kind: "normal mode",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Overwrite every vertex normal according to `mode`.
pub fn compute_normals(mesh: &mut IndexedMesh, mode: NormalMode) {
    match mode {
        NormalMode::Placeholder => {
            for v in &mut mesh.vertices {
                v.normal = PLACEHOLDER_NORMAL;
            }
        }
        NormalMode::Radial => {
            for v in &mut mesh.vertices {
                v.normal = v.position.normalize_or(PLACEHOLDER_NORMAL);
            }
        }
        NormalMode::Smooth => smooth_normals(mesh),
    }
}

fn smooth_normals(mesh: &mut IndexedMesh) {
    let mut accum = vec![Vec3::ZERO; mesh.vertices.len()];

    for &[a, b, c] in &mesh.triangles {
        let pa = mesh.vertices[a as usize].position;
        let pb = mesh.vertices[b as usize].position;
        let pc = mesh.vertices[c as usize].position;

        // Cross product length is twice the area, which gives the weighting for free.
        let mut face = (pb - pa).cross(pc - pa);
        if face.dot(pa + pb + pc) < 0.0 {
            face = -face;
        }
        accum[a as usize] += face;
        accum[b as usize] += face;
        accum[c as usize] += face;
    }

    for (v, n) in mesh.vertices.iter_mut().zip(accum) {
        let radial = v.position.normalize_or(PLACEHOLDER_NORMAL);
        v.normal = n.normalize_or(radial);
    }
}
