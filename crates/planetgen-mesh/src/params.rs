//! Everything that determines a generated planet.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::base::{bipyramid, octahedron};
use crate::displacement::{DisplacementCurve, NoiseParams};
use crate::error::{MeshError, ParseParamError};
use crate::export::ExportFormat;
use crate::mesh::IndexedMesh;
use crate::normals::NormalMode;
use crate::subdivide::EdgeSharing;

/// The seed solid subdivision starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseShape {
    /// Reference bipyramid; its two hemispheres wind oppositely.
    Bipyramid,
    /// Same six vertices, every triangle wound outward.
    #[default]
    Octahedron,
}

impl BaseShape {
    const NAMES: &'static str = "bipyramid, octahedron";

    pub fn build(self, color: Vec3) -> IndexedMesh {
        match self {
            BaseShape::Bipyramid => bipyramid(color),
            BaseShape::Octahedron => octahedron(color),
        }
    }
}

impl fmt::Display for BaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BaseShape::Bipyramid => "bipyramid",
            BaseShape::Octahedron => "octahedron",
        })
    }
}

impl FromStr for BaseShape {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bipyramid" => Ok(BaseShape::Bipyramid),
            "octahedron" => Ok(BaseShape::Octahedron),
            _ => Err(ParseParamError {
                kind: "base shape",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Parameters for [`generate`](crate::generate).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub base: BaseShape,
    /// Subdivision iterations. Anything above 8 is slow; see
    /// [`PRACTICAL_ITERATION_LIMIT`](crate::PRACTICAL_ITERATION_LIMIT).
    pub iterations: u32,
    pub sharing: EdgeSharing,
    pub noise: NoiseParams,
    /// `None` leaves the planet a perfect unit sphere.
    pub curve: Option<DisplacementCurve>,
    pub normals: NormalMode,
    /// Linear RGB applied to every vertex.
    pub color: [f32; 3],
    pub export: ExportFormat,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            base: BaseShape::Octahedron,
            iterations: 4,
            sharing: EdgeSharing::Shared,
            noise: NoiseParams::default(),
            curve: Some(DisplacementCurve::default()),
            normals: NormalMode::Placeholder,
            color: [1.0, 1.0, 1.0],
            export: ExportFormat::Indexed,
        }
    }
}

impl GenerationParams {
    /// Check every numeric parameter without generating anything.
    pub fn validate(&self) -> Result<(), MeshError> {
        if let Some(curve) = &self.curve {
            self.noise.validate()?;
            curve.validate()?;
        }
        Ok(())
    }

    pub fn color(&self) -> Vec3 {
        Vec3::from_array(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = GenerationParams::default();
        assert_eq!(p.base, BaseShape::Octahedron);
        assert_eq!(p.sharing, EdgeSharing::Shared);
        assert_eq!(p.export, ExportFormat::Indexed);
        assert_eq!(p.normals, NormalMode::Placeholder);
        assert_eq!(p.curve, Some(DisplacementCurve::CosineEase { min: 0.9, max: 1.0 }));
        assert_eq!(p.color(), Vec3::ONE);
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn test_validate_catches_bad_noise_and_curve() {
        let mut p = GenerationParams::default();
        p.noise.frequency = -2.0;
        assert_eq!(p.validate(), Err(MeshError::InvalidFrequency(-2.0)));

        let mut p = GenerationParams::default();
        p.curve = Some(DisplacementCurve::QuadraticEaseOut { min: 1.0, max: 0.5 });
        assert!(matches!(p.validate(), Err(MeshError::InvalidCurveBounds { .. })));
    }

    #[test]
    fn test_noise_ignored_without_curve() {
        let mut p = GenerationParams::default();
        p.curve = None;
        p.noise.frequency = 0.0;
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn test_ron_roundtrip_with_partial_input() {
        let p: GenerationParams = ron::from_str("(iterations: 3, base: Bipyramid)").unwrap();
        assert_eq!(p.iterations, 3);
        assert_eq!(p.base, BaseShape::Bipyramid);
        assert_eq!(p.noise, NoiseParams::default());

        let text = ron::to_string(&p).unwrap();
        let back: GenerationParams = ron::from_str(&text).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_base_shape_parse_error_lists_choices() {
        let err = "cube".parse::<BaseShape>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown base shape 'cube', expected one of: bipyramid, octahedron"
        );
    }
}
