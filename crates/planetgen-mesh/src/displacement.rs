//! Radial displacement of a unit sphere mesh by 3D gradient noise.
//!
//! Every vertex `v` is sampled as `N(v · frequency)`, the sample is clamped to
//! `[-1, 1]`, mapped through a [`DisplacementCurve`] to a radius, and the vertex
//! is scaled to that radius. The pass runs exactly once per mesh.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use noise::{NoiseFn, Perlin, Simplex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MeshError, ParseParamError};
use crate::mesh::{IndexedMesh, MeshStage, TriangleSoup};

/// How far a soup corner may stray from unit length and still count as normalized.
const UNIT_TOLERANCE: f32 = 1e-4;

/// Which gradient noise to sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseKind {
    #[default]
    Perlin,
    Simplex,
}

impl NoiseKind {
    const NAMES: &'static str = "perlin, simplex";
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoiseKind::Perlin => "perlin",
            NoiseKind::Simplex => "simplex",
        })
    }
}

impl FromStr for NoiseKind {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "perlin" => Ok(NoiseKind::Perlin),
            "simplex" => Ok(NoiseKind::Simplex),
            _ => Err(ParseParamError {
                kind: "noise",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Noise source configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub kind: NoiseKind,
    /// Permutation seed. Equal seeds give bit-identical displacement.
    pub seed: u32,
    /// Scale applied to the unit position before sampling. Higher values give
    /// more, smaller features.
    pub frequency: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Perlin,
            seed: 0,
            frequency: 2.0,
        }
    }
}

impl NoiseParams {
    pub fn validate(&self) -> Result<(), MeshError> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(MeshError::InvalidFrequency(self.frequency));
        }
        Ok(())
    }
}

/// Maps a clamped noise sample to a radius in `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DisplacementCurve {
    /// `t = clamp(-n, 0, 1)`, `radius = min + (max - min)(1 - t)²`.
    ///
    /// Non-negative samples leave the vertex at `max`; negative samples dig
    /// valleys with a flat floor.
    QuadraticEaseOut { min: f32, max: f32 },
    /// `t = -n`, `t2 = (1 - cos(tπ)) / 2`, `radius = min(1 - t2) + max·t2`.
    ///
    /// Symmetric in the sample: zero noise sits at `min`, both extremes reach `max`.
    CosineEase { min: f32, max: f32 },
}

impl Default for DisplacementCurve {
    fn default() -> Self {
        DisplacementCurve::CosineEase { min: 0.9, max: 1.0 }
    }
}

impl DisplacementCurve {
    const NAMES: &'static str = "quadratic, cosine";

    /// The quadratic curve with its usual bounds `(0.95, 1.0)`.
    pub fn quadratic() -> Self {
        DisplacementCurve::QuadraticEaseOut {
            min: 0.95,
            max: 1.0,
        }
    }

    /// The cosine curve with its usual bounds `(0.9, 1.0)`.
    pub fn cosine() -> Self {
        DisplacementCurve::default()
    }

    /// `(min, max)` radius bounds.
    pub fn bounds(&self) -> (f32, f32) {
        match *self {
            DisplacementCurve::QuadraticEaseOut { min, max }
            | DisplacementCurve::CosineEase { min, max } => (min, max),
        }
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let (min, max) = self.bounds();
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(MeshError::InvalidCurveBounds { min, max });
        }
        Ok(())
    }

    /// Radius for a noise sample. The sample is clamped to `[-1, 1]` first.
    pub fn radius(&self, sample: f32) -> f32 {
        let n = sample.clamp(-1.0, 1.0);
        match *self {
            DisplacementCurve::QuadraticEaseOut { min, max } => {
                let t = (-n).clamp(0.0, 1.0);
                let ease = (1.0 - t) * (1.0 - t);
                min + (max - min) * ease
            }
            DisplacementCurve::CosineEase { min, max } => {
                let t = -n;
                let t2 = (1.0 - (t * std::f32::consts::PI).cos()) / 2.0;
                (min * (1.0 - t2) + max * t2).clamp(min, max)
            }
        }
    }
}

impl fmt::Display for DisplacementCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplacementCurve::QuadraticEaseOut { min, max } => write!(f, "quadratic({min}, {max})"),
            DisplacementCurve::CosineEase { min, max } => write!(f, "cosine({min}, {max})"),
        }
    }
}

/// Parses a curve name into that curve with its usual bounds.
impl FromStr for DisplacementCurve {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quadratic" => Ok(Self::quadratic()),
            "cosine" => Ok(Self::cosine()),
            _ => Err(ParseParamError {
                kind: "displacement curve",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// A seeded noise source scaled by the configured frequency.
pub struct NoiseSampler {
    source: NoiseSource,
    frequency: f64,
}

enum NoiseSource {
    Perlin(Perlin),
    Simplex(Simplex),
}

impl NoiseSampler {
    pub fn new(params: &NoiseParams) -> Result<Self, MeshError> {
        params.validate()?;
        let source = match params.kind {
            NoiseKind::Perlin => NoiseSource::Perlin(Perlin::new(params.seed)),
            NoiseKind::Simplex => NoiseSource::Simplex(Simplex::new(params.seed)),
        };
        Ok(Self {
            source,
            frequency: params.frequency as f64,
        })
    }

    /// Sample at `p · frequency`, clamped to `[-1, 1]`.
    pub fn sample(&self, p: Vec3) -> f32 {
        let point = [
            p.x as f64 * self.frequency,
            p.y as f64 * self.frequency,
            p.z as f64 * self.frequency,
        ];
        let value = match &self.source {
            NoiseSource::Perlin(n) => n.get(point),
            NoiseSource::Simplex(n) => n.get(point),
        };
        value.clamp(-1.0, 1.0) as f32
    }
}

/// Displace every vertex of a normalized mesh.
///
/// Fails with [`MeshError::NotNormalized`] on a raw mesh and with
/// [`MeshError::AlreadyDisplaced`] on a second call. The mesh is untouched on error.
pub fn displace(
    mesh: &mut IndexedMesh,
    noise: &NoiseParams,
    curve: &DisplacementCurve,
) -> Result<(), MeshError> {
    match mesh.stage {
        MeshStage::Raw => return Err(MeshError::NotNormalized),
        MeshStage::Displaced => return Err(MeshError::AlreadyDisplaced),
        MeshStage::Normalized => {}
    }
    curve.validate()?;
    let sampler = NoiseSampler::new(noise)?;

    for v in &mut mesh.vertices {
        v.position *= curve.radius(sampler.sample(v.position));
    }
    mesh.stage = MeshStage::Displaced;

    debug!(
        vertices = mesh.vertex_count(),
        noise = %noise.kind,
        seed = noise.seed,
        frequency = noise.frequency,
        curve = %curve,
        "displaced"
    );
    Ok(())
}

/// Displace every corner of a normalized soup.
///
/// A soup does not track its stage, so each corner is checked for unit length
/// instead. Corners shared between triangles are bit-identical and so receive
/// the same radius.
pub fn displace_soup(
    soup: &mut TriangleSoup,
    noise: &NoiseParams,
    curve: &DisplacementCurve,
) -> Result<(), MeshError> {
    curve.validate()?;
    let sampler = NoiseSampler::new(noise)?;

    if soup
        .corners()
        .any(|v| (v.position.length() - 1.0).abs() > UNIT_TOLERANCE)
    {
        return Err(MeshError::NotNormalized);
    }

    for corners in &mut soup.triangles {
        for v in corners.iter_mut() {
            v.position *= curve.radius(sampler.sample(v.position));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{bipyramid_soup, octahedron};
    use crate::subdivide::{EdgeSharing, subdivide, subdivide_soup};
    use crate::vertex::WHITE;

    const TOLERANCE: f32 = 1e-5;

    fn sphere(k: u32) -> IndexedMesh {
        subdivide(octahedron(WHITE), k, EdgeSharing::Shared).unwrap()
    }

    fn assert_norms_within(mesh: &IndexedMesh, min: f32, max: f32) {
        for v in mesh.vertices() {
            let r = v.position.length();
            assert!(
                r >= min - TOLERANCE && r <= max + TOLERANCE,
                "radius {r} outside [{min}, {max}]"
            );
        }
    }

    #[test]
    fn test_cosine_curve_reference_points() {
        let curve = DisplacementCurve::CosineEase { min: 0.9, max: 1.0 };
        assert!((curve.radius(0.0) - 0.9).abs() < 1e-6);
        assert!((curve.radius(-1.0) - 1.0).abs() < 1e-6);
        assert!((curve.radius(1.0) - 1.0).abs() < 1e-6);
        assert!((curve.radius(-0.5) - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_quadratic_curve_reference_points() {
        let curve = DisplacementCurve::QuadraticEaseOut {
            min: 0.95,
            max: 1.0,
        };
        assert!((curve.radius(0.0) - 1.0).abs() < 1e-6);
        assert!((curve.radius(0.7) - 1.0).abs() < 1e-6);
        assert!((curve.radius(-1.0) - 0.95).abs() < 1e-6);
        assert!((curve.radius(-0.5) - 0.9625).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_sample_is_clamped() {
        for curve in [DisplacementCurve::quadratic(), DisplacementCurve::cosine()] {
            assert_eq!(curve.radius(-3.0), curve.radius(-1.0));
            assert_eq!(curve.radius(3.0), curve.radius(1.0));
        }
    }

    #[test]
    fn test_displaced_norms_stay_within_bounds() {
        for kind in [NoiseKind::Perlin, NoiseKind::Simplex] {
            for curve in [DisplacementCurve::quadratic(), DisplacementCurve::cosine()] {
                let mut mesh = sphere(4);
                let noise = NoiseParams {
                    kind,
                    seed: 7,
                    frequency: 3.0,
                };
                displace(&mut mesh, &noise, &curve).unwrap();
                let (min, max) = curve.bounds();
                assert_norms_within(&mesh, min, max);
                assert_eq!(mesh.stage(), MeshStage::Displaced);
            }
        }
    }

    #[test]
    fn test_displacement_actually_moves_vertices() {
        let mut mesh = sphere(4);
        displace(&mut mesh, &NoiseParams::default(), &DisplacementCurve::cosine()).unwrap();
        let radii: Vec<f32> = mesh.vertices().iter().map(|v| v.position.length()).collect();
        let lo = radii.iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = radii.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(hi - lo > 1e-3, "displacement left the sphere flat");
    }

    #[test]
    fn test_displacement_is_deterministic() {
        let noise = NoiseParams {
            kind: NoiseKind::Simplex,
            seed: 42,
            frequency: 2.5,
        };
        let mut a = sphere(3);
        let mut b = sphere(3);
        displace(&mut a, &noise, &DisplacementCurve::cosine()).unwrap();
        displace(&mut b, &noise, &DisplacementCurve::cosine()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_raw_mesh_is_refused() {
        let mut mesh = octahedron(WHITE);
        assert_eq!(
            displace(&mut mesh, &NoiseParams::default(), &DisplacementCurve::default()),
            Err(MeshError::NotNormalized)
        );
    }

    #[test]
    fn test_second_displacement_is_refused() {
        let mut mesh = sphere(2);
        let noise = NoiseParams::default();
        let curve = DisplacementCurve::default();
        displace(&mut mesh, &noise, &curve).unwrap();
        let before = mesh.clone();
        assert_eq!(
            displace(&mut mesh, &noise, &curve),
            Err(MeshError::AlreadyDisplaced)
        );
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_invalid_frequency_rejected() {
        for frequency in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut mesh = sphere(1);
            let noise = NoiseParams {
                frequency,
                ..NoiseParams::default()
            };
            let err = displace(&mut mesh, &noise, &DisplacementCurve::default()).unwrap_err();
            assert!(matches!(err, MeshError::InvalidFrequency(_)));
            assert_eq!(mesh.stage(), MeshStage::Normalized);
        }
    }

    #[test]
    fn test_invalid_curve_bounds_rejected() {
        for (min, max) in [(0.0, 1.0), (1.1, 1.0), (-0.5, 1.0), (f32::NAN, 1.0)] {
            let curve = DisplacementCurve::CosineEase { min, max };
            assert!(matches!(
                curve.validate(),
                Err(MeshError::InvalidCurveBounds { .. })
            ));
        }
        assert_eq!(
            DisplacementCurve::QuadraticEaseOut { min: 1.0, max: 1.0 }.validate(),
            Ok(())
        );
    }

    #[test]
    fn test_soup_displacement_matches_indexed() {
        let noise = NoiseParams::default();
        let curve = DisplacementCurve::cosine();

        let mut indexed = subdivide(crate::base::bipyramid(WHITE), 3, EdgeSharing::Shared).unwrap();
        displace(&mut indexed, &noise, &curve).unwrap();

        let mut soup = subdivide_soup(bipyramid_soup(WHITE), 3).unwrap();
        displace_soup(&mut soup, &noise, &curve).unwrap();

        for (a, b) in indexed.to_soup().corners().zip(soup.corners()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn test_unnormalized_soup_is_refused() {
        let mut soup = bipyramid_soup(WHITE);
        assert_eq!(
            displace_soup(&mut soup, &NoiseParams::default(), &DisplacementCurve::default()),
            Err(MeshError::NotNormalized)
        );
    }

    #[test]
    fn test_names_parse() {
        assert_eq!("simplex".parse::<NoiseKind>(), Ok(NoiseKind::Simplex));
        assert_eq!("Perlin".parse::<NoiseKind>(), Ok(NoiseKind::Perlin));
        assert_eq!(
            "quadratic".parse::<DisplacementCurve>(),
            Ok(DisplacementCurve::quadratic())
        );
        assert!("worley".parse::<NoiseKind>().is_err());
    }
}
