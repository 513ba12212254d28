//! Command-line argument parsing.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use planetgen_mesh::{
    BaseShape, DisplacementCurve, EdgeSharing, ExportFormat, NoiseKind, NormalMode, ParseParamError,
};

use crate::{Config, DrawMode};

/// Displacement curve choice on the command line; `none` disables displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveArg(pub Option<DisplacementCurve>);

impl FromStr for CurveArg {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(CurveArg(None));
        }
        s.parse::<DisplacementCurve>()
            .map(|c| CurveArg(Some(c)))
            .map_err(|e| ParseParamError {
                expected: "quadratic, cosine, none",
                ..e
            })
    }
}

/// Planet viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "planetgen", about = "Procedural planet mesh generator and viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Subdivision iterations (above 8 is slow).
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Noise frequency.
    #[arg(long)]
    pub frequency: Option<f32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Noise kind (perlin, simplex).
    #[arg(long)]
    pub noise: Option<NoiseKind>,

    /// Seed solid (bipyramid, octahedron).
    #[arg(long)]
    pub base: Option<BaseShape>,

    /// Midpoint sharing (shared, per-triangle).
    #[arg(long)]
    pub sharing: Option<EdgeSharing>,

    /// Displacement curve (quadratic, cosine, none).
    #[arg(long)]
    pub curve: Option<CurveArg>,

    /// Vertex normals (placeholder, radial, smooth).
    #[arg(long)]
    pub normals: Option<NormalMode>,

    /// Export format (indexed, unindexed).
    #[arg(long)]
    pub export: Option<ExportFormat>,

    /// Initial draw mode (points, lines, triangles).
    #[arg(long)]
    pub draw_mode: Option<DrawMode>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Generate the mesh, log its statistics, and exit without opening a window.
    #[arg(long)]
    pub no_window: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(k) = args.iterations {
            self.planet.iterations = k;
        }
        if let Some(f) = args.frequency {
            self.planet.noise.frequency = f;
        }
        if let Some(seed) = args.seed {
            self.planet.noise.seed = seed;
        }
        if let Some(kind) = args.noise {
            self.planet.noise.kind = kind;
        }
        if let Some(base) = args.base {
            self.planet.base = base;
        }
        if let Some(sharing) = args.sharing {
            self.planet.sharing = sharing;
        }
        if let Some(CurveArg(curve)) = args.curve {
            self.planet.curve = curve;
        }
        if let Some(normals) = args.normals {
            self.planet.normals = normals;
        }
        if let Some(export) = args.export {
            self.planet.export = export;
        }
        if let Some(mode) = args.draw_mode {
            self.render.draw_mode = mode;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
