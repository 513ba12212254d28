//! Configuration structs with defaults and RON persistence.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use planetgen_mesh::{GenerationParams, ParseParamError};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Log filter when neither `RUST_LOG` nor the config says otherwise.
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub debug: DebugConfig,
    /// Everything that shapes the generated mesh.
    pub planet: GenerationParams,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Base window title; the draw mode is appended.
    pub title: String,
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Eye distance from the planet center at startup.
    pub start_distance: f32,
    /// Closest the eye may get; keeps the camera outside the planet.
    pub min_distance: f32,
    /// Degrees of rotation per pixel of mouse drag.
    pub mouse_sensitivity: f32,
    /// Distance moved per scroll wheel notch.
    pub zoom_step: f32,
}

/// How the mesh is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    Points,
    Lines,
    Triangles,
}

impl DrawMode {
    pub const ALL: [DrawMode; 3] = [DrawMode::Points, DrawMode::Lines, DrawMode::Triangles];

    pub fn label(self) -> &'static str {
        match self {
            DrawMode::Points => "points",
            DrawMode::Lines => "lines",
            DrawMode::Triangles => "triangles",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DrawMode {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawMode::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseParamError {
                kind: "draw mode",
                value: s.to_string(),
                expected: "points, lines, triangles",
            })
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Linear RGB background.
    pub clear_color: [f32; 3],
    /// Draw mode at startup.
    pub draw_mode: DrawMode,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter used when `RUST_LOG` is not set (e.g. "debug", "info,wgpu=warn").
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
            title: "Planet thingy".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 1.0,
            far: 100.0,
            start_distance: 5.0,
            min_distance: 1.5,
            mouse_sensitivity: 1.0,
            zoom_step: 1.0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.1],
            draw_mode: DrawMode::Points,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read `config.ron`: `Some(new_config)` if it differs from `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
