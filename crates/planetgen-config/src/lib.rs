//! Configuration for the planet viewer.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Unknown fields are ignored and missing ones fall back to
//! their defaults, so older and newer config files both load.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, CurveArg};
pub use config::{
    CameraConfig, Config, DEFAULT_LOG_FILTER, DebugConfig, DrawMode, RenderConfig, WindowConfig,
};
pub use error::ConfigError;

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "planetgen";

/// `<platform config dir>/planetgen`, or `None` if the platform has no config directory.
pub fn default_config_dir() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME))
}
