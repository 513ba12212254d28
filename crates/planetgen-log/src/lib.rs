//! Structured logging for the planet viewer.
//!
//! Console output with uptime timestamps and targets, plus a JSON log file in
//! debug builds. The filter comes from `RUST_LOG` when set, otherwise from the
//! config's `debug.log_level`.

use std::path::{Path, PathBuf};

use planetgen_config::{Config, DEFAULT_LOG_FILTER};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "planetgen.log";

/// Install the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables the file layer
/// * `config` - supplies the fallback filter when `RUST_LOG` is unset
///
/// Must be called at most once per process.
///
/// ```no_run
/// use planetgen_config::Config;
/// use planetgen_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter string used when `RUST_LOG` is not set.
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}

/// Where the JSON log lands inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_gpu_crates() {
        let filter_str = format!("{}", EnvFilter::new(filter_directives(None)));
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_config_level_wins_over_default() {
        let mut config = Config::default();
        config.debug.log_level = "debug,planetgen_mesh=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,planetgen_mesh=trace");
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_LOG_FILTER);
        assert_eq!(filter_directives(None), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        for filter_str in ["info", "debug,planetgen_mesh=trace", "warn,wgpu=error", "error"] {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "Failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_log_file_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = log_file_path(temp_dir.path());
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("planetgen.log"));
        assert_eq!(path.parent(), Some(temp_dir.path()));
    }
}
