//! `planetgen`: generate a noise-displaced icosphere planet and show it.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p planetgen-app -- --iterations 5 --curve quadratic`.
//! Pass `--no-window` to generate, log statistics, and exit.

use clap::Parser;
use planetgen_config::{CliArgs, Config, default_config_dir};
use planetgen_mesh::generate;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    planetgen_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %config_dir.display(), "Starting planetgen");

    let planet = match generate(&config.planet) {
        Ok(planet) => planet,
        Err(e) => {
            error!("Planet generation failed: {e}");
            std::process::exit(1);
        }
    };

    if args.no_window {
        let stats = planet.stats;
        info!(
            vertices = stats.vertices,
            triangles = stats.triangles,
            min_radius = stats.min_radius,
            max_radius = stats.max_radius,
            elapsed_us = stats.elapsed_us,
            "No window requested, exiting"
        );
        return;
    }

    if let Err(e) = planetgen_app::run(config, planet.export) {
        error!("Viewer failed: {e}");
        std::process::exit(1);
    }
}
