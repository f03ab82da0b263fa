//! Round engine binary for the WSN cluster head simulation.
//!
//! Loads configuration, builds the fuzzy inference engine once, and runs
//! rounds on the configured interval until the round limit is reached or
//! Ctrl-C is pressed. Every report is printed to stdout as a JSON line.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `wsn-config.yaml` (or `$WSN_CONFIG`)
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Validate round parameters and build the inference engine
//! 4. Pick the base seed
//! 5. Install the Ctrl-C handler
//! 6. Run the round schedule
//! 7. Log the result

mod error;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wsn_core::FuzzyEngine;
use wsn_core::config::SimulationConfig;
use wsn_core::runner::{self, RoundControl};

use crate::error::EngineError;
use crate::output::JsonLinesSink;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "wsn-config.yaml";

/// Environment variable overriding the configuration path.
const CONFIG_PATH_ENV: &str = "WSN_CONFIG";

/// Application entry point for the round engine.
///
/// # Errors
///
/// Returns an error if configuration is unreadable or invalid, or if a
/// round fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (before logging, which it configures).
    let config_path = config_path();
    let loaded = load_config(&config_path)?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("wsn-engine starting");
    if from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        node_count = config.round.node_count,
        area_size = config.round.area_size,
        neighbor_radius = config.round.neighbor_radius,
        interval_seconds = config.schedule.interval_seconds,
        max_rounds = config.schedule.max_rounds,
        "Round parameters"
    );

    // 3. Validate and build the engine.
    config.round.validate().map_err(EngineError::from)?;
    let engine = FuzzyEngine::new().map_err(EngineError::from)?;

    // 4. Pick the base seed.
    let base_seed = config.round.seed.unwrap_or_else(clock_seed);
    info!(base_seed, fixed = config.round.seed.is_some(), "Base seed chosen");

    // 5. Install the Ctrl-C handler.
    let control = Arc::new(RoundControl::new(&config.schedule));
    spawn_ctrl_c_handler(Arc::clone(&control));

    // 6. Run the schedule.
    let mut sink = JsonLinesSink::stdout();
    let result = runner::run_rounds(&config.round, &engine, &control, base_seed, &mut sink)
        .await
        .map_err(EngineError::from)?;

    // 7. Log results.
    runner::log_schedule_end(&result);
    if sink.failed_writes() > 0 {
        warn!(failed_writes = sink.failed_writes(), "Some round reports were not written");
    }

    info!(
        end_reason = ?result.end_reason,
        rounds_completed = result.rounds_completed,
        "wsn-engine shutdown complete"
    );

    Ok(())
}

/// Resolve the configuration path from `$WSN_CONFIG` or the default.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the simulation configuration, or `None` if the file is absent.
fn load_config(path: &std::path::Path) -> Result<Option<SimulationConfig>, EngineError> {
    if path.exists() {
        Ok(Some(SimulationConfig::from_file(path)?))
    } else {
        Ok(None)
    }
}

/// Seed derived from the wall clock, in nanoseconds since the epoch.
fn clock_seed() -> u64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    elapsed
        .as_secs()
        .wrapping_mul(1_000_000_000)
        .wrapping_add(u64::from(elapsed.subsec_nanos()))
}

/// Request a clean stop on the first Ctrl-C.
fn spawn_ctrl_c_handler(control: Arc<RoundControl>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping after the current round");
                control.request_stop();
            }
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl-C handler, stop with the round limit");
            }
        }
    });
}
