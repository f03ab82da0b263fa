//! Configuration loading and typed config structures for the WSN simulation.
//!
//! The canonical configuration lives in `wsn-config.yaml` next to the
//! engine binary's working directory. This module defines strongly-typed
//! structs that mirror the YAML structure, and provides a loader that reads
//! and parses the file. Every field has a default, so an empty document (or
//! no file at all) yields the reference deployment: 30 nodes in a 100x100
//! field with the base station at its centre.

use std::path::Path;

use serde::Deserialize;
use wsn_types::Point;

use crate::error::RoundError;
use crate::field::FieldSpec;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `wsn-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Parameters of a single round (deployment and selection).
    #[serde(default)]
    pub round: RoundConfig,

    /// Repeat-loop parameters used by the engine shell.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Parameters for one simulation round.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundConfig {
    /// Number of sensor nodes deployed each round.
    #[serde(default = "default_node_count")]
    pub node_count: u32,

    /// Side length of the square deployment area.
    #[serde(default = "default_area_size")]
    pub area_size: f64,

    /// Lower bound of the residual energy draw.
    #[serde(default = "default_energy_min")]
    pub energy_min: f64,

    /// Upper bound of the residual energy draw.
    #[serde(default = "default_energy_max")]
    pub energy_max: f64,

    /// Fixed base station location.
    #[serde(default = "default_base_station")]
    pub base_station: Point,

    /// Nodes strictly closer than this count towards a node's density.
    #[serde(default = "default_neighbor_radius")]
    pub neighbor_radius: f64,

    /// Seed for reproducible rounds. `None` lets the shell pick one.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            node_count: default_node_count(),
            area_size: default_area_size(),
            energy_min: default_energy_min(),
            energy_max: default_energy_max(),
            base_station: default_base_station(),
            neighbor_radius: default_neighbor_radius(),
            seed: None,
        }
    }
}

impl RoundConfig {
    /// Check every parameter before any node is generated.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::InvalidParameter`] for a zero node count, a
    /// non-positive area, inverted or non-finite energy bounds, a negative
    /// neighbour radius, or a non-finite base station.
    pub fn validate(&self) -> Result<(), RoundError> {
        FieldSpec::from(self).validate()?;
        if !self.neighbor_radius.is_finite() || self.neighbor_radius < 0.0 {
            return Err(RoundError::invalid(
                "neighbor_radius",
                format!("must be a non-negative finite length, got {}", self.neighbor_radius),
            ));
        }
        if !self.base_station.x.is_finite() || !self.base_station.y.is_finite() {
            return Err(RoundError::invalid("base_station", "coordinates must be finite"));
        }
        Ok(())
    }
}

/// Repeat-loop configuration for the engine shell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds to wait between rounds (clamped to 1..=20).
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Stop after this many rounds (0 = unlimited).
    #[serde(default)]
    pub max_rounds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            max_rounds: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_node_count() -> u32 {
    30
}

const fn default_area_size() -> f64 {
    100.0
}

const fn default_energy_min() -> f64 {
    0.3
}

const fn default_energy_max() -> f64 {
    1.0
}

const fn default_base_station() -> Point {
    Point::new(50.0, 50.0)
}

const fn default_neighbor_radius() -> f64 {
    20.0
}

const fn default_interval_seconds() -> u64 {
    10
}

fn default_log_level() -> String {
    String::from("info")
}
