//! Error types for the round engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the round schedule.

/// Top-level error for the round engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wsn_core::config::ConfigError,
    },

    /// The inference engine could not be built.
    #[error("fuzzy engine error: {source}")]
    Fuzzy {
        /// The underlying construction error.
        #[from]
        source: wsn_core::fuzzy::FuzzyError,
    },

    /// The configured round parameters are invalid.
    #[error("round config error: {source}")]
    Round {
        /// The underlying validation error.
        #[from]
        source: wsn_core::RoundError,
    },

    /// A scheduled round failed.
    #[error("schedule error: {source}")]
    Schedule {
        /// The underlying schedule error.
        #[from]
        source: wsn_core::runner::ScheduleError,
    },
}
