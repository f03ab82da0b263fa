//! Error types for a single simulation round.
//!
//! Any [`RoundError`] aborts the round it occurred in; no partial report is
//! produced. Degenerate inference for an individual node is not a round
//! failure and is recovered inside the selector (see
//! [`FuzzyEngine::score`](crate::fuzzy::FuzzyEngine::score)).

/// Errors that can occur while running a round.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoundError {
    /// A configuration value is outside its valid domain.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The selector was handed an empty node sequence.
    #[error("no nodes available for cluster head selection")]
    NoNodesAvailable,
}

impl RoundError {
    /// Shorthand for an [`RoundError::InvalidParameter`].
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}
