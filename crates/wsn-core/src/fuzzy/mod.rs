//! Mamdani fuzzy inference for cluster head suitability.
//!
//! The engine maps three crisp node measurements to a crisp
//! cluster-head probability in `[0, 1]`:
//!
//! | Variable          | Universe              | Terms                   |
//! |-------------------|-----------------------|-------------------------|
//! | `residual_energy` | `0.0..1.1` step `0.1` | poor / average / good   |
//! | `distance_to_bs`  | `0..150` step `10`    | poor / average / good   |
//! | `node_density`    | `0..20` step `1`      | poor / average / good   |
//! | `ch_probability`  | `0.0..1.1` step `0.1` | low / medium / high     |
//!
//! Universes follow half-open `arange` semantics, so the distance universe
//! ends at 140 and the density universe at 19.
//!
//! # Pipeline
//!
//! 1. **Fuzzify** -- clip each input into its universe and grade it against
//!    the variable's three terms ([`InputVariable::fuzzify`]).
//! 2. **Fire** -- evaluate every rule's antecedent with AND = min and
//!    OR = max ([`Rule::firing_strength`]).
//! 3. **Activate** -- for each output term keep the strongest rule that
//!    concludes it.
//! 4. **Aggregate** -- clip each output term at its activation and take the
//!    pointwise max over the sampled output universe.
//! 5. **Defuzzify** -- centroid of the aggregated curve ([`centroid`]).
//!
//! When no rule fires the aggregate is empty and the centroid is undefined;
//! [`FuzzyEngine::evaluate`] reports [`FuzzyError::DegenerateInference`] and
//! [`FuzzyEngine::score`] substitutes `0.0`.
//!
//! [`centroid`]: defuzz::centroid

pub mod defuzz;
pub mod engine;
pub mod membership;
pub mod rules;
pub mod variable;

pub use engine::{Activation, FuzzyEngine};
pub use membership::Triangle;
pub use rules::{Antecedent, Fuzzified, Input, Rule, cluster_head_rules};
pub use variable::{Chance, Grades, InputVariable, OutputVariable, Quality, Universe};

/// Errors raised while building or evaluating the inference system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    /// No rule fired, so the aggregated output set is empty.
    #[error("no rule fired; aggregated output set is empty")]
    DegenerateInference,

    /// A membership function was given unordered or non-finite breakpoints.
    #[error("invalid membership shape: {reason}")]
    InvalidShape {
        /// What was wrong with the breakpoints.
        reason: String,
    },

    /// A universe of discourse could not be sampled.
    #[error("invalid universe: {reason}")]
    InvalidUniverse {
        /// What was wrong with the range or step.
        reason: String,
    },
}
