//! Fuzzy cluster head selection for a simulated wireless sensor network.
//!
//! Every round deploys a fresh field of sensor nodes, scores each node with
//! a Mamdani fuzzy inference system over residual energy, distance to the
//! base station and local density, and elects the best-scoring node as the
//! round's cluster head.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `wsn-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`RoundError`], the failure modes of a single round.
//! - [`field`] -- Random node deployment from an explicit RNG.
//! - [`fuzzy`] -- Membership functions, rule base, and the inference engine.
//! - [`geometry`] -- Euclidean distance.
//! - [`report`] -- Round report assembly for the display shell.
//! - [`round`] -- [`run_round`], one complete generate/score/select pass.
//! - [`runner`] -- Async scheduler repeating rounds on an interval until
//!   stopped.
//! - [`selector`] -- Density computation, scoring, and argmax selection.
//!
//! [`RoundError`]: error::RoundError
//! [`run_round`]: round::run_round

pub mod config;
pub mod error;
pub mod field;
pub mod fuzzy;
pub mod geometry;
pub mod report;
pub mod round;
pub mod runner;
pub mod selector;

pub use error::RoundError;
pub use fuzzy::FuzzyEngine;
pub use round::{run_round, run_seeded_round};
