//! One simulation round: generate, score, select, report.
//!
//! A round is a single synchronous computation with no shared mutable
//! state. Any failure aborts the round before a report exists, so callers
//! never see a partial [`RoundReport`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use wsn_types::RoundReport;

use crate::config::RoundConfig;
use crate::error::RoundError;
use crate::field::{FieldSpec, generate_nodes};
use crate::fuzzy::FuzzyEngine;
use crate::report::build_report;
use crate::selector::select_cluster_head;

/// Run one round with the supplied randomness source.
///
/// # Errors
///
/// Returns [`RoundError::InvalidParameter`] if `config` fails validation
/// (checked before any randomness is consumed), or
/// [`RoundError::NoNodesAvailable`] if selection receives no nodes.
pub fn run_round<R: Rng + ?Sized>(
    config: &RoundConfig,
    engine: &FuzzyEngine,
    rng: &mut R,
) -> Result<RoundReport, RoundError> {
    config.validate()?;

    let nodes = generate_nodes(&FieldSpec::from(config), rng)?;
    let selection =
        select_cluster_head(nodes, config.base_station, config.neighbor_radius, engine)?;
    let report = build_report(&selection);

    let head_score = report.cluster_head_record().map_or(0.0, |r| r.fuzzy_score);
    info!(
        node_count = report.node_count(),
        cluster_head = %report.cluster_head,
        fuzzy_score = head_score,
        "Round complete"
    );

    Ok(report)
}

/// Run one round seeded from `config.seed`.
///
/// Two calls with the same config produce identical reports.
///
/// # Errors
///
/// Returns [`RoundError::InvalidParameter`] if `config.seed` is `None` or
/// any other parameter is invalid.
pub fn run_seeded_round(
    config: &RoundConfig,
    engine: &FuzzyEngine,
) -> Result<RoundReport, RoundError> {
    let seed = config.seed.ok_or_else(|| {
        RoundError::invalid("seed", "a seed is required for a reproducible round")
    })?;
    let mut rng = StdRng::seed_from_u64(seed);
    run_round(config, engine, &mut rng)
}
