//! Node field generation.
//!
//! A round starts by scattering `N` sensor nodes uniformly over a square
//! deployment area, each with a uniformly drawn residual energy. The RNG is
//! always supplied by the caller so that rounds are reproducible under a
//! fixed seed; nothing here reaches for thread-local or time-based
//! randomness.

use rand::Rng;
use tracing::debug;
use wsn_types::{Node, NodeId, Point};

use crate::config::RoundConfig;
use crate::error::RoundError;

/// Parameters of a node deployment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Number of nodes to deploy.
    pub node_count: u32,
    /// Side length of the square area; positions fall in `[0, area_size)`.
    pub area_size: f64,
    /// Lower bound of residual energy (inclusive).
    pub energy_min: f64,
    /// Upper bound of residual energy (inclusive).
    pub energy_max: f64,
}

impl FieldSpec {
    /// Check the deployment parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::InvalidParameter`] if `node_count` is zero, the
    /// area is not a positive finite length, or the energy bounds are
    /// non-finite or inverted.
    pub fn validate(&self) -> Result<(), RoundError> {
        if self.node_count == 0 {
            return Err(RoundError::invalid("node_count", "must be at least 1"));
        }
        if !self.area_size.is_finite() || self.area_size <= 0.0 {
            return Err(RoundError::invalid(
                "area_size",
                format!("must be a positive finite length, got {}", self.area_size),
            ));
        }
        if !self.energy_min.is_finite() || !self.energy_max.is_finite() {
            return Err(RoundError::invalid("energy_min", "energy bounds must be finite"));
        }
        if self.energy_min > self.energy_max {
            return Err(RoundError::invalid(
                "energy_min",
                format!(
                    "must not exceed energy_max ({} > {})",
                    self.energy_min, self.energy_max
                ),
            ));
        }
        Ok(())
    }
}

impl From<&RoundConfig> for FieldSpec {
    fn from(config: &RoundConfig) -> Self {
        Self {
            node_count: config.node_count,
            area_size: config.area_size,
            energy_min: config.energy_min,
            energy_max: config.energy_max,
        }
    }
}

/// Deploy a fresh field of nodes.
///
/// Positions are drawn from `[0, area_size) x [0, area_size)` and residual
/// energy from `[energy_min, energy_max]`. Node ids run densely from `0`.
///
/// # Errors
///
/// Returns [`RoundError::InvalidParameter`] if `spec` fails
/// [`FieldSpec::validate`]; no randomness is consumed in that case.
pub fn generate_nodes<R: Rng + ?Sized>(
    spec: &FieldSpec,
    rng: &mut R,
) -> Result<Vec<Node>, RoundError> {
    spec.validate()?;

    let nodes: Vec<Node> = (0..spec.node_count)
        .map(|index| {
            let x = rng.random_range(0.0..spec.area_size);
            let y = rng.random_range(0.0..spec.area_size);
            let energy = rng.random_range(spec.energy_min..=spec.energy_max);
            Node::new(NodeId(index), Point::new(x, y), energy)
        })
        .collect();

    debug!(
        node_count = nodes.len(),
        area_size = spec.area_size,
        "Node field generated"
    );
    Ok(nodes)
}
