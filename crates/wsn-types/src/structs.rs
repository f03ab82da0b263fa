//! Core entity structs for the WSN cluster head simulation.
//!
//! Covers the deployment geometry (`Point`), the per-round sensor `Node`,
//! the ephemeral `ScoredNode`, and the `RoundReport` handed to the display
//! shell at the end of every round.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::NodeId;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A position in the deployment area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A sensor node deployed for one round.
///
/// Nodes are created fresh every round and discarded when the round ends.
/// The only mutation after creation is setting `is_cluster_head` on the
/// winning node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Node {
    /// Dense identifier within the round.
    pub id: NodeId,
    /// Position in the deployment area.
    pub position: Point,
    /// Remaining battery energy, normalised to the configured bounds.
    pub residual_energy: f64,
    /// Whether this node was selected as the round's cluster head.
    #[serde(default)]
    pub is_cluster_head: bool,
}

impl Node {
    /// Create a node that has not (yet) been selected.
    pub const fn new(id: NodeId, position: Point, residual_energy: f64) -> Self {
        Self {
            id,
            position,
            residual_energy,
            is_cluster_head: false,
        }
    }
}

/// A node's fuzzy suitability score, produced once per node per round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScoredNode {
    /// The scored node.
    pub node_id: NodeId,
    /// Defuzzified cluster-head probability in `[0, 1]`.
    pub fuzzy_score: f64,
}

// ---------------------------------------------------------------------------
// Round report
// ---------------------------------------------------------------------------

/// One row of the round report: everything computed for a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NodeRecord {
    /// Node identifier.
    pub id: NodeId,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Residual energy.
    pub energy: f64,
    /// Euclidean distance to the base station.
    pub distance_to_bs: f64,
    /// Number of other nodes strictly inside the neighbour radius.
    pub density: u32,
    /// Fuzzy cluster-head score in `[0, 1]`.
    pub fuzzy_score: f64,
    /// Whether this node is the round's cluster head.
    pub is_cluster_head: bool,
}

impl NodeRecord {
    /// Return a copy rounded for presentation.
    ///
    /// Coordinates and distance keep two decimals, energy and score keep
    /// three. The rounded copy is for display only and must never be fed
    /// back into selection.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            id: self.id,
            x: round_to(self.x, 2),
            y: round_to(self.y, 2),
            energy: round_to(self.energy, 3),
            distance_to_bs: round_to(self.distance_to_bs, 2),
            density: self.density,
            fuzzy_score: round_to(self.fuzzy_score, 3),
            is_cluster_head: self.is_cluster_head,
        }
    }
}

/// The outcome of one simulation round.
///
/// Records are ordered by node id. Exactly one record carries
/// `is_cluster_head == true`, and it is the one named by `cluster_head`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RoundReport {
    /// Per-node rows in id order.
    pub records: Vec<NodeRecord>,
    /// The selected cluster head.
    pub cluster_head: NodeId,
}

impl RoundReport {
    /// Return the record of the selected cluster head.
    pub fn cluster_head_record(&self) -> Option<&NodeRecord> {
        self.records.iter().find(|r| r.id == self.cluster_head)
    }

    /// Number of nodes in the round.
    pub fn node_count(&self) -> usize {
        self.records.len()
    }

    /// Return a copy with every record rounded for presentation.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            records: self.records.iter().map(NodeRecord::rounded).collect(),
            cluster_head: self.cluster_head,
        }
    }
}

/// Round `value` to `decimals` places, half away from zero.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
