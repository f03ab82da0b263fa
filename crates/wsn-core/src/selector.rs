//! Cluster head selection.
//!
//! For every node the selector measures its distance to the base station
//! and its local density, scores it through the [`FuzzyEngine`], and elects
//! the highest-scoring node. Ties go to the lowest node id.
//!
//! # Scaling
//!
//! Density is an all-pairs scan, `O(N^2)` in the node count. That is fine
//! for the tens of nodes a round deploys; a spatial index would be needed
//! for thousands, and it would have to keep the same semantics (strictly
//! inside the radius, the node itself excluded).

use tracing::debug;
use wsn_types::{Node, NodeId, Point, ScoredNode};

use crate::error::RoundError;
use crate::fuzzy::FuzzyEngine;
use crate::geometry::distance;

/// Everything the selector computed for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// The node, with `is_cluster_head` set on the winner.
    pub node: Node,
    /// Euclidean distance to the base station.
    pub distance_to_bs: f64,
    /// Number of other nodes strictly inside the neighbour radius.
    pub density: u32,
    /// Fuzzy suitability score in `[0, 1]`.
    pub fuzzy_score: f64,
}

impl Assessment {
    /// The node's score as a [`ScoredNode`].
    pub const fn scored(&self) -> ScoredNode {
        ScoredNode {
            node_id: self.node.id,
            fuzzy_score: self.fuzzy_score,
        }
    }
}

/// The selector's output: one assessment per node and the winner.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Assessments in input order.
    pub assessments: Vec<Assessment>,
    /// The elected cluster head.
    pub cluster_head: NodeId,
}

/// Count the nodes other than `nodes[index]` strictly closer than `radius`.
pub fn node_density(nodes: &[Node], index: usize, radius: f64) -> u32 {
    let Some(center) = nodes.get(index) else {
        return 0;
    };
    let count = nodes
        .iter()
        .enumerate()
        .filter(|&(other, node)| {
            other != index && distance(center.position, node.position) < radius
        })
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Pick the highest score; the first occurrence wins ties.
pub fn argmax(scores: &[ScoredNode]) -> Option<ScoredNode> {
    let mut best: Option<ScoredNode> = None;
    for &candidate in scores {
        match best {
            Some(current) if candidate.fuzzy_score <= current.fuzzy_score => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Score every node and elect the cluster head.
///
/// # Errors
///
/// Returns [`RoundError::NoNodesAvailable`] if `nodes` is empty.
pub fn select_cluster_head(
    nodes: Vec<Node>,
    base_station: Point,
    neighbor_radius: f64,
    engine: &FuzzyEngine,
) -> Result<Selection, RoundError> {
    if nodes.is_empty() {
        return Err(RoundError::NoNodesAvailable);
    }

    let densities: Vec<u32> = (0..nodes.len())
        .map(|index| node_density(&nodes, index, neighbor_radius))
        .collect();

    let mut assessments: Vec<Assessment> = nodes
        .into_iter()
        .zip(densities)
        .map(|(node, density)| {
            let distance_to_bs = distance(node.position, base_station);
            let fuzzy_score =
                engine.score(node.residual_energy, distance_to_bs, f64::from(density));
            Assessment {
                node,
                distance_to_bs,
                density,
                fuzzy_score,
            }
        })
        .collect();

    let scores: Vec<ScoredNode> = assessments.iter().map(Assessment::scored).collect();
    let winner = argmax(&scores).ok_or(RoundError::NoNodesAvailable)?;

    if let Some(head) = assessments
        .iter_mut()
        .find(|a| a.node.id == winner.node_id)
    {
        head.node.is_cluster_head = true;
    }

    debug!(
        cluster_head = %winner.node_id,
        fuzzy_score = winner.fuzzy_score,
        "Cluster head selected"
    );

    Ok(Selection {
        assessments,
        cluster_head: winner.node_id,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn engine() -> FuzzyEngine {
        FuzzyEngine::new().unwrap()
    }

    fn node(id: u32, x: f64, y: f64, energy: f64) -> Node {
        Node::new(NodeId(id), Point::new(x, y), energy)
    }

    fn three_node_scenario() -> Vec<Node> {
        vec![
            node(0, 0.0, 0.0, 1.0),
            node(1, 1.0, 1.0, 0.5),
            node(2, 99.0, 99.0, 0.1),
        ]
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = select_cluster_head(Vec::new(), Point::new(50.0, 50.0), 20.0, &engine());
        assert_eq!(result, Err(RoundError::NoNodesAvailable));
    }

    #[test]
    fn density_excludes_self_and_is_strict() {
        let nodes = vec![
            node(0, 0.0, 0.0, 0.5),
            node(1, 20.0, 0.0, 0.5),  // exactly on the radius
            node(2, 0.0, 19.9, 0.5),  // inside
            node(3, 50.0, 50.0, 0.5), // far away
        ];
        assert_eq!(node_density(&nodes, 0, 20.0), 1);
        assert_eq!(node_density(&nodes, 3, 20.0), 0);
        assert_eq!(node_density(&nodes, 9, 20.0), 0);
    }

    #[test]
    fn coincident_nodes_count_each_other() {
        let nodes = vec![node(0, 5.0, 5.0, 0.5), node(1, 5.0, 5.0, 0.5)];
        assert_eq!(node_density(&nodes, 0, 20.0), 1);
        assert_eq!(node_density(&nodes, 0, 0.0), 0);
    }

    #[test]
    fn scenario_prefers_energetic_node_at_base_station() {
        let selection =
            select_cluster_head(three_node_scenario(), Point::new(0.0, 0.0), 20.0, &engine())
                .unwrap();
        assert_eq!(selection.cluster_head, NodeId(0));

        assert_eq!(selection.assessments.len(), 3);
        let first = selection.assessments.first().unwrap();
        let second = selection.assessments.get(1).unwrap();
        let third = selection.assessments.get(2).unwrap();
        assert_eq!(first.distance_to_bs, 0.0);
        assert_eq!(first.density, 1);
        assert_eq!(second.density, 1);
        assert_eq!(third.density, 0);
        assert!(first.node.is_cluster_head);
        assert!(!second.node.is_cluster_head);
        assert!(!third.node.is_cluster_head);
        assert!(first.fuzzy_score > second.fuzzy_score);
        assert!(third.fuzzy_score < second.fuzzy_score);
        assert!(third.fuzzy_score <= 0.3);
    }

    #[test]
    fn ties_go_to_lowest_id() {
        // Mirror images around the base station, exactly one radius apart.
        let nodes = vec![node(0, 40.0, 50.0, 0.8), node(1, 60.0, 50.0, 0.8)];
        let selection =
            select_cluster_head(nodes, Point::new(50.0, 50.0), 20.0, &engine()).unwrap();
        let scores: Vec<f64> = selection.assessments.iter().map(|a| a.fuzzy_score).collect();
        assert_eq!(scores.first(), scores.get(1));
        assert_eq!(selection.cluster_head, NodeId(0));
    }

    #[test]
    fn argmax_is_stable() {
        let scores = [
            ScoredNode { node_id: NodeId(0), fuzzy_score: 0.2 },
            ScoredNode { node_id: NodeId(1), fuzzy_score: 0.7 },
            ScoredNode { node_id: NodeId(2), fuzzy_score: 0.7 },
            ScoredNode { node_id: NodeId(3), fuzzy_score: 0.1 },
        ];
        assert_eq!(argmax(&scores).map(|s| s.node_id), Some(NodeId(1)));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn all_degenerate_still_elects_first_node() {
        // Average energy at the base station fires no rule: every score is 0.
        let nodes = vec![node(0, 50.0, 50.0, 0.5), node(1, 50.0, 50.0, 0.5)];
        let selection =
            select_cluster_head(nodes, Point::new(50.0, 50.0), 20.0, &engine()).unwrap();
        assert!(selection.assessments.iter().all(|a| a.fuzzy_score == 0.0));
        assert_eq!(selection.cluster_head, NodeId(0));
    }

    #[test]
    fn exactly_one_cluster_head() {
        let nodes: Vec<Node> = (0..25)
            .map(|i| node(i, f64::from(i) * 4.0, f64::from(i % 5) * 20.0, f64::from(i % 7).mul_add(0.1, 0.3)))
            .collect();
        let selection =
            select_cluster_head(nodes, Point::new(50.0, 50.0), 20.0, &engine()).unwrap();
        let heads: Vec<NodeId> = selection
            .assessments
            .iter()
            .filter(|a| a.node.is_cluster_head)
            .map(|a| a.node.id)
            .collect();
        assert_eq!(heads, vec![selection.cluster_head]);
    }
}
