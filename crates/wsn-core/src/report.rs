//! Round report assembly.
//!
//! Pure reshaping of the selector's output into the [`RoundReport`] handed
//! to the display shell. Values keep full precision here; presentation
//! rounding lives in [`RoundReport::rounded`] and never feeds selection.

use wsn_types::{NodeRecord, RoundReport};

use crate::selector::{Assessment, Selection};

/// Flatten one assessment into a report row.
pub const fn record(assessment: &Assessment) -> NodeRecord {
    NodeRecord {
        id: assessment.node.id,
        x: assessment.node.position.x,
        y: assessment.node.position.y,
        energy: assessment.node.residual_energy,
        distance_to_bs: assessment.distance_to_bs,
        density: assessment.density,
        fuzzy_score: assessment.fuzzy_score,
        is_cluster_head: assessment.node.is_cluster_head,
    }
}

/// Build the round report from a selection.
pub fn build_report(selection: &Selection) -> RoundReport {
    RoundReport {
        records: selection.assessments.iter().map(record).collect(),
        cluster_head: selection.cluster_head,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use wsn_types::{Node, NodeId, Point};

    use super::*;

    fn assessment(id: u32, is_cluster_head: bool) -> Assessment {
        let mut node = Node::new(NodeId(id), Point::new(10.123_456, 20.987_654), 0.777_777);
        node.is_cluster_head = is_cluster_head;
        Assessment {
            node,
            distance_to_bs: 44.444_444,
            density: 3,
            fuzzy_score: 0.512_345_6,
        }
    }

    #[test]
    fn report_preserves_order_and_precision() {
        let selection = Selection {
            assessments: vec![assessment(0, false), assessment(1, true), assessment(2, false)],
            cluster_head: NodeId(1),
        };
        let report = build_report(&selection);

        let ids: Vec<NodeId> = report.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(report.cluster_head, NodeId(1));

        let head = report.cluster_head_record().unwrap();
        assert!(head.is_cluster_head);
        assert_eq!(head.x, 10.123_456);
        assert_eq!(head.energy, 0.777_777);
        assert_eq!(head.fuzzy_score, 0.512_345_6);
        assert_eq!(head.density, 3);
    }

    #[test]
    fn rounding_does_not_touch_source_report() {
        let selection = Selection {
            assessments: vec![assessment(0, true)],
            cluster_head: NodeId(0),
        };
        let report = build_report(&selection);
        let shown = report.rounded();
        assert_eq!(shown.records.first().map(|r| r.fuzzy_score), Some(0.512));
        assert_eq!(report.records.first().map(|r| r.fuzzy_score), Some(0.512_345_6));
    }
}
