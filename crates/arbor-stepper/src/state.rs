//! Algorithm state snapshots for the execution timeline.

use std::collections::BTreeSet;

use arbor_graph::{Edge, NodeId};
use serde::{Deserialize, Serialize};

/// How a crossing edge is being traversed.
///
/// `Forward` means the stored `from` endpoint is inside the visited set;
/// `Backward` means the stored `to` endpoint is (undirected graphs only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// The edge currently under consideration, tagged with its traversal
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingEdge {
    pub edge: Edge,
    pub direction: Direction,
}

impl CrossingEdge {
    /// The endpoint outside the visited set.
    pub fn outside(&self) -> NodeId {
        match self.direction {
            Direction::Forward => self.edge.to,
            Direction::Backward => self.edge.from,
        }
    }
}

/// One row of the distance table.
///
/// `distance` is `None` while the node is unreachable from the visited set;
/// `previous` is `None` while no tentative predecessor has been recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRow {
    pub node_id: NodeId,
    pub node_name: String,
    pub visited: bool,
    pub distance: Option<f64>,
    pub previous: Option<String>,
}

impl DistanceRow {
    /// The distance as rendered in the table, with `∞` for unreachable.
    pub fn distance_label(&self) -> String {
        match self.distance {
            Some(d) => d.to_string(),
            None => "∞".to_string(),
        }
    }

    /// The predecessor as rendered in the table, with `-` for none.
    pub fn previous_label(&self) -> &str {
        self.previous.as_deref().unwrap_or("-")
    }
}

/// An immutable snapshot of the algorithm at one observable step.
///
/// Snapshots own all their data. Appending further snapshots to a log never
/// changes an earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmState {
    /// Nodes inside the growing tree
    pub visited: BTreeSet<NodeId>,
    /// Edges committed so far, in commit order
    pub mst_edges: Vec<Edge>,
    /// The edge under consideration, if this is a considering step
    pub current_edge: Option<CrossingEdge>,
    /// One row per node, in node list order
    pub distance_table: Vec<DistanceRow>,
    /// Nodes whose table row changed at this step
    pub changed_nodes: BTreeSet<NodeId>,
    /// Human-readable description of the step
    pub label: String,
}

impl AlgorithmState {
    /// Sum of the committed edge weights.
    pub fn total_weight(&self) -> f64 {
        self.mst_edges.iter().map(|e| e.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> AlgorithmState {
        AlgorithmState {
            visited: BTreeSet::from([NodeId(0), NodeId(1)]),
            mst_edges: vec![Edge::new(NodeId(0), NodeId(1), 5.0)],
            current_edge: Some(CrossingEdge {
                edge: Edge::new(NodeId(1), NodeId(2), 3.0),
                direction: Direction::Forward,
            }),
            distance_table: vec![DistanceRow {
                node_id: NodeId(2),
                node_name: "2".to_string(),
                visited: false,
                distance: Some(3.0),
                previous: Some("1".to_string()),
            }],
            changed_nodes: BTreeSet::from([NodeId(2)]),
            label: "Step 2: Considering edge (1, 2) with weight 3".to_string(),
        }
    }

    #[test]
    fn state_serialization() {
        let state = sample_state();

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("Forward"));
        assert!(json.contains("Considering edge"));

        let parsed: AlgorithmState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn outside_endpoint_follows_direction() {
        let edge = Edge::new(NodeId(3), NodeId(7), 1.0);
        let forward = CrossingEdge {
            edge,
            direction: Direction::Forward,
        };
        let backward = CrossingEdge {
            edge,
            direction: Direction::Backward,
        };

        assert_eq!(forward.outside(), NodeId(7));
        assert_eq!(backward.outside(), NodeId(3));
    }

    #[test]
    fn table_labels_render_missing_values() {
        let row = DistanceRow {
            node_id: NodeId(0),
            node_name: "0".to_string(),
            visited: false,
            distance: None,
            previous: None,
        };
        assert_eq!(row.distance_label(), "∞");
        assert_eq!(row.previous_label(), "-");

        let row = DistanceRow {
            distance: Some(2.5),
            previous: Some("4".to_string()),
            ..row
        };
        assert_eq!(row.distance_label(), "2.5");
        assert_eq!(row.previous_label(), "4");
    }

    #[test]
    fn total_weight_sums_committed_edges() {
        let state = sample_state();
        assert_eq!(state.total_weight(), 5.0);
    }
}
