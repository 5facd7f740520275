//! Weighted edges.
//!
//! An edge stores the orientation it was created with. Whether that
//! orientation matters is a property of the graph, not of the edge, so the
//! pair-matching helper takes the directedness flag as an argument.

use crate::node::{NodeId, Position};
use crate::WEIGHT_SCALE;

/// A weighted edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    /// Create a new edge.
    pub const fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Self { from, to, weight }
    }

    /// Whether either endpoint is the given node.
    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }

    /// Whether both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }

    /// Whether this edge joins `from` and `to`.
    ///
    /// In a directed graph only the stored orientation matches; in an
    /// undirected graph the reversed pair matches as well.
    pub fn connects(&self, from: NodeId, to: NodeId, directed: bool) -> bool {
        if self.from == from && self.to == to {
            return true;
        }
        !directed && self.from == to && self.to == from
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.from, self.to, self.weight)
    }
}

/// Default weight for an edge between two positions.
///
/// The euclidean distance scaled by [`WEIGHT_SCALE`] and rounded to one
/// decimal place, so weights stay readable on screen regardless of how far
/// apart the nodes were placed.
pub fn default_weight(from: &Position, to: &Position) -> f64 {
    (from.distance(to) * WEIGHT_SCALE * 10.0).round() / 10.0
}
