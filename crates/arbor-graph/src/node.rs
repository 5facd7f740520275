//! Nodes and their positions.
//!
//! Positions carry no algorithmic meaning. They exist so a caller can lay
//! nodes out on a plane and derive distance-based default edge weights.

/// Stable identifier for a node.
///
/// Ids are allocated by [`Graph::add_node`](crate::Graph::add_node) from a
/// counter that never goes backwards, so an id observed once stays valid for
/// the lifetime of the graph or until its node is removed. Removed ids are
/// never handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point on the editing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}

/// A node in the graph.
///
/// The default name is the decimal rendering of the id; callers can rename
/// freely without affecting identity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub position: Position,
}

impl Node {
    /// Create a node with the default name for its id.
    pub fn new(id: NodeId, position: Position) -> Self {
        Self {
            id,
            name: id.to_string(),
            position,
        }
    }
}
