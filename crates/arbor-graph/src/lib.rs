//! Arbor Graph Model
//!
//! Weighted graph model with stable node identity and insertion-ordered edges.
//!
//! # Identity
//!
//! Node ids are allocated from a monotonically increasing counter and are
//! never reused, even after deletions. Every edge refers to its endpoints by
//! id, so renaming or moving a node never invalidates an edge.
//!
//! # Ordering
//!
//! Nodes and edges keep their insertion order. Downstream consumers rely on
//! the edge order as a deterministic tie-break, so the model never reorders
//! either list behind the caller's back.
//!
//! # Editing invariants
//!
//! Self-loops and duplicate edges over the same endpoint pair (unordered when
//! the graph is undirected, ordered when directed) are rejected at edit time.

mod edge;
mod error;
mod graph;
mod node;

pub use edge::{default_weight, Edge};
pub use error::{Error, Result};
pub use graph::Graph;
pub use node::{Node, NodeId, Position};

/// Scale applied to the euclidean distance between two node positions when
/// deriving a default edge weight.
pub const WEIGHT_SCALE: f64 = 0.05;
