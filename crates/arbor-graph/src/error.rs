//! Error types for graph editing.

use thiserror::Error;

use crate::node::NodeId;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by graph editing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A referenced node id is not in the graph
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// No edge joins the given endpoints
    #[error("Unknown edge: ({0}, {1})")]
    UnknownEdge(NodeId, NodeId),

    /// Both endpoints of a new edge are the same node
    #[error("Self-loop on node {0}")]
    SelfLoop(NodeId),

    /// An edge over the same endpoint pair already exists
    #[error("Duplicate edge: ({0}, {1})")]
    DuplicateEdge(NodeId, NodeId),

    /// Two nodes share the same id
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),
}
