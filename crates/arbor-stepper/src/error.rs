//! Error types for stepper construction.

use arbor_graph::NodeId;
use thiserror::Error;

/// Result type for stepper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a run is constructed from malformed input.
///
/// These are programming errors in the caller, not user conditions. A graph
/// built through `arbor-graph` editing operations can never trigger them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An edge references a node id that is not in the node list
    #[error("Edge references unknown node: {0}")]
    UnknownNode(NodeId),

    /// The source node id is not in the node list
    #[error("Unknown source node: {0}")]
    UnknownSource(NodeId),

    /// Two nodes in the input share the same id
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),
}
