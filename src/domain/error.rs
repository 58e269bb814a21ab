//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Precondition violations reported by tree mutations.
///
/// Queries never return these: finding nothing is answered with an empty
/// result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("invalid node: a concrete node is required")]
    InvalidNode,

    #[error("invalid node id: {0}")]
    InvalidNodeId(NodeId),

    #[error("node already exists: {0}")]
    NodeAlreadyExists(NodeId),

    #[error("invalid move: {id} cannot be placed under {dest}")]
    InvalidSourceDest { id: NodeId, dest: NodeId },

    #[error("deleting the root node is forbidden: {0}")]
    DeleteRootForbidden(NodeId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
