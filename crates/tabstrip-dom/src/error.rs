//! Host document error types

use thiserror::Error;

use crate::memory::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Cannot append {child} to {parent}: would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}
