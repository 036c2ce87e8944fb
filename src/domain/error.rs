//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Errors raised while building a document tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found in document: {0:?}")]
    NodeNotFound(NodeId),

    #[error("node is not an element: {0:?}")]
    NotAnElement(NodeId),

    #[error("document already has a root element")]
    RootAlreadySet,
}

/// Result type for document operations.
pub type DomainResult<T> = Result<T, DomainError>;
