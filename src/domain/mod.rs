//! Domain layer: node sets and the reference document tree
//!
//! This layer is independent of external concerns (no matching engine, no config loading).

pub mod arena;
pub mod error;
pub mod node_set;

pub use arena::{Descendants, Document, DocumentNode, NodeId, NodeKind};
pub use error::{DomainError, DomainResult};
pub use node_set::NodeSet;
