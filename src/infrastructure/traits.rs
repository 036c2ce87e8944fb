//! Boundary traits for the tree model and the selector-matching engine
//!
//! The selection facade only reads through these traits, so the document
//! representation and the matching algorithm can be swapped or stubbed in
//! tests without touching the facade.

use std::fmt::Debug;
use std::hash::Hash;

use crate::domain::{Document, NodeId};
use crate::infrastructure::error::MatchResult;

/// Read-only view of an externally owned tree.
pub trait TreeModel {
    /// Node handle; equality and hashing define node identity.
    type Node: Copy + Eq + Hash + Debug;

    /// Computed text of the node and its descendants.
    fn text_content(&self, node: Self::Node) -> String;

    /// Value of attribute `name`, None if the node has no such attribute.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;
}

/// Selector-matching engine.
pub trait Matcher<T: TreeModel + ?Sized> {
    /// Returns the descendants of `node` matching `selector`, in document order.
    fn match_all(&self, tree: &T, node: T::Node, selector: &str) -> MatchResult<Vec<T::Node>>;
}

impl<T, F> Matcher<T> for F
where
    T: TreeModel + ?Sized,
    F: Fn(&T, T::Node, &str) -> MatchResult<Vec<T::Node>>,
{
    fn match_all(&self, tree: &T, node: T::Node, selector: &str) -> MatchResult<Vec<T::Node>> {
        self(tree, node, selector)
    }
}

// ============================================================
// DOCUMENT IMPLEMENTATION
// ============================================================

impl TreeModel for Document {
    type Node = NodeId;

    fn text_content(&self, node: NodeId) -> String {
        Document::text_content(self, node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        Document::attribute(self, node, name)
    }
}
