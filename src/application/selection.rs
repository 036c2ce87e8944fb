//! Chainable selection over tree nodes.
//!
//! A [`Selection`] wraps an ordered, duplicate-free set of node handles and
//! borrows the tree and the matching engine it queries through. Every
//! operation returns a new selection, except [`Selection::filter`], which
//! replaces the receiver's nodes in place and hands the same selection back
//! for chaining.

use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::error::{SelectionError, SelectionResult};
use crate::domain::node_set::{self, NodeSet};
use crate::infrastructure::traits::{Matcher, TreeModel};

/// Ordered, duplicate-free collection of nodes of a tree.
///
/// Equality and hashing only consider which nodes are selected; the order
/// matters for iteration, indexing and [`text`](Selection::text).
pub struct Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    tree: &'a T,
    matcher: &'a M,
    nodes: NodeSet<T::Node>,
}

impl<'a, T, M> Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    /// Selection holding the single `node`.
    pub fn new(tree: &'a T, matcher: &'a M, node: T::Node) -> Self {
        Self::from_nodes(tree, matcher, NodeSet::single(node))
    }

    /// Selection adopting `nodes` as-is.
    pub fn from_nodes(tree: &'a T, matcher: &'a M, nodes: NodeSet<T::Node>) -> Self {
        Self {
            tree,
            matcher,
            nodes,
        }
    }

    pub fn tree(&self) -> &'a T {
        self.tree
    }

    /// Runs `selector` below every selected node and returns the merged
    /// matches as a new selection. The receiver is left unchanged.
    ///
    /// # Errors
    /// [`SelectionError::Query`] if the matcher rejects the selector for any
    /// node; no partial result is returned.
    #[instrument(level = "debug", skip(self), fields(size = self.nodes.len()))]
    pub fn query(&self, selector: &str) -> SelectionResult<Self> {
        let nodes = self.run_query(selector)?;
        Ok(Self::from_nodes(self.tree, self.matcher, nodes))
    }

    /// Like [`query`](Selection::query), but replaces this selection's nodes
    /// with the result and returns `self`.
    ///
    /// This is the only operation that changes a selection after
    /// construction. On error the selection keeps its previous nodes.
    #[instrument(level = "debug", skip(self), fields(size = self.nodes.len()))]
    pub fn filter(&mut self, selector: &str) -> SelectionResult<&mut Self> {
        self.nodes = self.run_query(selector)?;
        Ok(self)
    }

    fn run_query(&self, selector: &str) -> SelectionResult<NodeSet<T::Node>> {
        let mut results = NodeSet::new();
        for node in &self.nodes {
            let matches = self
                .matcher
                .match_all(self.tree, node, selector)
                .map_err(|source| {
                    debug!(?node, %source, "Selector evaluation failed");
                    SelectionError::Query {
                        selector: selector.to_string(),
                        source,
                    }
                })?;
            results.extend(matches);
        }
        debug!(selector, matched = results.len(), "Query complete");
        Ok(results)
    }

    /// Text content of all selected nodes, concatenated in order.
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .map(|node| self.tree.text_content(node))
            .join("")
    }

    /// Attribute `name` of the first selected node only.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let tree = self.tree;
        self.nodes.first().and_then(|node| tree.attribute(node, name))
    }

    /// Read-only view of the selected nodes.
    pub fn nodes(&self) -> &NodeSet<T::Node> {
        &self.nodes
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Single-node selections in order. Each call starts from the beginning.
    pub fn iter(&self) -> Iter<'_, 'a, T, M> {
        Iter {
            tree: self.tree,
            matcher: self.matcher,
            inner: self.nodes.iter(),
        }
    }

    pub fn selections(&self) -> Vec<Self> {
        self.iter().collect()
    }

    /// Single-node selection at `index`. Negative indexes are not supported.
    ///
    /// # Errors
    /// [`SelectionError::IndexOutOfBounds`] if `index < 0` or `index >= size()`.
    #[instrument(level = "trace", skip(self))]
    pub fn get_at(&self, index: isize) -> SelectionResult<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.nodes.get(i))
            .map(|node| Self::new(self.tree, self.matcher, node))
            .ok_or(SelectionError::IndexOutOfBounds {
                index,
                size: self.size(),
            })
    }

    /// Single-node selections for positions `[from, to)`.
    ///
    /// # Errors
    /// - [`SelectionError::ReverseRange`] if `from > to`
    /// - [`SelectionError::NegativeRange`] if either bound is negative
    /// - [`SelectionError::RangeOutOfBounds`] if `to > size()`
    #[instrument(level = "trace", skip(self))]
    pub fn get_range(&self, from: isize, to: isize) -> SelectionResult<Vec<Self>> {
        if from > to {
            return Err(SelectionError::ReverseRange { from, to });
        }
        let (Ok(start), Ok(end)) = (usize::try_from(from), usize::try_from(to)) else {
            return Err(SelectionError::NegativeRange { from, to });
        };
        if end > self.size() {
            return Err(SelectionError::RangeOutOfBounds {
                from,
                to,
                size: self.size(),
            });
        }
        Ok(self.iter().skip(start).take(end - start).collect())
    }
}

impl<'a, T, M> Clone for Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    fn clone(&self) -> Self {
        Self::from_nodes(self.tree, self.matcher, self.nodes.clone())
    }
}

impl<'a, T, M> fmt::Debug for Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("nodes", &self.nodes.to_vec())
            .finish()
    }
}

impl<'a, T, M> fmt::Display for Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl<'a, T, M> PartialEq for Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl<'a, T, M> Eq for Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
}

impl<'a, T, M> Hash for Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
    }
}

/// Iterator over the single-node selections of a [`Selection`].
pub struct Iter<'s, 'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    tree: &'a T,
    matcher: &'a M,
    inner: node_set::Iter<'s, T::Node>,
}

impl<'s, 'a, T, M> Iterator for Iter<'s, 'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    type Item = Selection<'a, T, M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|node| Selection::new(self.tree, self.matcher, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'s, 'a, T, M> ExactSizeIterator for Iter<'s, 'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
}

impl<'s, 'a, T, M> IntoIterator for &'s Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    type Item = Selection<'a, T, M>;
    type IntoIter = Iter<'s, 'a, T, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Document, NodeId};
    use crate::infrastructure::{MatchError, MatchResult};

    fn children(tree: &Document, node: NodeId, selector: &str) -> MatchResult<Vec<NodeId>> {
        if selector.is_empty() {
            return Err(MatchError::syntax(selector, "empty selector"));
        }
        Ok(tree
            .children(node)
            .iter()
            .copied()
            .filter(|&child| tree.tag(child) == Some(selector))
            .collect())
    }

    fn list() -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.create_root("ul").unwrap();
        let items = ["a", "b", "c"]
            .iter()
            .map(|text| {
                let li = doc.append_element(root, "li").unwrap();
                doc.append_text(li, text).unwrap();
                li
            })
            .collect();
        (doc, root, items)
    }

    #[test]
    fn given_root_when_querying_children_then_returns_new_selection() {
        let (doc, root, items) = list();
        let matcher = children;
        let sel = Selection::new(&doc, &matcher, root);

        let result = sel.query("li").unwrap();

        assert_eq!(result.nodes().to_vec(), items);
        assert_eq!(sel.nodes().to_vec(), vec![root]);
        assert_eq!(result.text(), "abc");
    }

    #[test]
    fn given_failing_matcher_when_filtering_then_keeps_previous_nodes() {
        let (doc, root, _) = list();
        let matcher = children;
        let mut sel = Selection::new(&doc, &matcher, root);

        let err = sel.filter("").unwrap_err();

        assert!(matches!(err, SelectionError::Query { .. }));
        assert_eq!(sel.nodes().to_vec(), vec![root]);
    }

    #[test]
    fn given_selection_when_iterating_twice_then_restarts() {
        let (doc, root, items) = list();
        let matcher = children;
        let sel = Selection::new(&doc, &matcher, root).query("li").unwrap();

        let first: Vec<_> = sel.iter().map(|s| s.text()).collect();
        let second: Vec<_> = (&sel).into_iter().map(|s| s.text()).collect();

        assert_eq!(first, vec!["a", "b", "c"]);
        assert_eq!(first, second);
        assert_eq!(sel.iter().len(), items.len());
    }

    #[test]
    fn given_selection_when_formatting_then_display_equals_text() {
        let (doc, root, _) = list();
        let matcher = children;
        let sel = Selection::new(&doc, &matcher, root);
        assert_eq!(sel.to_string(), "abc");
        assert!(format!("{:?}", sel).starts_with("Selection"));
    }
}
