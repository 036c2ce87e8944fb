//! Ordered, duplicate-free set of node handles.
//!
//! Iteration, indexing and text concatenation observe insertion order, while
//! equality and hashing only consider membership.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::iter::Copied;

use indexmap::IndexSet;

/// Iterator over the handles of a [`NodeSet`] in insertion order.
pub type Iter<'s, N> = Copied<indexmap::set::Iter<'s, N>>;

/// Insertion-ordered set of node handles keyed on node identity.
///
/// Inserting a handle that is already present keeps its first position.
#[derive(Debug, Clone)]
pub struct NodeSet<N> {
    inner: IndexSet<N>,
}

impl<N> Default for NodeSet<N> {
    fn default() -> Self {
        Self {
            inner: IndexSet::new(),
        }
    }
}

impl<N: Copy + Eq + Hash> NodeSet<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(node: N) -> Self {
        let mut set = Self::new();
        set.insert(node);
        set
    }

    /// Appends `node` unless already present. Returns `true` if it was added.
    pub fn insert(&mut self, node: N) -> bool {
        self.inner.insert(node)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.inner.contains(node)
    }

    pub fn first(&self) -> Option<N> {
        self.inner.first().copied()
    }

    /// Handle at position `index` in insertion order.
    pub fn get(&self, index: usize) -> Option<N> {
        self.inner.get_index(index).copied()
    }

    pub fn iter(&self) -> Iter<'_, N> {
        self.inner.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<N> {
        self.iter().collect()
    }
}

impl<N: Copy + Eq + Hash> PartialEq for NodeSet<N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.inner.iter().all(|node| other.contains(node))
    }
}

impl<N: Copy + Eq + Hash> Eq for NodeSet<N> {}

impl<N: Copy + Eq + Hash> Hash for NodeSet<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // wrapping sum keeps the combination independent of insertion order
        let combined = self.inner.iter().fold(0u64, |acc, node| {
            let mut hasher = DefaultHasher::new();
            node.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_usize(self.len());
        state.write_u64(combined);
    }
}

impl<N: Copy + Eq + Hash> FromIterator<N> for NodeSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<N: Copy + Eq + Hash> Extend<N> for NodeSet<N> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<'s, N: Copy + Eq + Hash> IntoIterator for &'s NodeSet<N> {
    type Item = N;
    type IntoIter = Iter<'s, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn given_duplicate_inserts_when_collecting_then_keeps_first_position() {
        let set: NodeSet<u32> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.to_vec(), vec![3, 1, 2]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn given_insert_of_present_node_when_inserting_then_returns_false() {
        let mut set = NodeSet::single(7u32);
        assert!(!set.insert(7));
        assert!(set.insert(8));
        assert_eq!(set.first(), Some(7));
        assert_eq!(set.get(1), Some(8));
        assert_eq!(set.get(2), None);
    }

    #[test]
    fn given_same_members_in_different_order_when_comparing_then_equal_with_same_hash() {
        let a: NodeSet<u32> = [1, 2, 3].into_iter().collect();
        let b: NodeSet<u32> = [3, 1, 2].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a.to_vec(), b.to_vec());
    }

    #[test]
    fn given_different_members_when_comparing_then_not_equal() {
        let a: NodeSet<u32> = [1, 2].into_iter().collect();
        let b: NodeSet<u32> = [1, 2, 3].into_iter().collect();
        let c: NodeSet<u32> = [1, 4].into_iter().collect();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn given_equal_sets_when_used_as_hash_keys_then_deduplicated() {
        let mut seen = HashSet::new();
        seen.insert([1u32, 2].into_iter().collect::<NodeSet<_>>());
        seen.insert([2u32, 1].into_iter().collect::<NodeSet<_>>());
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn given_empty_set_when_inspecting_then_reports_empty() {
        let set: NodeSet<u32> = NodeSet::new();
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
        assert_eq!(set, NodeSet::default());
    }
}
