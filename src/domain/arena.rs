use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a node: the owning document plus its slot in that document's arena.
///
/// Handles from different documents never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    document: u64,
    index: Index,
}

impl NodeId {
    /// Id of the document that created this handle.
    pub fn document_id(&self) -> u64 {
        self.document
    }
}

/// Payload of a document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Element { tag, attributes } => {
                write!(f, "<{}", tag)?;
                for (name, value) in attributes {
                    write!(f, " {}=\"{}\"", name, value)?;
                }
                write!(f, ">")
            }
            NodeKind::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// Node in the arena-based document tree.
#[derive(Debug)]
pub struct DocumentNode {
    pub kind: NodeKind,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<NodeId>,
    /// Indices of child nodes in document order
    pub children: Vec<NodeId>,
}

/// Arena-backed document tree of elements and text nodes.
///
/// Every document gets a process-unique id, and node handles carry it next
/// to a generational index, so a handle never resolves in another document.
#[derive(Debug)]
pub struct Document {
    id: u64,
    arena: Arena<DocumentNode>,
    root: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            id: NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            root: None,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    fn handle(&self, index: Index) -> NodeId {
        NodeId {
            document: self.id,
            index,
        }
    }

    fn node_mut(&mut self, idx: NodeId) -> Option<&mut DocumentNode> {
        if idx.document != self.id {
            return None;
        }
        self.arena.get_mut(idx.index)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn create_root(&mut self, tag: &str) -> DomainResult<NodeId> {
        if self.root.is_some() {
            return Err(DomainError::RootAlreadySet);
        }
        let index = self.arena.insert(DocumentNode {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                attributes: BTreeMap::new(),
            },
            parent: None,
            children: Vec::new(),
        });
        let idx = self.handle(index);
        self.root = Some(idx);
        Ok(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> DomainResult<NodeId> {
        self.append_child(
            parent,
            NodeKind::Element {
                tag: tag.to_string(),
                attributes: BTreeMap::new(),
            },
        )
    }

    #[instrument(level = "trace", skip(self))]
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> DomainResult<NodeId> {
        self.append_child(parent, NodeKind::Text(text.to_string()))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomainResult<()> {
        let entry = self.node_mut(node).ok_or(DomainError::NodeNotFound(node))?;
        match &mut entry.kind {
            NodeKind::Element { attributes, .. } => {
                attributes.insert(name.to_string(), value.to_string());
                Ok(())
            }
            NodeKind::Text(_) => Err(DomainError::NotAnElement(node)),
        }
    }

    fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> DomainResult<NodeId> {
        match self.get_node(parent) {
            None => return Err(DomainError::NodeNotFound(parent)),
            Some(DocumentNode {
                kind: NodeKind::Text(_),
                ..
            }) => return Err(DomainError::NotAnElement(parent)),
            Some(_) => {}
        }
        let index = self.arena.insert(DocumentNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        let idx = self.handle(index);
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(idx);
        }
        Ok(idx)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Node behind `idx`, None for handles of other documents.
    pub fn get_node(&self, idx: NodeId) -> Option<&DocumentNode> {
        if idx.document != self.id {
            return None;
        }
        self.arena.get(idx.index)
    }

    pub fn parent(&self, idx: NodeId) -> Option<NodeId> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    pub fn children(&self, idx: NodeId) -> &[NodeId] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Tag name of an element, None for text nodes and unknown handles.
    pub fn tag(&self, idx: NodeId) -> Option<&str> {
        match &self.get_node(idx)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attribute(&self, idx: NodeId, name: &str) -> Option<&str> {
        match &self.get_node(idx)?.kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    /// True if the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, idx: NodeId, class: &str) -> bool {
        self.attribute(idx, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Pre-order walk below `idx`, excluding `idx` itself.
    pub fn descendants(&self, idx: NodeId) -> Descendants<'_> {
        Descendants::new(self, idx)
    }

    /// Concatenated text of the node and all its descendants in document order.
    #[instrument(level = "trace", skip(self))]
    pub fn text_content(&self, idx: NodeId) -> String {
        match self.get_node(idx).map(|node| &node.kind) {
            None => String::new(),
            Some(NodeKind::Text(text)) => text.clone(),
            Some(NodeKind::Element { .. }) => self
                .descendants(idx)
                .filter_map(|child| match &self.get_node(child)?.kind {
                    NodeKind::Text(text) => Some(text.as_str()),
                    NodeKind::Element { .. } => None,
                })
                .collect(),
        }
    }

    /// Renders the document below the root for debugging output.
    pub fn to_tree(&self) -> Tree<String> {
        match self.root {
            Some(root) => self.subtree(root),
            None => Tree::new("Empty document".to_string()),
        }
    }

    fn subtree(&self, idx: NodeId) -> Tree<String> {
        let label = self
            .get_node(idx)
            .map(|node| node.kind.to_string())
            .unwrap_or_default();
        let leaves: Vec<_> = self
            .children(idx)
            .iter()
            .map(|&child| self.subtree(child))
            .collect();
        Tree::new(label).with_leaves(leaves)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree())
    }
}

pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    fn new(document: &'a Document, start: NodeId) -> Self {
        // Push children in reverse order for left-to-right traversal
        let stack = document.children(start).iter().rev().copied().collect();
        Self { document, stack }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.document.children(current).iter().rev().copied());
        Some(current)
    }
}
