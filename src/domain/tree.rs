//! Arena-backed model tree.
//!
//! The scene graph handed over by the host is arbitrarily deep and can
//! reach 10^5..10^6 nodes, so nodes live in a generational arena and every
//! traversal uses an explicit stack instead of call-stack recursion.

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};

/// Opaque handle to a node in a [`ModelArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// A named, typed value attached to a model element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Internal name, e.g. "LcCategory"
    pub name: String,
    /// Host-facing display name, e.g. "Category"
    #[serde(default)]
    pub display_name: Option<String>,
    pub value: String,
}

/// Named container of properties, e.g. category "Element".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCategory {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl PropertyCategory {
    /// Whether this category is addressed by `key` (internal or display name).
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.display_name.as_deref() == Some(key)
    }
}

impl Property {
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.display_name.as_deref() == Some(key)
    }
}

/// Tree node in the arena-based model hierarchy.
#[derive(Debug)]
pub struct ModelNode {
    /// Display name shown by the host
    pub name: String,
    /// Property categories attached to this element
    pub categories: Vec<PropertyCategory>,
    /// Index of parent node, None for root items
    pub parent: Option<NodeId>,
    /// Indices of child nodes
    pub children: Vec<NodeId>,
}

/// Arena-based model tree with multiple roots.
///
/// Each root item corresponds to one appended model file in the host
/// document. The classification core only ever reads this structure.
#[derive(Debug, Default)]
pub struct ModelArena {
    arena: Arena<ModelNode>,
    roots: Vec<NodeId>,
}

impl ModelArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; nodes without a parent become root items, in
    /// insertion order.
    pub fn insert_node(
        &mut self,
        name: impl Into<String>,
        categories: Vec<PropertyCategory>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let node = ModelNode {
            name: name.into(),
            categories,
            parent,
            children: Vec::new(),
        };
        let idx = NodeId(self.arena.insert(node));

        if let Some(NodeId(parent_idx)) = parent {
            if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                parent_node.children.push(idx);
            }
        } else {
            self.roots.push(idx);
        }

        idx
    }

    pub fn get(&self, id: NodeId) -> Option<&ModelNode> {
        self.arena.get(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Depth-first iterator over a subtree, inclusive of the start node.
    pub fn iter_subtree(&self, start: NodeId) -> SubtreeIterator<'_> {
        SubtreeIterator {
            arena: self,
            stack: vec![start],
        }
    }
}

/// Pre-order iterator driven by an explicit stack.
pub struct SubtreeIterator<'a> {
    arena: &'a ModelArena,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for SubtreeIterator<'a> {
    type Item = (NodeId, &'a ModelNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
