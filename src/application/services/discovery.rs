//! Attribute-value discovery over a model subtree.
//!
//! This is the dominant cost of the whole system: a full depth-first scan
//! of every descendant of the given roots, collecting the distinct values
//! of one attribute. Runs on trees with 10^5..10^6 nodes, so traversal is
//! driven by an explicit work-list rather than recursion.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{AttributeSelector, NodeId};
use crate::infrastructure::traits::ModelTree;

/// Service for discovering distinct attribute values across a subtree.
pub struct DiscoveryService {
    tree: Arc<dyn ModelTree>,
}

impl DiscoveryService {
    pub fn new(tree: Arc<dyn ModelTree>) -> Self {
        Self { tree }
    }

    /// Collect the distinct non-blank values of `selector` across all
    /// descendants of `roots`, inclusive of the roots themselves.
    ///
    /// Nodes whose attribute access fails are treated as attribute-absent;
    /// their children are still scanned. The full subtree is always
    /// visited, so the result set is complete. Returned values are
    /// trimmed, deduplicated, and lexically sorted.
    #[instrument(level = "debug", skip(self, roots), fields(roots = roots.len()))]
    pub fn discover(&self, roots: &[NodeId], selector: AttributeSelector) -> BTreeSet<String> {
        let (category, property) = selector.keys();
        let mut values = BTreeSet::new();
        let mut visited = 0usize;

        let mut stack: Vec<NodeId> = roots.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            visited += 1;

            match self.tree.attribute(node, category, property) {
                Ok(Some(value)) => {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        values.insert(trimmed.to_string());
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    // Malformed/partial node data; skip the attribute,
                    // keep descending.
                    debug!("attribute read failed at {node:?}: {e}");
                }
            }

            let children = self.tree.children(node);
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }

        debug!(
            "discover: {} distinct {} values over {} nodes",
            values.len(),
            selector,
            visited
        );
        values
    }
}
