//! I/O boundary traits for testability
//!
//! These traits abstract the host application's model tree and saved-sets
//! facility, allowing services to be tested with mock implementations.

use std::collections::HashSet;
use std::sync::Mutex;

use thiserror::Error;

use crate::domain::{FilterSpec, GroupSpec, NodeId};

/// Failure reading an attribute from one node.
///
/// Malformed or partially loaded nodes can fail attribute access; callers
/// treat this as "attribute absent" and keep traversing.
#[derive(Debug, Error)]
#[error("attribute access failed: {0}")]
pub struct AttributeError(pub String);

/// Errors at the group-store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid saved-sets document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("cannot resolve membership of folder {0:?}")]
    NotALeaf(String),

    #[error("refusing to persist empty folder {0:?}")]
    EmptyFolder(String),

    #[error("{0}")]
    Filter(#[from] crate::domain::DomainError),
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Read-only view of the host's model tree.
pub trait ModelTree: Send + Sync {
    /// Root items, one per appended model file.
    fn roots(&self) -> Vec<NodeId>;

    /// Ordered children of a node.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Display name of a node.
    fn name(&self, node: NodeId) -> Option<String>;

    /// Look up an attribute by category and property key. Both keys match
    /// either the internal name or the display name of the category and
    /// property, since host attribute systems expose both forms.
    fn attribute(
        &self,
        node: NodeId,
        category: &str,
        property: &str,
    ) -> Result<Option<String>, AttributeError>;
}

/// Persistence facility for named, nested, filter-backed groups.
pub trait GroupStore: Send + Sync {
    /// Persist a folder hierarchy. Appends without merging: a second run
    /// with the same folder name creates a duplicate.
    fn add_group_hierarchy(&self, folder: GroupSpec) -> Result<(), StoreError>;

    /// Find a top-level folder by name. First match wins when duplicates
    /// exist.
    fn find_folder(&self, name: &str) -> Result<Option<GroupSpec>, StoreError>;

    /// Evaluate a leaf group's filter against the current tree.
    ///
    /// Groups are lazy views: membership is never cached across passes.
    fn resolve_membership(
        &self,
        leaf: &GroupSpec,
        tree: &dyn ModelTree,
    ) -> Result<Vec<NodeId>, StoreError> {
        match leaf {
            GroupSpec::Leaf { filter, .. } => evaluate_filter(filter, tree),
            GroupSpec::Folder { name, .. } => Err(StoreError::NotALeaf(name.clone())),
        }
    }
}

/// Reject hierarchies containing any empty folder, at any depth.
pub fn validate_hierarchy(folder: &GroupSpec) -> Result<(), StoreError> {
    let mut stack = vec![folder];
    while let Some(spec) = stack.pop() {
        if let GroupSpec::Folder { name, children } = spec {
            if children.is_empty() {
                return Err(StoreError::EmptyFolder(name.clone()));
            }
            stack.extend(children.iter());
        }
    }
    Ok(())
}

/// Evaluate a filter against the current tree.
///
/// Results are in pre-order traversal order, deduplicated. Traversal is
/// iterative; attribute-read failures count as non-matching and never
/// stop the scan.
pub fn evaluate_filter(
    filter: &FilterSpec,
    tree: &dyn ModelTree,
) -> Result<Vec<NodeId>, StoreError> {
    match filter {
        FilterSpec::NameWildcard { pattern } => {
            let re = pattern.compile()?;
            let mut matches = Vec::new();
            let mut stack: Vec<NodeId> = tree.roots().into_iter().rev().collect();
            while let Some(node) = stack.pop() {
                if let Some(name) = tree.name(node) {
                    if re.is_match(&name) {
                        matches.push(node);
                    }
                }
                for child in tree.children(node).into_iter().rev() {
                    stack.push(child);
                }
            }
            Ok(matches)
        }
        FilterSpec::AttributeEquals {
            category,
            property,
            value,
            base,
        } => {
            let base_members = evaluate_filter(base, tree)?;
            let mut seen = HashSet::new();
            let mut matches = Vec::new();

            // Base members can be nested inside each other, so their
            // descendants-and-self scans overlap.
            for member in base_members {
                let mut stack = vec![member];
                while let Some(node) = stack.pop() {
                    if seen.insert(node) {
                        match tree.attribute(node, category, property) {
                            Ok(Some(v)) if v.trim() == value => matches.push(node),
                            Ok(_) | Err(_) => {}
                        }
                    }
                    for child in tree.children(node).into_iter().rev() {
                        stack.push(child);
                    }
                }
            }
            Ok(matches)
        }
    }
}

// ============================================================
// IN-MEMORY IMPLEMENTATION
// ============================================================

/// In-memory group store: the working store for a single run, and the
/// test double for service tests.
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    folders: Mutex<Vec<GroupSpec>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all persisted top-level folders.
    pub fn folders(&self) -> Vec<GroupSpec> {
        self.folders.lock().expect("store mutex poisoned").clone()
    }
}

impl GroupStore for InMemoryGroupStore {
    fn add_group_hierarchy(&self, folder: GroupSpec) -> Result<(), StoreError> {
        validate_hierarchy(&folder)?;
        self.folders
            .lock()
            .expect("store mutex poisoned")
            .push(folder);
        Ok(())
    }

    fn find_folder(&self, name: &str) -> Result<Option<GroupSpec>, StoreError> {
        Ok(self
            .folders
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .find(|f| f.is_folder() && f.name() == name)
            .cloned())
    }
}
