//! Search-set creation service
//!
//! Implements the two user-invokable passes: discipline sets and
//! clash sets. Each pass reads the tree fresh, builds a complete
//! [`GroupSpec`] folder, and performs exactly one store write at the end,
//! so nothing is partially persisted when a pass aborts.

use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::application::services::discovery::DiscoveryService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::builder::{attribute_leaf, discipline_folder};
use crate::domain::{
    classify, AttributeSelector, DomainError, GroupSpec, CLASH_SETS_FOLDER, DISCIPLINES_FOLDER,
};
use crate::infrastructure::traits::{GroupStore, ModelTree};

/// Service orchestrating classification, discovery, and persistence.
pub struct SearchSetService {
    tree: Arc<dyn ModelTree>,
    store: Arc<dyn GroupStore>,
    discovery: DiscoveryService,
}

impl SearchSetService {
    pub fn new(tree: Arc<dyn ModelTree>, store: Arc<dyn GroupStore>) -> Self {
        let discovery = DiscoveryService::new(tree.clone());
        Self {
            tree,
            store,
            discovery,
        }
    }

    /// Discipline pass: classify root item names and persist the
    /// "1. DISCIPLINES" folder of wildcard-filtered groups.
    ///
    /// Fails with [`DomainError::NoDisciplinesFound`] when no root name
    /// carries a discipline token; nothing is persisted in that case.
    #[instrument(level = "debug", skip(self))]
    pub fn create_discipline_sets(&self) -> ApplicationResult<GroupSpec> {
        let root_names: Vec<String> = self
            .tree
            .roots()
            .into_iter()
            .filter_map(|id| self.tree.name(id))
            .collect();
        debug!("classifying {} root items", root_names.len());

        let tags = classify(root_names.iter().map(String::as_str));
        if tags.is_empty() {
            return Err(DomainError::NoDisciplinesFound.into());
        }
        debug!("disciplines found: {}", tags.iter().join(", "));

        let folder = discipline_folder(&tags);
        self.store
            .add_group_hierarchy(folder.clone())
            .map_err(|e| ApplicationError::operation("persist discipline folder", e))?;

        Ok(folder)
    }

    /// Clash-set pass: for every previously persisted discipline group,
    /// discover the distinct values of `selector` over the group's
    /// current membership and persist the two-level "2. CLASH SETS"
    /// folder.
    ///
    /// A discipline with zero discovered values contributes no sub-folder.
    /// A value whose leaf cannot be constructed is logged and skipped;
    /// one malformed value never aborts the run.
    #[instrument(level = "debug", skip(self))]
    pub fn create_clash_sets(&self, selector: AttributeSelector) -> ApplicationResult<GroupSpec> {
        let disciplines = self
            .store
            .find_folder(DISCIPLINES_FOLDER)
            .map_err(|e| ApplicationError::operation("look up discipline folder", e))?
            .ok_or_else(|| DomainError::DisciplinesMissing(DISCIPLINES_FOLDER.to_string()))?;

        let mut discipline_groups = disciplines.leaf_children();
        if discipline_groups.is_empty() {
            return Err(DomainError::NoCategorySetsFound.into());
        }
        // Deterministic pass order regardless of stored order
        discipline_groups.sort_by_key(|g| g.name().to_string());

        let mut sub_folders = Vec::new();
        let mut total_created = 0usize;

        for group in discipline_groups {
            let GroupSpec::Leaf { name, filter } = group else {
                continue;
            };

            let members = self
                .store
                .resolve_membership(group, self.tree.as_ref())
                .map_err(|e| {
                    ApplicationError::operation(format!("resolve membership of {name:?}"), e)
                })?;
            debug!("discipline {name}: {} member roots", members.len());

            let values = self.discovery.discover(&members, selector);
            if values.is_empty() {
                debug!("discipline {name}: no {selector} values, skipped");
                continue;
            }

            let mut children = Vec::new();
            for value in &values {
                match attribute_leaf(value, selector, filter) {
                    Ok(leaf) => {
                        children.push(leaf);
                        total_created += 1;
                    }
                    Err(e) => {
                        warn!("skipping {name}\\{value}: {e}");
                    }
                }
            }

            if !children.is_empty() {
                sub_folders.push(GroupSpec::folder(name.clone(), children));
            }
        }

        if total_created == 0 {
            return Err(DomainError::NoCategorySetsFound.into());
        }

        let folder = GroupSpec::folder(CLASH_SETS_FOLDER, sub_folders);
        self.store
            .add_group_hierarchy(folder.clone())
            .map_err(|e| ApplicationError::operation("persist clash-set folder", e))?;

        Ok(folder)
    }
}
