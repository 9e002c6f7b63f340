//! File-backed group store.
//!
//! Persists the saved-sets hierarchy as a JSON document. The document is
//! re-read on every access so concurrent tooling sees a consistent file,
//! and appends never merge: re-running a pass with same-named folders
//! already stored creates duplicates, matching the host's saved-sets
//! behavior.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::GroupSpec;
use crate::infrastructure::traits::{validate_hierarchy, GroupStore, StoreError};

/// On-disk saved-sets document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SetsDocument {
    /// When the document was last written
    #[serde(default)]
    generated: Option<DateTime<Utc>>,
    #[serde(default)]
    folders: Vec<GroupSpec>,
}

/// Group store persisting to a single JSON file.
#[derive(Debug)]
pub struct JsonGroupStore {
    path: PathBuf,
}

impl JsonGroupStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SetsDocument, StoreError> {
        if !self.path.exists() {
            return Ok(SetsDocument::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::io(format!("read sets file {}", self.path.display()), e))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, mut doc: SetsDocument) -> Result<(), StoreError> {
        doc.generated = Some(Utc::now());
        let content = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::io(format!("write sets file {}", self.path.display()), e))
    }

    /// All persisted top-level folders.
    pub fn folders(&self) -> Result<Vec<GroupSpec>, StoreError> {
        Ok(self.load()?.folders)
    }
}

impl GroupStore for JsonGroupStore {
    fn add_group_hierarchy(&self, folder: GroupSpec) -> Result<(), StoreError> {
        validate_hierarchy(&folder)?;
        let mut doc = self.load()?;
        debug!(
            "persisting folder {:?} ({} leaves) to {}",
            folder.name(),
            folder.leaf_count(),
            self.path.display()
        );
        doc.folders.push(folder);
        self.save(doc)
    }

    fn find_folder(&self, name: &str) -> Result<Option<GroupSpec>, StoreError> {
        Ok(self
            .load()?
            .folders
            .into_iter()
            .find(|f| f.is_folder() && f.name() == name))
    }
}
