//! JSON model loading.
//!
//! Stand-in for the host application's document tree: model exports are
//! JSON files whose top-level nodes become root items. A directory of
//! `*.json` files maps to a multi-file document, one appended model per
//! file.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::{ModelArena, NodeId, PropertyCategory};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{AttributeError, ModelTree};

#[derive(Debug, Deserialize)]
struct JsonNode {
    name: String,
    #[serde(default)]
    categories: Vec<PropertyCategory>,
    #[serde(default)]
    children: Vec<JsonNode>,
}

/// A model file holds either a single root node or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelFile {
    Many(Vec<JsonNode>),
    One(JsonNode),
}

impl ModelFile {
    fn into_nodes(self) -> Vec<JsonNode> {
        match self {
            Self::Many(nodes) => nodes,
            Self::One(node) => vec![node],
        }
    }
}

/// Load a model from a `.json` file or a directory of `*.json` files.
///
/// Directory entries are ingested in path order so root items are
/// deterministic across runs.
#[instrument(level = "debug")]
pub fn load_model(path: &Path) -> InfraResult<ModelArena> {
    let mut arena = ModelArena::new();

    if path.is_dir() {
        let mut files: Vec<_> = WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(InfraError::NoModelFiles(path.to_path_buf()));
        }
        for file in files {
            load_file(&file, &mut arena)?;
        }
    } else {
        load_file(path, &mut arena)?;
    }

    debug!(
        "loaded model: {} roots, {} nodes",
        arena.roots().len(),
        arena.len()
    );
    Ok(arena)
}

fn load_file(path: &Path, arena: &mut ModelArena) -> InfraResult<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| InfraError::io(format!("read model file {}", path.display()), e))?;

    let file: ModelFile =
        serde_json::from_str(&content).map_err(|e| InfraError::Model {
            path: path.to_path_buf(),
            source: e,
        })?;

    // Iterative ingestion: model trees can be deeper than the call stack
    // tolerates.
    let mut stack: Vec<(JsonNode, Option<NodeId>)> = file
        .into_nodes()
        .into_iter()
        .rev()
        .map(|n| (n, None))
        .collect();

    while let Some((node, parent)) = stack.pop() {
        let id = arena.insert_node(node.name, node.categories, parent);
        for child in node.children.into_iter().rev() {
            stack.push((child, Some(id)));
        }
    }

    Ok(())
}

impl ModelTree for ModelArena {
    fn roots(&self) -> Vec<NodeId> {
        ModelArena::roots(self).to_vec()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn name(&self, node: NodeId) -> Option<String> {
        self.get(node).map(|n| n.name.clone())
    }

    fn attribute(
        &self,
        node: NodeId,
        category: &str,
        property: &str,
    ) -> Result<Option<String>, AttributeError> {
        let Some(model_node) = self.get(node) else {
            return Ok(None);
        };
        // Only the first matching category is consulted, even when the
        // property is missing from it.
        let Some(cat) = model_node.categories.iter().find(|c| c.matches(category)) else {
            return Ok(None);
        };
        Ok(cat
            .properties
            .iter()
            .find(|p| p.matches(property))
            .map(|p| p.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Property;

    fn category(name: &str, display: &str, props: Vec<(&str, &str, &str)>) -> PropertyCategory {
        PropertyCategory {
            name: name.to_string(),
            display_name: Some(display.to_string()),
            properties: props
                .into_iter()
                .map(|(n, d, v)| Property {
                    name: n.to_string(),
                    display_name: Some(d.to_string()),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn given_internal_or_display_key_when_looking_up_then_both_match() {
        let mut arena = ModelArena::new();
        let node = arena.insert_node(
            "wall",
            vec![category(
                "LcElement",
                "Element",
                vec![("LcCategory", "Category", "Walls")],
            )],
            None,
        );

        assert_eq!(
            arena.attribute(node, "Element", "Category").unwrap(),
            Some("Walls".to_string())
        );
        assert_eq!(
            arena.attribute(node, "LcElement", "LcCategory").unwrap(),
            Some("Walls".to_string())
        );
        assert_eq!(arena.attribute(node, "Item", "Category").unwrap(), None);
    }

    #[test]
    fn given_two_matching_categories_when_looking_up_then_only_first_consulted() {
        let mut arena = ModelArena::new();
        let node = arena.insert_node(
            "duct",
            vec![
                category("LcElement", "Element", vec![("Other", "Other", "x")]),
                category("Element2", "Element", vec![("LcCategory", "Category", "Ducts")]),
            ],
            None,
        );

        // First "Element" category has no Category property, and the
        // second one is never reached.
        assert_eq!(arena.attribute(node, "Element", "Category").unwrap(), None);
    }
}
