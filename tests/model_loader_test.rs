//! Tests for JSON model loading.

use std::path::PathBuf;

use tempfile::TempDir;

use navsets::infrastructure::{load_model, InfraError, ModelTree};

fn write_model(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write model file");
    path
}

fn root_names(tree: &impl ModelTree) -> Vec<String> {
    tree.roots()
        .into_iter()
        .filter_map(|id| tree.name(id))
        .collect()
}

#[test]
fn given_single_node_file_when_loading_then_one_root() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_model(
        &temp,
        "model.json",
        r#"{ "name": "L01_ARCH_Model",
             "children": [ { "name": "Level 1" } ] }"#,
    );

    // Act
    let arena = load_model(&path).unwrap();

    // Assert
    assert_eq!(root_names(&arena), vec!["L01_ARCH_Model"]);
    assert_eq!(arena.len(), 2);
}

#[test]
fn given_array_file_when_loading_then_each_node_is_a_root() {
    let temp = TempDir::new().unwrap();
    let path = write_model(
        &temp,
        "model.json",
        r#"[ { "name": "L01_ARCH_Model" }, { "name": "L01_MEP_Model" } ]"#,
    );

    let arena = load_model(&path).unwrap();

    assert_eq!(root_names(&arena), vec!["L01_ARCH_Model", "L01_MEP_Model"]);
}

#[test]
fn given_directory_when_loading_then_files_ingested_in_path_order() {
    // Arrange: write out of order, expect sorted ingestion
    let temp = TempDir::new().unwrap();
    write_model(&temp, "b_strc.json", r#"{ "name": "L01_STRC_Model" }"#);
    write_model(&temp, "a_arch.json", r#"{ "name": "L01_ARCH_Model" }"#);
    write_model(&temp, "notes.txt", "not a model");

    // Act
    let arena = load_model(temp.path()).unwrap();

    // Assert
    assert_eq!(root_names(&arena), vec!["L01_ARCH_Model", "L01_STRC_Model"]);
}

#[test]
fn given_directory_without_json_when_loading_then_no_model_files_error() {
    let temp = TempDir::new().unwrap();
    write_model(&temp, "notes.txt", "not a model");

    let result = load_model(temp.path());

    assert!(matches!(result, Err(InfraError::NoModelFiles(_))));
}

#[test]
fn given_malformed_json_when_loading_then_model_error() {
    let temp = TempDir::new().unwrap();
    let path = write_model(&temp, "model.json", "{ not json");

    let result = load_model(&path);

    assert!(matches!(result, Err(InfraError::Model { .. })));
}

#[test]
fn given_properties_in_file_when_loading_then_attribute_lookup_works() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_model(
        &temp,
        "model.json",
        r#"{ "name": "L01_MEP_Model",
             "children": [
               { "name": "duct",
                 "categories": [
                   { "name": "LcElement", "display_name": "Element",
                     "properties": [
                       { "name": "LcCategory", "display_name": "Category",
                         "value": "Ducts" } ] } ] } ] }"#,
    );

    // Act
    let arena = load_model(&path).unwrap();

    // Assert
    let root = arena.roots()[0];
    let duct = ModelTree::children(&arena, root)[0];
    assert_eq!(
        arena.attribute(duct, "Element", "Category").unwrap(),
        Some("Ducts".to_string())
    );
    assert_eq!(
        arena.attribute(duct, "LcElement", "LcCategory").unwrap(),
        Some("Ducts".to_string())
    );
}
