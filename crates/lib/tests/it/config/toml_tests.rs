//! TOML files through configuration trees and documents

use dataview::{
    config::{ConfigNode, Scalar},
    data::{DataView, DataViewMut},
    query,
    translator::{ConfigTranslator, DataTranslator},
};

use crate::helpers::{flatten, nested_scalar_document};

const SERVER_TOML: &str = r#"
motd = "Welcome"
max_players = 20

[network]
port = 25565
compression = true
threshold = 256.5

[[worlds]]
name = "overworld"
seed = 12345678901

[[worlds]]
name = "nether"
seed = 42
"#;

#[test]
fn test_load_into_document() {
    let node = ConfigNode::parse_toml(SERVER_TOML).unwrap();
    let doc = ConfigTranslator.from_external(&node).unwrap();

    assert_eq!(doc.get_string("motd").as_deref(), Some("Welcome"));
    assert_eq!(doc.get_int("network.port"), Some(25565));
    assert_eq!(doc.get_bool("network.compression"), Some(true));
    assert_eq!(doc.get_double("network.threshold"), Some(256.5));

    let worlds = doc.get_view_list("worlds").unwrap();
    assert_eq!(worlds.len(), 2);
    assert_eq!(worlds[0].get_long("seed"), Some(12_345_678_901));
    assert_eq!(worlds[0].get_int("seed"), None);
    assert_eq!(worlds[1].get_string("name").as_deref(), Some("nether"));
}

#[test]
fn test_key_order_survives() {
    let node = ConfigNode::parse_toml(SERVER_TOML).unwrap();
    let doc = ConfigTranslator.from_external(&node).unwrap();
    let keys: Vec<String> = doc
        .get_keys(false)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(keys, ["motd", "max_players", "network", "worlds"]);
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    let doc = nested_scalar_document();
    ConfigTranslator.to_external(&doc).save(&path).unwrap();

    let loaded = ConfigNode::load(&path).unwrap();
    let back = ConfigTranslator.from_external(&loaded).unwrap();
    assert_eq!(flatten(&back.get_values(true)), flatten(&doc.get_values(true)));
}

#[test]
fn test_edit_loaded_document_and_write_back() {
    let mut node = ConfigNode::parse_toml(SERVER_TOML).unwrap();
    let mut doc = ConfigTranslator.from_external(&node).unwrap();
    doc.set("network.port", 25570).unwrap();
    doc.set("whitelist", vec!["alice", "bob"]).unwrap();
    ConfigTranslator.populate(&mut node, &doc);

    let text = node.to_toml_string().unwrap();
    let reparsed = ConfigNode::parse_toml(&text).unwrap();
    assert_eq!(
        reparsed.node("network.port").and_then(ConfigNode::as_scalar),
        Some(&Scalar::Int(25570))
    );
    assert_eq!(
        reparsed.node("whitelist.1").and_then(ConfigNode::as_scalar),
        Some(&Scalar::Text("bob".into()))
    );
}

#[test]
fn test_quoted_dotted_key_survives_sibling_table() {
    let node = ConfigNode::parse_toml("\"a.b\" = 1\n\n[a]\nc = 2\n").unwrap();
    let doc = ConfigTranslator.from_external(&node).unwrap();
    assert_eq!(doc.get_int(query!("a.b")), Some(1));
    assert_eq!(doc.get_int("a.c"), Some(2));

    let text = ConfigTranslator.to_external(&doc).to_toml_string().unwrap();
    let reparsed = ConfigTranslator
        .from_external(&ConfigNode::parse_toml(&text).unwrap())
        .unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigNode::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.is_io_error());
    assert_eq!(err.module(), "io");
}

#[test]
fn test_list_root_cannot_be_saved() {
    let mut node = ConfigNode::new();
    node.set_list(vec![ConfigNode::scalar(Scalar::Int(1))]);
    let dir = tempfile::tempdir().unwrap();
    let err = node.save(dir.path().join("list.toml")).unwrap_err();
    assert!(err.is_invalid_argument());
}
