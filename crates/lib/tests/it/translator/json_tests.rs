//! JsonTranslator behavior

use dataview::{
    data::{Container, DataValue, DataView, DataViewMut, Query, Value},
    query,
    translator::{DataTranslator, JsonTranslator},
};
use serde_json::json;

use crate::helpers::{flatten, nested_scalar_document, player_document};

#[test]
fn test_structural_round_trip() {
    let doc = nested_scalar_document();
    let json = JsonTranslator.to_external(&doc);
    let back = JsonTranslator.from_external(&json).unwrap();
    assert_eq!(flatten(&back.get_values(true)), flatten(&doc.get_values(true)));
}

#[test]
fn test_to_external_shape() {
    let json = JsonTranslator.to_external(&player_document());
    assert_eq!(
        json,
        json!({
            "player": {
                "name": "Alice",
                "score": 42,
                "inventory": { "0": "sword" }
            }
        })
    );
}

#[test]
fn test_from_external_object() {
    let json = json!({
        "motd": "hello",
        "limits": { "players": 20, "view": { "distance": 10 } },
        "ops": ["alice", "bob"],
        "spawn.x": 5
    });
    let doc = JsonTranslator.from_external(&json).unwrap();

    assert_eq!(doc.get_string("motd").as_deref(), Some("hello"));
    assert_eq!(doc.get_int("limits.view.distance"), Some(10));
    assert_eq!(
        doc.get_string_list("ops"),
        Some(vec!["alice".to_string(), "bob".to_string()])
    );
    assert_eq!(doc.get_int(Query::segment("spawn.x")), Some(5));
    assert!(doc.get_view("spawn").is_none());
}

#[test]
fn test_round_trip_keeps_keys_containing_separator() {
    let mut doc = Container::new();
    doc.set(query!("a.b"), 1).unwrap();
    doc.set(query!("world", "spawn.x"), 5).unwrap();
    doc.set("world.name", "overworld").unwrap();

    let json = JsonTranslator.to_external(&doc);
    assert_eq!(
        json,
        json!({"a.b": 1, "world": {"spawn.x": 5, "name": "overworld"}})
    );
    let back = JsonTranslator.from_external(&json).unwrap();
    assert_eq!(back, doc);
    assert_eq!(back.get_keys(true), doc.get_keys(true));
}

#[test]
fn test_dotted_and_nested_keys_do_not_collide() {
    let doc = JsonTranslator
        .from_external(&json!({"a.b": 1, "a": {"c": 2}}))
        .unwrap();
    assert_eq!(doc.get_int(query!("a.b")), Some(1));
    assert_eq!(doc.get_int("a.c"), Some(2));
    assert_eq!(doc.get_keys(false), [query!("a.b"), query!("a")]);
}

#[test]
fn test_root_array_and_scalar() {
    let doc = JsonTranslator.from_external(&json!(["a", {"b": 1}])).unwrap();
    assert_eq!(doc.get_string("0").as_deref(), Some("a"));
    assert_eq!(doc.get_int("1.b"), Some(1));

    let doc = JsonTranslator.from_external(&json!(3)).unwrap();
    assert_eq!(doc.get(query!("")), Some(&Value::Int(3)));

    let doc = JsonTranslator.from_external(&json!(null)).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_bytes_widen_to_int_arrays() {
    let mut doc = Container::new();
    doc.set("raw", DataValue::bytes([1u8, 2])).unwrap();
    let json = JsonTranslator.to_external(&doc);
    assert_eq!(json, json!({"raw": [1, 2]}));

    let back = JsonTranslator.from_external(&json).unwrap();
    assert_eq!(
        back.get("raw"),
        Some(&Value::List(vec![Value::Int(1), Value::Int(2)]))
    );
    assert_eq!(back.get_byte_list("raw"), doc.get_byte_list("raw"));
}

#[test]
fn test_populate_replaces_non_object_root() {
    let mut json = json!("not an object");
    JsonTranslator.populate(&mut json, &player_document());
    assert_eq!(json["player"]["score"], json!(42));
}
