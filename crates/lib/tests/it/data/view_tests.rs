//! View traversal, typed getters and key enumeration

use dataview::{
    data::{Container, DataValue, DataView, DataViewMut, Query, Resolved, Value},
    query,
};

use crate::helpers::{dotted, flatten, map_of, player_document};

// ===== TRAVERSAL =====

#[test]
fn test_deep_key_order_parent_first() {
    let mut doc = Container::new();
    doc.set("a.b", 1).unwrap();
    doc.set("a.c", 2).unwrap();
    assert_eq!(dotted(&doc.get_keys(true)), ["a", "a.b", "a.c"]);
    assert_eq!(dotted(&doc.get_keys(false)), ["a"]);
}

#[test]
fn test_deep_keys_list_shallow_keys_first() {
    let mut doc = Container::new();
    doc.set("x.inner", 1).unwrap();
    doc.set("y", 2).unwrap();
    doc.set("z.inner", 3).unwrap();
    assert_eq!(
        dotted(&doc.get_keys(true)),
        ["x", "y", "z", "x.inner", "z.inner"]
    );
}

#[test]
fn test_keys_follow_insertion_order() {
    let mut doc = Container::new();
    for key in ["delta", "alpha", "charlie", "bravo"] {
        doc.set(key, key).unwrap();
    }
    doc.set("alpha", "again").unwrap();
    assert_eq!(
        dotted(&doc.get_keys(false)),
        ["delta", "alpha", "charlie", "bravo"]
    );
}

#[test]
fn test_shallow_values_keep_views_opaque() {
    let doc = player_document();
    let player = doc.get_view("player").unwrap();
    let values = player.get_values(false);

    assert_eq!(values.len(), 3);
    assert_eq!(values[0].0, query!("name"));
    assert_eq!(
        values[0].1,
        Resolved::Value(&Value::Text("Alice".into()))
    );
    let inventory = values[2].1.as_value().unwrap();
    assert!(inventory.is_view());
}

#[test]
fn test_deep_values_expand_views() {
    let doc = player_document();
    let values = doc.get_values(true);
    assert_eq!(values.len(), 5);
    assert_eq!(values[0].0, query!("player"));
    let player = values[0].1.as_nested().unwrap();
    assert_eq!(player.len(), 4);
    assert_eq!(values[1].1, Resolved::Value(&Value::Text("Alice".into())));

    let flat = flatten(&values);
    let paths: Vec<&str> = flat.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(paths, ["player.name", "player.score", "player.inventory.0"]);
}

#[test]
fn test_values_walk_the_same_paths_as_keys() {
    let mut doc = Container::new();
    doc.set("a.b", 1).unwrap();
    doc.set("a.c", 2).unwrap();
    doc.set("d", 3).unwrap();

    for deep in [false, true] {
        let value_keys: Vec<Query> = doc.get_values(deep).into_iter().map(|(k, _)| k).collect();
        assert_eq!(value_keys, doc.get_keys(deep));
    }

    let values = doc.get_values(true);
    assert_eq!(dotted(&doc.get_keys(true)), ["a", "d", "a.b", "a.c"]);
    assert_eq!(values[2].1, Resolved::Value(&Value::Int(1)));
    assert_eq!(values[0].1.as_nested().map(|entries| entries.len()), Some(2));
}

#[test]
fn test_view_identity() {
    let doc = player_document();
    let inventory = doc.get_view("player.inventory").unwrap();
    assert_eq!(inventory.name(), "inventory");
    assert_eq!(inventory.current_path(), &query!("player", "inventory"));
    assert_eq!(inventory.parent().unwrap().name(), "player");
    assert_eq!(
        inventory.get(Query::empty()).and_then(Value::as_view_id),
        Some(inventory.view_id())
    );
}

#[test]
fn test_relative_paths_from_sub_view() {
    let doc = player_document();
    let player = doc.get_view("player").unwrap();
    assert_eq!(player.get_string("inventory.0").as_deref(), Some("sword"));
    assert!(player.get("player").is_none());
}

#[test]
fn test_write_through_sub_view_handle() {
    let mut doc = player_document();
    let mut player = doc.get_view_mut("player").unwrap();
    player.set("level", 3).unwrap();
    player.create_view("stats").unwrap().set("hp", 100).unwrap();
    assert_eq!(player.remove("score"), Some(DataValue::Int(42)));

    assert_eq!(doc.get_int("player.level"), Some(3));
    assert_eq!(doc.get_int("player.stats.hp"), Some(100));
    assert!(!doc.contains("player.score"));
    assert_eq!(
        doc.get_view("player.stats").unwrap().current_path(),
        &query!("player", "stats")
    );
}

#[test]
fn test_create_view_with_seed() {
    let mut doc = Container::new();
    let seed = map_of([
        ("flat", 1.into()),
        ("dotted.key", 2.into()),
        ("nested", DataValue::Map(map_of([("inner", 3.into())]))),
    ]);
    doc.create_view_with("cfg", seed).unwrap();

    assert_eq!(doc.get_int("cfg.flat"), Some(1));
    assert_eq!(doc.get_int("cfg.dotted.key"), Some(2));
    assert_eq!(doc.get_int("cfg.nested.inner"), Some(3));
    assert!(doc.get_view("cfg.nested").is_some());
}

#[test]
fn test_create_view_with_splits_nested_seed_keys() {
    let mut doc = Container::new();
    let seed = map_of([(
        "combat",
        DataValue::Map(map_of([("melee.attack", 7.into()), ("range", 12.into())])),
    )]);
    doc.create_view_with("stats", seed).unwrap();

    assert_eq!(doc.get_int("stats.combat.melee.attack"), Some(7));
    assert_eq!(doc.get_int("stats.combat.range"), Some(12));
    assert!(doc.get(query!("stats", "combat", "melee.attack")).is_none());
}

#[test]
fn test_create_view_through_scalar() {
    let mut doc = Container::new();
    doc.set("a", 1).unwrap();
    doc.create_view("a.b").unwrap();
    assert!(doc.get_view("a.b").is_some());
}

#[test]
fn test_create_view_empty_path_fails() {
    let mut doc = Container::new();
    assert!(doc.create_view(Query::empty()).unwrap_err().is_invalid_argument());
}

// ===== TYPED GETTERS =====

#[test]
fn test_typed_getters_coerce() {
    let mut doc = Container::new();
    doc.set("flag", "yes").unwrap();
    doc.set("count", "12").unwrap();
    doc.set("ratio", 3).unwrap();
    doc.set("letter", "q").unwrap();

    assert_eq!(doc.get_bool("flag"), Some(true));
    assert_eq!(doc.get_int("count"), Some(12));
    assert_eq!(doc.get_long("count"), Some(12));
    assert_eq!(doc.get_short("count"), Some(12));
    assert_eq!(doc.get_byte("count"), Some(12));
    assert_eq!(doc.get_double("ratio"), Some(3.0));
    assert_eq!(doc.get_float("ratio"), Some(3.0));
    assert_eq!(doc.get_string("ratio").as_deref(), Some("3"));
    assert_eq!(doc.get_char("letter"), Some('q'));
}

#[test]
fn test_typed_getters_absent_on_failure() {
    let mut doc = Container::new();
    doc.set("word", "hello").unwrap();
    doc.set("view.inner", 1).unwrap();

    assert_eq!(doc.get_int("word"), None);
    assert_eq!(doc.get_bool("word"), None);
    assert_eq!(doc.get_string("view"), None);
    assert_eq!(doc.get_int("missing"), None);
    assert!(doc.get_map("word").is_none());
}

#[test]
fn test_get_map() {
    let doc = player_document();
    let inventory = doc.get_map("player.inventory").unwrap();
    assert_eq!(inventory, map_of([("0", "sword".into())]));
    assert_eq!(doc.get_map(Query::empty()).unwrap(), doc.to_map());
}

// ===== LIST GETTERS =====

#[test]
fn test_lenient_int_list_drops_bad_elements() {
    let mut doc = Container::new();
    doc.set(
        "xs",
        vec![DataValue::from(1), DataValue::from("two"), DataValue::from(3)],
    )
    .unwrap();
    assert_eq!(doc.get_int_list("xs"), Some(vec![1, 3]));
}

#[test]
fn test_list_getters_per_type() {
    let mut doc = Container::new();
    doc.set(
        "mixed",
        vec![
            DataValue::from("1"),
            DataValue::from(2.9),
            DataValue::from(true),
            DataValue::from("no"),
        ],
    )
    .unwrap();

    assert_eq!(doc.get_long_list("mixed"), Some(vec![1, 2]));
    assert_eq!(doc.get_bool_list("mixed"), Some(vec![true, true, false]));
    assert_eq!(doc.get_double_list("mixed"), Some(vec![1.0, 2.9]));
    assert_eq!(
        doc.get_string_list("mixed"),
        Some(vec![
            "1".to_string(),
            "2.9".to_string(),
            "true".to_string(),
            "no".to_string()
        ])
    );
    assert_eq!(doc.get_char_list("mixed"), Some(vec!['1', '2', 't', 'n']));
}

#[test]
fn test_list_snapshot_is_isolated() {
    let mut doc = Container::new();
    let mut source = vec![1, 2, 3];
    doc.set("xs", source.clone()).unwrap();
    source.push(4);
    assert_eq!(doc.get_int_list("xs"), Some(vec![1, 2, 3]));
}

#[test]
fn test_list_of_maps_become_views() {
    let mut doc = Container::new();
    doc.set(
        "party",
        vec![
            DataValue::Map(map_of([("name", "Alice".into())])),
            DataValue::from("not a member"),
            DataValue::Map(map_of([("name", "Bob".into())])),
        ],
    )
    .unwrap();

    let views = doc.get_view_list("party").unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[1].get_string("name").as_deref(), Some("Bob"));
    assert_eq!(views[1].current_path(), &query!("party", "2"));

    let maps = doc.get_map_list("party").unwrap();
    assert_eq!(maps[0], map_of([("name", "Alice".into())]));
}

#[test]
fn test_nested_lists() {
    let mut doc = Container::new();
    doc.set(
        "grid",
        vec![DataValue::from(vec![1, 2]), DataValue::from(vec![3, 4])],
    )
    .unwrap();
    let rows = doc.get_list("grid").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], Value::List(vec![Value::Int(3), Value::Int(4)]));
    // Rows are not ints, so the lenient getter drops them all
    assert_eq!(doc.get_int_list("grid"), Some(vec![]));
}
