//! End-to-end document scenarios

use std::collections::BTreeSet;

use dataview::data::{Container, DataView, DataViewMut};

use crate::helpers::{dotted, player_document};

#[test]
fn test_player_scenario() {
    let doc = player_document();

    assert_eq!(doc.get_string("player.name").as_deref(), Some("Alice"));
    assert_eq!(doc.get_int("player.score"), Some(42));
    let inventory = doc.get_view("player.inventory").unwrap();
    assert_eq!(inventory.get_string("0").as_deref(), Some("sword"));

    let keys: BTreeSet<String> = dotted(&doc.get_keys(true)).into_iter().collect();
    let expected: BTreeSet<String> = [
        "player",
        "player.name",
        "player.score",
        "player.inventory",
        "player.inventory.0",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_rebuilding_a_section() {
    let mut doc = player_document();

    // Reset the inventory, then refill it through the returned handle
    let mut inventory = doc.create_view("player.inventory").unwrap();
    inventory.set("0", "bow").unwrap();
    inventory.set("1", "arrow").unwrap();

    assert_eq!(
        dotted(&doc.get_view("player.inventory").unwrap().get_keys(false)),
        ["0", "1"]
    );
    assert_eq!(doc.get_string("player.name").as_deref(), Some("Alice"));
}

#[test]
fn test_arena_slots_are_recycled() {
    let mut doc = Container::new();
    for round in 0..50 {
        doc.set("scratch.a.b.c", round).unwrap();
        doc.remove("scratch");
    }
    assert_eq!(doc.view_count(), 1);

    doc.set("scratch.a.b.c", 1).unwrap();
    assert_eq!(doc.view_count(), 4);
}
