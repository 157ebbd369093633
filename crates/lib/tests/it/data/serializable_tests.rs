//! Rendering application types as documents and rebuilding them

use dataview::data::{
    Container, DataBuilder, DataSerializable, DataValue, DataView, DataViewMut, View,
};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    name: String,
    count: i32,
}

impl DataSerializable for Item {
    fn to_container(&self) -> Container {
        let mut container = Container::new();
        container.set("name", self.name.as_str()).unwrap();
        container.set("count", self.count).unwrap();
        container
    }
}

impl DataBuilder for Item {
    fn build(view: &View<'_>) -> Option<Self> {
        Some(Item {
            name: view.get_string("name")?,
            count: view.get_int("count")?,
        })
    }
}

fn sword() -> Item {
    Item {
        name: "sword".to_string(),
        count: 1,
    }
}

#[test]
fn test_set_and_get_serializable() {
    let mut doc = Container::new();
    doc.set_serializable("hand", &sword()).unwrap();

    assert_eq!(doc.get_string("hand.name").as_deref(), Some("sword"));
    assert_eq!(doc.get_serializable::<Item>("hand"), Some(sword()));
    assert_eq!(doc.get_serializable::<Item>("missing"), None);
}

#[test]
fn test_set_serializable_merges() {
    let mut doc = Container::new();
    doc.set("hand.enchanted", true).unwrap();
    doc.set_serializable("hand", &sword()).unwrap();
    assert_eq!(doc.get_bool("hand.enchanted"), Some(true));
    assert_eq!(doc.get_int("hand.count"), Some(1));
}

#[test]
fn test_serializable_lists_drop_unbuildable() {
    let shield = Item {
        name: "shield".to_string(),
        count: 2,
    };
    let mut doc = Container::new();
    doc.set(
        "bag",
        vec![
            sword().to_data_value(),
            DataValue::from(5),
            shield.to_data_value(),
        ],
    )
    .unwrap();

    let items: Vec<Item> = doc.get_serializable_list("bag").unwrap();
    assert_eq!(items, vec![sword(), shield]);

    // A view missing a required entry is skipped
    let mut broken = sword().to_container();
    broken.remove("count");
    doc.set("bag2", vec![DataValue::from(&broken), sword().to_data_value()])
        .unwrap();
    let items: Vec<Item> = doc.get_serializable_list("bag2").unwrap();
    assert_eq!(items, vec![sword()]);
}

#[test]
fn test_container_is_serializable() {
    let mut source = Container::new();
    source.set("a.b", 1).unwrap();

    let mut doc = Container::new();
    doc.set_serializable("copy", &source).unwrap();
    assert_eq!(doc.get_int("copy.a.b"), Some(1));

    let rebuilt: Container = doc.get_serializable("copy").unwrap();
    assert_eq!(rebuilt, source);
}
