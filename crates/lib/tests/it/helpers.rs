use dataview::data::{Container, DataMap, DataValue, DataViewMut, Resolved, Value};

/// Build the player document used across the suite.
///
/// ```text
/// player
/// ├── name = "Alice"
/// ├── score = 42
/// └── inventory
///     └── 0 = "sword"
/// ```
pub fn player_document() -> Container {
    let mut doc = Container::new();
    doc.set("player.name", "Alice").unwrap();
    doc.set("player.score", 42).unwrap();
    doc.create_view("player.inventory")
        .unwrap()
        .set("0", "sword")
        .unwrap();
    doc
}

/// Build a document holding only scalars and nested views.
pub fn nested_scalar_document() -> Container {
    let mut doc = Container::new();
    doc.set("title", "settings").unwrap();
    doc.set("enabled", true).unwrap();
    doc.set("server.host", "localhost").unwrap();
    doc.set("server.port", 8080).unwrap();
    doc.set("server.limits.timeout", 2.5).unwrap();
    doc.set("server.limits.max_bytes", 5_000_000_000i64).unwrap();
    doc
}

/// Build a detached map from `(key, value)` pairs.
pub fn map_of<const N: usize>(entries: [(&str, DataValue); N]) -> DataMap {
    entries.into_iter().collect()
}

/// Leaf entries of `get_values(true)` output as `(dotted path, value)` pairs.
///
/// Deep listings already carry every leaf under its full path, so expanded
/// views are skipped.
pub fn flatten(values: &[(dataview::data::Query, Resolved<'_>)]) -> Vec<(String, Value)> {
    values
        .iter()
        .filter_map(|(key, resolved)| Some((key.to_string(), resolved.as_value()?.clone())))
        .collect()
}

/// Dotted string form of a list of queries.
pub fn dotted(keys: &[dataview::data::Query]) -> Vec<String> {
    keys.iter().map(ToString::to_string).collect()
}
