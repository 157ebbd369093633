use serde_json::{Map, Number, Value as JsonValue};

use super::DataTranslator;
use crate::{
    Result,
    data::{Container, DataMap, DataValue, DataView, DataViewMut, Query, Resolved, Value},
};

/// Translates documents to and from [`serde_json::Value`] trees.
///
/// Objects map to views, arrays to lists. Numbers load as `Int` when they
/// fit in 32 bits, then `Long`, then `Double`. `null` has no document
/// representation and is skipped on load; non-finite doubles are written
/// as `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTranslator;

impl JsonTranslator {
    fn write_view<V: DataView>(&self, target: &mut Map<String, JsonValue>, view: &V) {
        for (key, resolved) in view.get_values(false) {
            let Resolved::Value(value) = resolved else {
                continue;
            };
            let key = key.to_string();
            match value {
                Value::View(id) => {
                    let Some(child) = view.container().view(*id) else {
                        continue;
                    };
                    let slot = target
                        .entry(key)
                        .or_insert_with(|| JsonValue::Object(Map::new()));
                    if !slot.is_object() {
                        *slot = JsonValue::Object(Map::new());
                    }
                    if let JsonValue::Object(object) = slot {
                        self.write_view(object, &child);
                    }
                }
                other => {
                    target.insert(key, self.to_json(view.container(), other));
                }
            }
        }
    }

    fn to_json(&self, container: &Container, value: &Value) -> JsonValue {
        match value {
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(n) => JsonValue::from(*n),
            Value::Long(n) => JsonValue::from(*n),
            Value::Double(n) => Number::from_f64(*n).map_or(JsonValue::Null, JsonValue::Number),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Bytes(bytes) => bytes.iter().map(|b| JsonValue::from(*b)).collect(),
            Value::List(items) => items
                .iter()
                .map(|item| self.to_json(container, item))
                .collect(),
            Value::View(id) => {
                let mut object = Map::new();
                if let Some(child) = container.view(*id) {
                    self.write_view(&mut object, &child);
                }
                JsonValue::Object(object)
            }
        }
    }

    fn to_data_value(&self, value: &JsonValue) -> Option<DataValue> {
        Some(match value {
            JsonValue::Null => return None,
            JsonValue::Bool(b) => DataValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(int) = n.as_i64() {
                    match i32::try_from(int) {
                        Ok(small) => DataValue::Int(small),
                        Err(_) => DataValue::Long(int),
                    }
                } else {
                    // u64 beyond i64, or a float
                    DataValue::Double(n.as_f64()?)
                }
            }
            JsonValue::String(s) => DataValue::Text(s.clone()),
            JsonValue::Array(items) => DataValue::List(
                items
                    .iter()
                    .filter_map(|item| self.to_data_value(item))
                    .collect(),
            ),
            JsonValue::Object(object) => DataValue::Map(
                object
                    .iter()
                    .filter_map(|(key, item)| Some((key.clone(), self.to_data_value(item)?)))
                    .collect::<DataMap>(),
            ),
        })
    }
}

impl DataTranslator for JsonTranslator {
    type External = JsonValue;

    fn to_external<V: DataView>(&self, view: &V) -> JsonValue {
        let mut root = JsonValue::Object(Map::new());
        self.populate(&mut root, view);
        root
    }

    fn populate<V: DataView>(&self, external: &mut JsonValue, view: &V) {
        if !external.is_object() {
            *external = JsonValue::Object(Map::new());
        }
        if let JsonValue::Object(object) = external {
            self.write_view(object, view);
        }
        tracing::debug!(
            path = %view.current_path(),
            entries = view.get_keys(false).len(),
            "Wrote document to JSON"
        );
    }

    fn from_external(&self, external: &JsonValue) -> Result<Container> {
        let mut container = Container::new();
        match external {
            JsonValue::Null => {}
            JsonValue::Object(object) => {
                for (key, item) in object {
                    if let Some(value) = self.to_data_value(item) {
                        container.set(Query::segment(key.as_str()), value)?;
                    }
                }
            }
            JsonValue::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(value) = self.to_data_value(item) {
                        container.set(Query::segment(index.to_string()), value)?;
                    }
                }
            }
            scalar => {
                if let Some(value) = self.to_data_value(scalar) {
                    container.set(Query::of('.', ""), value)?;
                }
            }
        }
        tracing::debug!(
            entries = container.get_keys(false).len(),
            "Read document from JSON"
        );
        Ok(container)
    }
}
