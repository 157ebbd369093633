//! Value types for data documents.
//!
//! Two closely related enums describe document content:
//!
//! - [`Value`] is what a document stores. Nested views are referenced by
//!   [`ViewId`] handles into the owning [`Container`](super::Container)'s arena.
//! - [`DataValue`] is a detached, owned tree. It is what callers hand to
//!   `set` and what `to_map` materializes; nested views appear as
//!   [`DataValue::Map`].
//!
//! [`Resolved`] is the shape returned by `get_values`, where deep traversal
//! expands nested views in place.

use std::{collections::BTreeMap, collections::HashMap, fmt};

use super::{container::ViewId, map::OrderedMap, query::Query};

/// A detached document map.
pub type DataMap = OrderedMap<DataValue>;

/// A value stored inside a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// Double precision float
    Double(f64),
    /// UTF-8 text
    Text(String),
    /// Native byte array
    Bytes(Vec<u8>),
    /// Ordered list, may hold nested views
    List(Vec<Value>),
    /// Handle to a nested view in the same container
    View(ViewId),
}

impl Value {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::View(_) => "view",
        }
    }

    /// Returns true if this value is a nested view
    pub fn is_view(&self) -> bool {
        matches!(self, Value::View(_))
    }

    /// Returns the view handle if this is a nested view
    pub fn as_view_id(&self) -> Option<ViewId> {
        match self {
            Value::View(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the elements if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Bytes(bytes) => write!(f, "{bytes:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::View(id) => write!(f, "{id}"),
        }
    }
}

/// A detached document value.
///
/// Maps become nested views when set into a document, lists are stored as
/// snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// Double precision float
    Double(f64),
    /// UTF-8 text
    Text(String),
    /// Native byte array
    Bytes(Vec<u8>),
    /// Ordered list
    List(Vec<DataValue>),
    /// Nested map
    Map(DataMap),
}

impl DataValue {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Bool(_) => "bool",
            DataValue::Int(_) => "int",
            DataValue::Long(_) => "long",
            DataValue::Double(_) => "double",
            DataValue::Text(_) => "text",
            DataValue::Bytes(_) => "bytes",
            DataValue::List(_) => "list",
            DataValue::Map(_) => "map",
        }
    }

    /// Builds a byte array value
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        DataValue::Bytes(bytes.into())
    }

    /// Builds a list from anything convertible
    pub fn list<T: Into<DataValue>>(items: impl IntoIterator<Item = T>) -> Self {
        DataValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the map if this is a map value
    pub fn as_map(&self) -> Option<&DataMap> {
        match self {
            DataValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is a list
    pub fn as_list(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Converts a scalar into its stored form. Lists and maps yield `None`,
    /// they need a container to be stored.
    pub(crate) fn into_scalar(self) -> Result<Value, DataValue> {
        match self {
            DataValue::Bool(b) => Ok(Value::Bool(b)),
            DataValue::Int(n) => Ok(Value::Int(n)),
            DataValue::Long(n) => Ok(Value::Long(n)),
            DataValue::Double(n) => Ok(Value::Double(n)),
            DataValue::Text(s) => Ok(Value::Text(s)),
            DataValue::Bytes(b) => Ok(Value::Bytes(b)),
            other => Err(other),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Bool(b) => write!(f, "{b}"),
            DataValue::Int(n) => write!(f, "{n}"),
            DataValue::Long(n) => write!(f, "{n}"),
            DataValue::Double(n) => write!(f, "{n}"),
            DataValue::Text(s) => write!(f, "\"{s}\""),
            DataValue::Bytes(bytes) => write!(f, "{bytes:?}"),
            DataValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            DataValue::Map(map) => write!(f, "{map}"),
        }
    }
}

// Conversions into DataValue

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i8> for DataValue {
    fn from(value: i8) -> Self {
        DataValue::Int(value.into())
    }
}

impl From<i16> for DataValue {
    fn from(value: i16) -> Self {
        DataValue::Int(value.into())
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Long(value)
    }
}

impl From<u8> for DataValue {
    fn from(value: u8) -> Self {
        DataValue::Int(value.into())
    }
}

impl From<u16> for DataValue {
    fn from(value: u16) -> Self {
        DataValue::Int(value.into())
    }
}

impl From<u32> for DataValue {
    fn from(value: u32) -> Self {
        DataValue::Long(value.into())
    }
}

impl From<f32> for DataValue {
    fn from(value: f32) -> Self {
        DataValue::Double(value.into())
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Double(value)
    }
}

impl From<char> for DataValue {
    fn from(value: char) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl From<&String> for DataValue {
    fn from(value: &String) -> Self {
        DataValue::Text(value.clone())
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(items: Vec<T>) -> Self {
        DataValue::list(items)
    }
}

impl<T: Into<DataValue> + Clone> From<&[T]> for DataValue {
    fn from(items: &[T]) -> Self {
        DataValue::list(items.iter().cloned())
    }
}

impl From<DataMap> for DataValue {
    fn from(map: DataMap) -> Self {
        DataValue::Map(map)
    }
}

impl<K: Into<String>, V: Into<DataValue>> From<BTreeMap<K, V>> for DataValue {
    fn from(map: BTreeMap<K, V>) -> Self {
        DataValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<DataValue>> From<HashMap<K, V>> for DataValue {
    fn from(map: HashMap<K, V>) -> Self {
        DataValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

// Serde support: a DataValue serializes as the plain tree it describes.

impl serde::Serialize for DataValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataValue::Bool(b) => serializer.serialize_bool(*b),
            DataValue::Int(n) => serializer.serialize_i32(*n),
            DataValue::Long(n) => serializer.serialize_i64(*n),
            DataValue::Double(n) => serializer.serialize_f64(*n),
            DataValue::Text(s) => serializer.serialize_str(s),
            DataValue::Bytes(bytes) => serializer.serialize_bytes(bytes),
            DataValue::List(items) => serializer.collect_seq(items),
            DataValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl serde::Serialize for DataMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

struct DataValueVisitor;

impl<'de> serde::de::Visitor<'de> for DataValueVisitor {
    type Value = DataValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a boolean, number, string, byte array, sequence or map")
    }

    fn visit_bool<E>(self, v: bool) -> Result<DataValue, E> {
        Ok(DataValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<DataValue, E> {
        Ok(match i32::try_from(v) {
            Ok(n) => DataValue::Int(n),
            Err(_) => DataValue::Long(v),
        })
    }

    fn visit_u64<E>(self, v: u64) -> Result<DataValue, E> {
        Ok(match (i32::try_from(v), i64::try_from(v)) {
            (Ok(n), _) => DataValue::Int(n),
            (_, Ok(n)) => DataValue::Long(n),
            _ => DataValue::Double(v as f64),
        })
    }

    fn visit_f64<E>(self, v: f64) -> Result<DataValue, E> {
        Ok(DataValue::Double(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<DataValue, E> {
        Ok(DataValue::Text(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<DataValue, E> {
        Ok(DataValue::Text(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<DataValue, E> {
        Ok(DataValue::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<DataValue, E> {
        Ok(DataValue::Bytes(v))
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<DataValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(DataValue::List(items))
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, mut access: A) -> Result<DataValue, A::Error> {
        let mut map = DataMap::new();
        while let Some((key, value)) = access.next_entry::<String, DataValue>()? {
            map.insert(key, value);
        }
        Ok(DataValue::Map(map))
    }
}

impl<'de> serde::Deserialize<'de> for DataValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DataValueVisitor)
    }
}

impl<'de> serde::Deserialize<'de> for DataMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match DataValue::deserialize(deserializer)? {
            DataValue::Map(map) => Ok(map),
            other => Err(serde::de::Error::custom(format!(
                "expected a map, found {}",
                other.type_name()
            ))),
        }
    }
}

/// A value resolved by `get_values`.
///
/// Shallow traversal yields stored values only, nested views stay opaque
/// [`Value::View`] handles. Deep traversal visits the same paths as deep
/// `get_keys`, so every leaf appears under its full path, and each nested
/// view is additionally expanded into its own deep values.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// A stored value
    Value(&'a Value),
    /// The expanded entries of a nested view
    Nested(Vec<(Query, Resolved<'a>)>),
}

impl<'a> Resolved<'a> {
    /// Returns the stored value, if this is not an expanded view
    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Nested(_) => None,
        }
    }

    /// Returns the expanded entries, if this is an expanded view
    pub fn as_nested(&self) -> Option<&[(Query, Resolved<'a>)]> {
        match self {
            Resolved::Nested(entries) => Some(entries),
            Resolved::Value(_) => None,
        }
    }
}
