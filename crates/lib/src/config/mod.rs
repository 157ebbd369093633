//! Configuration trees.
//!
//! A [`ConfigNode`] is a keyed node holding either nothing, a scalar, an
//! ordered map of child nodes or a list of child nodes. It is the external
//! representation used by [`ConfigTranslator`](crate::translator::ConfigTranslator)
//! and can be read from and written to TOML (see [`toml`](self::toml)).
//!
//! ```rust
//! use dataview::config::{ConfigNode, Scalar};
//!
//! let mut root = ConfigNode::new();
//! root.node_mut("server.port").set_scalar(Scalar::Int(8080));
//! assert_eq!(
//!     root.node("server.port").and_then(|n| n.as_scalar()),
//!     Some(&Scalar::Int(8080))
//! );
//! assert_eq!(root.node("server.port").unwrap().key(), Some("port"));
//! ```

pub mod toml;

use std::fmt;

use crate::data::{DataMap, DataValue, OrderedMap, Query};

/// A terminal configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Text(String),
}

impl Scalar {
    /// Converts into a detached document value.
    pub fn to_data_value(&self) -> DataValue {
        match self {
            Scalar::Bool(b) => DataValue::Bool(*b),
            Scalar::Int(n) => DataValue::Int(*n),
            Scalar::Long(n) => DataValue::Long(*n),
            Scalar::Double(n) => DataValue::Double(*n),
            Scalar::Text(s) => DataValue::Text(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Long(n) => write!(f, "{n}"),
            Scalar::Double(n) => write!(f, "{n}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Content of a [`ConfigNode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NodeValue {
    /// No value. Empty nodes are skipped on conversion.
    #[default]
    Empty,
    Scalar(Scalar),
    Map(OrderedMap<ConfigNode>),
    List(Vec<ConfigNode>),
}

/// A node of a configuration tree.
///
/// The root node has no key. Children of a map carry their map key, list
/// elements carry no key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigNode {
    key: Option<String>,
    value: NodeValue,
}

impl ConfigNode {
    /// Creates an empty root node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty node with the given key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: NodeValue::Empty,
        }
    }

    /// Creates an unkeyed node holding a scalar.
    pub fn scalar(value: Scalar) -> Self {
        Self {
            key: None,
            value: NodeValue::Scalar(value),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    /// Returns true if the node holds no value.
    pub fn is_empty(&self) -> bool {
        matches!(self.value, NodeValue::Empty)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.value {
            NodeValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap<ConfigNode>> {
        match &self.value {
            NodeValue::Map(children) => Some(children),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigNode]> {
        match &self.value {
            NodeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Replaces the value of this node with a scalar.
    pub fn set_scalar(&mut self, value: Scalar) -> &mut Self {
        self.value = NodeValue::Scalar(value);
        self
    }

    /// Replaces the value of this node with a list. List elements lose
    /// their keys.
    pub fn set_list(&mut self, items: Vec<ConfigNode>) -> &mut Self {
        self.value = NodeValue::List(
            items
                .into_iter()
                .map(|mut item| {
                    item.key = None;
                    item
                })
                .collect(),
        );
        self
    }

    /// Replaces the value of this node with an empty map.
    pub fn set_empty_map(&mut self) -> &mut Self {
        self.value = NodeValue::Map(OrderedMap::new());
        self
    }

    /// Clears the value of this node.
    pub fn clear(&mut self) -> &mut Self {
        self.value = NodeValue::Empty;
        self
    }

    /// Returns the descendant at `path`, following map children by key and
    /// list elements by index.
    pub fn node(&self, path: impl Into<Query>) -> Option<&ConfigNode> {
        let path = path.into();
        let mut current = self;
        for segment in path.parts() {
            current = match &current.value {
                NodeValue::Map(children) => children.get(segment)?,
                NodeValue::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Returns the descendant at `path`, creating it if needed.
    ///
    /// Every node on the way that is not a map becomes an empty map first,
    /// so any previous value there is discarded.
    pub fn node_mut(&mut self, path: impl Into<Query>) -> &mut ConfigNode {
        let path = path.into();
        let mut current = self;
        for segment in path.parts() {
            current = current.child_mut(segment);
        }
        current
    }

    /// Returns the map child `key`, turning this node into a map if needed.
    pub fn child_mut(&mut self, key: &str) -> &mut ConfigNode {
        if !matches!(self.value, NodeValue::Map(_)) {
            self.value = NodeValue::Map(OrderedMap::new());
        }
        match &mut self.value {
            NodeValue::Map(children) => {
                children.get_or_insert_with(key, || ConfigNode::with_key(key))
            }
            _ => unreachable!("Just assigned a map"),
        }
    }

    /// Converts this node into a detached document value. Empty nodes, and
    /// empty children of maps and lists, are dropped.
    pub fn to_data_value(&self) -> Option<DataValue> {
        match &self.value {
            NodeValue::Empty => None,
            NodeValue::Scalar(scalar) => Some(scalar.to_data_value()),
            NodeValue::Map(children) => Some(DataValue::Map(
                children
                    .iter()
                    .filter_map(|(key, child)| Some((key.clone(), child.to_data_value()?)))
                    .collect::<DataMap>(),
            )),
            NodeValue::List(items) => Some(DataValue::List(
                items.iter().filter_map(ConfigNode::to_data_value).collect(),
            )),
        }
    }
}

impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            NodeValue::Empty => write!(f, "<empty>"),
            NodeValue::Scalar(scalar) => write!(f, "{scalar}"),
            NodeValue::Map(children) => write!(f, "{children}"),
            NodeValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
