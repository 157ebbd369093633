use super::DataTranslator;
use crate::{
    Result,
    config::{ConfigNode, NodeValue, Scalar},
    data::{Container, DataValue, DataView, DataViewMut, Query, Resolved, Value},
};

/// Translates documents to and from [`ConfigNode`] trees.
///
/// Views become map nodes, lists become list nodes, scalars become scalar
/// nodes keyed by their entry name.
///
/// ```rust
/// use dataview::data::{Container, DataView, DataViewMut};
/// use dataview::translator::{ConfigTranslator, DataTranslator};
///
/// let mut doc = Container::new();
/// doc.set("server.port", 8080).unwrap();
///
/// let node = ConfigTranslator.to_external(&doc);
/// let back = ConfigTranslator.from_external(&node).unwrap();
/// assert_eq!(back.get_int("server.port"), Some(8080));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigTranslator;

impl ConfigTranslator {
    fn write_view<V: DataView>(&self, target: &mut ConfigNode, view: &V) {
        if target.as_map().is_none() {
            target.set_empty_map();
        }
        for (key, resolved) in view.get_values(false) {
            // Shallow traversal never expands views
            let Resolved::Value(value) = resolved else {
                continue;
            };
            let child = target.node_mut(&key);
            self.write_value(child, view.container(), value);
        }
    }

    fn write_value(&self, target: &mut ConfigNode, container: &Container, value: &Value) {
        match value {
            Value::View(id) => {
                if let Some(child) = container.view(*id) {
                    self.write_view(target, &child);
                }
            }
            Value::List(items) => {
                target.set_list(
                    items
                        .iter()
                        .map(|item| self.list_element(container, item))
                        .collect(),
                );
            }
            Value::Bytes(bytes) => {
                target.set_list(
                    bytes
                        .iter()
                        .map(|b| ConfigNode::scalar(Scalar::Int((*b).into())))
                        .collect(),
                );
            }
            Value::Bool(b) => {
                target.set_scalar(Scalar::Bool(*b));
            }
            Value::Int(n) => {
                target.set_scalar(Scalar::Int(*n));
            }
            Value::Long(n) => {
                target.set_scalar(Scalar::Long(*n));
            }
            Value::Double(n) => {
                target.set_scalar(Scalar::Double(*n));
            }
            Value::Text(s) => {
                target.set_scalar(Scalar::Text(s.clone()));
            }
        }
    }

    fn list_element(&self, container: &Container, value: &Value) -> ConfigNode {
        let mut node = ConfigNode::new();
        self.write_value(&mut node, container, value);
        node
    }
}

impl DataTranslator for ConfigTranslator {
    type External = ConfigNode;

    fn to_external<V: DataView>(&self, view: &V) -> ConfigNode {
        let mut root = ConfigNode::new();
        self.populate(&mut root, view);
        root
    }

    fn populate<V: DataView>(&self, external: &mut ConfigNode, view: &V) {
        self.write_view(external, view);
        tracing::debug!(
            path = %view.current_path(),
            entries = view.get_keys(false).len(),
            "Wrote document to configuration node"
        );
    }

    fn from_external(&self, external: &ConfigNode) -> Result<Container> {
        let mut container = Container::new();
        match external.value() {
            NodeValue::Empty => {}
            NodeValue::Scalar(scalar) => {
                // A bare root scalar lands on the single empty segment
                let query = match external.key() {
                    Some(key) => root_scalar_query(key),
                    None => Query::of('.', ""),
                };
                container.set(query, scalar.to_data_value())?;
            }
            NodeValue::Map(children) => {
                for (key, child) in children.iter() {
                    if let Some(value) = child.to_data_value() {
                        container.set(Query::segment(key.as_str()), value)?;
                    }
                }
            }
            NodeValue::List(items) => match external.key() {
                Some(key) => {
                    let values = items.iter().filter_map(ConfigNode::to_data_value).collect();
                    container.set(Query::segment(key), DataValue::List(values))?;
                }
                None => {
                    for (index, item) in items.iter().enumerate() {
                        if let Some(value) = item.to_data_value() {
                            container.set(Query::segment(index.to_string()), value)?;
                        }
                    }
                }
            },
        }
        tracing::debug!(
            entries = container.get_keys(false).len(),
            "Read document from configuration node"
        );
        Ok(container)
    }
}

/// Path for the key of a standalone scalar node. The key is split on `.`;
/// a key that splits into nothing (such as `"."`) is kept as one segment.
fn root_scalar_query(key: &str) -> Query {
    let query = Query::of('.', key);
    if query.is_empty() {
        Query::segment(key)
    } else {
        query
    }
}
