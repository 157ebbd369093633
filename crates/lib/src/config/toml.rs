//! TOML loading and saving for configuration trees.
//!
//! Key order of tables survives a load/save cycle. Integers that fit in 32
//! bits load as [`Scalar::Int`], larger ones as [`Scalar::Long`]. TOML
//! datetimes have no configuration scalar and load as text.

use std::{fs, path::Path};

use ::toml::{Table, Value as TomlValue};

use super::{ConfigNode, NodeValue, Scalar};
use crate::{Result, data::DataError};

impl ConfigNode {
    /// Builds a node from a TOML value.
    pub fn from_toml(key: Option<String>, value: &TomlValue) -> Self {
        let value = match value {
            TomlValue::String(s) => NodeValue::Scalar(Scalar::Text(s.clone())),
            TomlValue::Integer(n) => NodeValue::Scalar(match i32::try_from(*n) {
                Ok(small) => Scalar::Int(small),
                Err(_) => Scalar::Long(*n),
            }),
            TomlValue::Float(n) => NodeValue::Scalar(Scalar::Double(*n)),
            TomlValue::Boolean(b) => NodeValue::Scalar(Scalar::Bool(*b)),
            TomlValue::Datetime(dt) => NodeValue::Scalar(Scalar::Text(dt.to_string())),
            TomlValue::Array(items) => NodeValue::List(
                items
                    .iter()
                    .map(|item| ConfigNode::from_toml(None, item))
                    .collect(),
            ),
            TomlValue::Table(table) => return ConfigNode::from_table(key, table),
        };
        ConfigNode { key, value }
    }

    /// Builds a map node from a TOML table.
    pub fn from_table(key: Option<String>, table: &Table) -> Self {
        let children = table
            .iter()
            .map(|(child_key, child)| {
                (
                    child_key.clone(),
                    ConfigNode::from_toml(Some(child_key.clone()), child),
                )
            })
            .collect();
        ConfigNode {
            key,
            value: NodeValue::Map(children),
        }
    }

    /// Converts this node into a TOML value. Empty nodes have none.
    pub fn to_toml(&self) -> Option<TomlValue> {
        match &self.value {
            NodeValue::Empty => None,
            NodeValue::Scalar(scalar) => Some(match scalar {
                Scalar::Bool(b) => TomlValue::Boolean(*b),
                Scalar::Int(n) => TomlValue::Integer((*n).into()),
                Scalar::Long(n) => TomlValue::Integer(*n),
                Scalar::Double(n) => TomlValue::Float(*n),
                Scalar::Text(s) => TomlValue::String(s.clone()),
            }),
            NodeValue::Map(children) => Some(TomlValue::Table(
                children
                    .iter()
                    .filter_map(|(key, child)| Some((key.clone(), child.to_toml()?)))
                    .collect(),
            )),
            NodeValue::List(items) => Some(TomlValue::Array(
                items.iter().filter_map(ConfigNode::to_toml).collect(),
            )),
        }
    }

    /// Parses a TOML document into a root node.
    pub fn parse_toml(text: &str) -> Result<Self> {
        let table: Table = ::toml::from_str(text)?;
        Ok(ConfigNode::from_table(None, &table))
    }

    /// Renders this node as a TOML document.
    ///
    /// Only map nodes (and empty nodes, as an empty document) can be
    /// written at the top level.
    pub fn to_toml_string(&self) -> Result<String> {
        let table = match self.to_toml() {
            None => Table::new(),
            Some(TomlValue::Table(table)) => table,
            Some(other) => {
                return Err(DataError::InvalidArgument {
                    reason: format!(
                        "a TOML document needs a table at the top level, found {}",
                        other.type_str()
                    ),
                }
                .into());
            }
        };
        Ok(::toml::to_string_pretty(&table)?)
    }

    /// Reads a TOML file into a root node.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let node = ConfigNode::parse_toml(&text)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(node)
    }

    /// Writes this node to a TOML file, replacing its contents.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        fs::write(path, text)?;
        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}
