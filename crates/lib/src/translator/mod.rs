//! Conversion between data documents and external tree representations.
//!
//! A [`DataTranslator`] re-shapes a document into some other tree type and
//! back. Translators are stateless; they only restructure data and leave
//! failure reporting to the serializer of the external format.
//!
//! Two translators are provided:
//!
//! - [`ConfigTranslator`] for [`ConfigNode`](crate::config::ConfigNode) trees
//! - [`JsonTranslator`] for [`serde_json::Value`] trees
//!
//! Every external map key becomes one literal entry name, separators
//! included, so round trips are exact for documents built from scalars and
//! nested views. Byte arrays come back as lists of integers.

mod config;
mod json;

pub use config::ConfigTranslator;
pub use json::JsonTranslator;

use crate::{
    Result,
    data::{Container, DataView},
};

/// Converts documents to and from an external tree type.
pub trait DataTranslator {
    /// The external tree type.
    type External;

    /// Renders `view` as a fresh external tree.
    fn to_external<V: DataView>(&self, view: &V) -> Self::External;

    /// Writes the entries of `view` onto an existing external tree.
    ///
    /// Existing content that `view` does not mention is kept.
    fn populate<V: DataView>(&self, external: &mut Self::External, view: &V);

    /// Builds a fresh document from an external tree.
    fn from_external(&self, external: &Self::External) -> Result<Container>;
}
