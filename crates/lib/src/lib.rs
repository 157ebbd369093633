//!
//! Dataview: hierarchical, path-addressable data documents.
//! This library provides an in-memory document model and the plumbing to move documents in and out of external tree formats.
//!
//! ## Core Concepts
//!
//! * **Queries (`data::Query`)**: Ordered sequences of string segments addressing a location inside a document.
//! * **Containers (`data::Container`)**: The root of a document. A container owns every nested view in a single arena.
//! * **Views (`data::View`, `data::ViewMut`)**: Nodes of a document holding named scalars, lists and nested views. The `data::DataView` and `data::DataViewMut` traits give containers and views the same read/write surface.
//! * **Coercion (`data::coerce`)**: Typed getters convert stored values on a best-effort basis, returning `None` instead of failing. List getters drop elements that do not convert.
//! * **Translators (`translator::DataTranslator`)**: Stateless converters between documents and external trees:
//!     * **ConfigTranslator**: Configuration trees (`config::ConfigNode`), which load from and save to TOML.
//!     * **JsonTranslator**: `serde_json::Value` trees.
//! * **Serializable coupling (`data::DataSerializable`, `data::DataBuilder`)**: Application types that render themselves as documents and rebuild from views.

pub mod config;
pub mod data;
pub mod translator;

/// Re-export the `Container` struct for easier access.
pub use data::Container;

/// Result type used throughout the Dataview library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Dataview library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Structured document errors from the data module
    #[error(transparent)]
    Data(data::DataError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Data(_) => "data",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::TomlParse(_) | Error::TomlWrite(_) => "toml",
        }
    }

    /// Check if this error is document-related.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::Data(_))
    }

    /// Check if this error was caused by an unusable argument or query.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error was caused by copying a view into itself.
    pub fn is_self_reference(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_self_reference(),
            _ => false,
        }
    }

    /// Check if this error was caused by a stale view handle.
    pub fn is_unknown_view(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_unknown_view(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error came from reading or writing TOML.
    pub fn is_toml_error(&self) -> bool {
        matches!(self, Error::TomlParse(_) | Error::TomlWrite(_))
    }

    /// Check if this error came from JSON serialization.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
