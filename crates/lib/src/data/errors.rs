//! Error types for data document operations.

use thiserror::Error;

use super::container::ViewId;

/// Structured error types for data document operations.
///
/// Lookups never fail: a missing entry or a value of the wrong shape is an
/// absent result. These errors are reserved for writes that cannot be
/// carried out.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The query cannot address the requested operation
    #[error("Invalid query '{query}': {reason}")]
    InvalidQuery { query: String, reason: String },

    /// A view was asked to contain itself
    #[error("Cannot copy view '{path}' into itself")]
    SelfReference { path: String },

    /// A view handle no longer refers to a live view
    #[error("Unknown view: {view}")]
    UnknownView { view: ViewId },

    /// An argument had the wrong shape for the operation
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl DataError {
    /// Check if this error is caused by an unusable query
    pub fn is_query_error(&self) -> bool {
        matches!(self, DataError::InvalidQuery { .. })
    }

    /// Check if this error is caused by self-insertion
    pub fn is_self_reference(&self) -> bool {
        matches!(self, DataError::SelfReference { .. })
    }

    /// Check if this error is caused by a stale or foreign view handle
    pub fn is_unknown_view(&self) -> bool {
        matches!(self, DataError::UnknownView { .. })
    }

    /// Check if this error is an argument validation failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            DataError::InvalidArgument { .. } | DataError::InvalidQuery { .. }
        )
    }

    /// Get the query or path text if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            DataError::InvalidQuery { query, .. } => Some(query),
            DataError::SelfReference { path } => Some(path),
            _ => None,
        }
    }
}

// Conversion from DataError to the main Error type
impl From<DataError> for crate::Error {
    fn from(err: DataError) -> Self {
        crate::Error::Data(err)
    }
}
