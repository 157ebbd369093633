//! Coupling between application types and data documents.
//!
//! A type that can render itself as a document implements
//! [`DataSerializable`]; it can then be stored with
//! [`DataViewMut::set_serializable`](super::DataViewMut::set_serializable).
//! The reverse direction is [`DataBuilder`], used by
//! [`DataView::get_serializable`](super::DataView::get_serializable).

use super::{
    container::Container,
    value::DataValue,
    view::{DataView, View},
};

/// A value that can render itself as a data document.
pub trait DataSerializable {
    /// Renders this value as a fresh document.
    fn to_container(&self) -> Container;

    /// Renders this value as a detached map, suitable for lists.
    fn to_data_value(&self) -> DataValue {
        DataValue::Map(self.to_container().to_map())
    }
}

/// A value that can be rebuilt from a view of a data document.
pub trait DataBuilder: Sized {
    /// Builds a value from `view`, or returns `None` if required entries are
    /// missing or malformed.
    fn build(view: &View<'_>) -> Option<Self>;
}

impl DataSerializable for Container {
    fn to_container(&self) -> Container {
        self.copy()
    }
}

impl DataBuilder for Container {
    fn build(view: &View<'_>) -> Option<Self> {
        Some(view.copy())
    }
}

impl From<&Container> for DataValue {
    fn from(container: &Container) -> Self {
        DataValue::Map(container.to_map())
    }
}

impl From<View<'_>> for DataValue {
    fn from(view: View<'_>) -> Self {
        DataValue::Map(view.to_map())
    }
}
