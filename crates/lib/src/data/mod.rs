//! Hierarchical, path-addressable data documents.
//!
//! A document is a [`Container`]: a root view whose entries are scalars,
//! lists or nested views, addressed by [`Query`] paths. Reads go through the
//! [`DataView`] trait, writes through [`DataViewMut`]. Both are implemented
//! by the container itself and by the [`View`]/[`ViewMut`] handles it hands
//! out for nested views.
//!
//! Values enter a document as [`DataValue`] trees and are stored as
//! [`Value`]s, where nested views are arena handles ([`ViewId`]).
//! [`DataView::to_map`] materializes them back into detached [`DataMap`]s.

pub mod coerce;
mod container;
mod errors;
mod map;
mod query;
mod serializable;
mod value;
mod view;

pub use container::{Container, ViewId};
pub use errors::DataError;
pub use map::OrderedMap;
pub use query::{DEFAULT_SEPARATOR, Query};
pub use serializable::{DataBuilder, DataSerializable};
pub use value::{DataMap, DataValue, Resolved, Value};
pub use view::{DataView, DataViewMut, View, ViewMut};
