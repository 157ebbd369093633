//! Path-addressed access to the views of a [`Container`].
//!
//! Every view of a document, the container root included, exposes the same
//! surface through two traits:
//!
//! - [`DataView`] for reads: raw lookups, typed getters, lenient list
//!   getters and traversal.
//! - [`DataViewMut`] for writes: `set`, `remove` and `create_view`.
//!
//! Reads never fail. A path that does not resolve, or a value that cannot be
//! coerced to the requested type, yields `None`.
//!
//! # Path resolution
//!
//! Paths are anything convertible into a [`Query`]; plain strings are split
//! on `.`. The empty query addresses the view itself. Read operations walk
//! existing views only. `set` and `create_view` create the intermediate views
//! they need, replacing non-view entries on the way.
//!
//! ```rust
//! use dataview::data::{Container, DataView, DataViewMut};
//!
//! let mut doc = Container::new();
//! doc.set("player.name", "Alice").unwrap();
//! doc.set("player.score", 42).unwrap();
//! doc.create_view("player.inventory").unwrap().set("0", "sword").unwrap();
//!
//! assert_eq!(doc.get_string("player.name").as_deref(), Some("Alice"));
//! assert_eq!(doc.get_int("player.score"), Some(42));
//! let inventory = doc.get_view("player.inventory").unwrap();
//! assert_eq!(inventory.get_string("0").as_deref(), Some("sword"));
//! ```

use std::borrow::Cow;

use super::{
    coerce::{self, coerce_lenient},
    container::{Container, Node, ViewId},
    query::{EMPTY_QUERY, Query},
    serializable::{DataBuilder, DataSerializable},
    value::{DataMap, DataValue, Resolved, Value},
};

/// Read access to a view of a data document.
///
/// Implementors only supply the owning container and the view handle; every
/// operation is provided.
pub trait DataView {
    /// The container owning this view.
    fn container(&self) -> &Container;

    /// Handle of this view inside its container.
    fn view_id(&self) -> ViewId;

    /// Path from the container root to this view. Empty for the root.
    fn current_path(&self) -> &Query {
        self.container()
            .node(self.view_id())
            .map(Node::path)
            .unwrap_or(&EMPTY_QUERY)
    }

    /// Last segment of [`current_path`](Self::current_path), empty for the root.
    fn name(&self) -> &str {
        self.current_path()
            .parts()
            .last()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The view directly enclosing this one. The root has no parent.
    fn parent(&self) -> Option<View<'_>> {
        let parent = self.container().node(self.view_id())?.parent()?;
        self.container().view(parent)
    }

    /// Returns true if this view holds no entries.
    fn is_empty(&self) -> bool {
        self.container()
            .node(self.view_id())
            .is_none_or(|node| node.entries().is_empty())
    }

    /// Returns true if `path` resolves to a value. The empty path always does.
    fn contains(&self, path: impl Into<Query>) -> bool {
        self.get(path).is_some()
    }

    /// Returns true if every path resolves.
    fn contains_all<I, Q>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Query>,
    {
        paths.into_iter().all(|path| self.contains(path))
    }

    /// Returns the raw value stored at `path`.
    ///
    /// The empty path returns a [`Value::View`] handle to this view.
    fn get(&self, path: impl Into<Query>) -> Option<&Value> {
        self.container().lookup(self.view_id(), &path.into())
    }

    /// Returns the nested view at `path`.
    fn get_view(&self, path: impl Into<Query>) -> Option<View<'_>> {
        let id = self.get(path)?.as_view_id()?;
        self.container().view(id)
    }

    /// Materializes the nested view at `path`.
    fn get_map(&self, path: impl Into<Query>) -> Option<DataMap> {
        self.get_view(path).map(|view| view.to_map())
    }

    fn get_bool(&self, path: impl Into<Query>) -> Option<bool> {
        self.get(path).and_then(coerce::as_bool)
    }

    fn get_byte(&self, path: impl Into<Query>) -> Option<u8> {
        self.get(path).and_then(coerce::as_byte)
    }

    fn get_short(&self, path: impl Into<Query>) -> Option<i16> {
        self.get(path).and_then(coerce::as_short)
    }

    fn get_int(&self, path: impl Into<Query>) -> Option<i32> {
        self.get(path).and_then(coerce::as_int)
    }

    fn get_long(&self, path: impl Into<Query>) -> Option<i64> {
        self.get(path).and_then(coerce::as_long)
    }

    fn get_float(&self, path: impl Into<Query>) -> Option<f32> {
        self.get(path).and_then(coerce::as_float)
    }

    fn get_double(&self, path: impl Into<Query>) -> Option<f64> {
        self.get(path).and_then(coerce::as_double)
    }

    fn get_char(&self, path: impl Into<Query>) -> Option<char> {
        self.get(path).and_then(coerce::as_char)
    }

    fn get_string(&self, path: impl Into<Query>) -> Option<String> {
        self.get(path).and_then(coerce::as_string)
    }

    /// Returns the list stored at `path`.
    ///
    /// Byte arrays are read as lists of [`Value::Int`].
    fn get_list(&self, path: impl Into<Query>) -> Option<Cow<'_, [Value]>> {
        match self.get(path)? {
            Value::List(items) => Some(Cow::Borrowed(items)),
            Value::Bytes(bytes) => Some(Cow::Owned(
                bytes.iter().map(|b| Value::Int((*b).into())).collect(),
            )),
            _ => None,
        }
    }

    // List getters follow the lenient policy: elements that do not coerce
    // are dropped, the list itself is only absent when `path` is not a list.

    fn get_string_list(&self, path: impl Into<Query>) -> Option<Vec<String>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_string))
    }

    fn get_char_list(&self, path: impl Into<Query>) -> Option<Vec<char>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_char))
    }

    fn get_bool_list(&self, path: impl Into<Query>) -> Option<Vec<bool>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_bool))
    }

    fn get_byte_list(&self, path: impl Into<Query>) -> Option<Vec<u8>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_byte))
    }

    fn get_short_list(&self, path: impl Into<Query>) -> Option<Vec<i16>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_short))
    }

    fn get_int_list(&self, path: impl Into<Query>) -> Option<Vec<i32>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_int))
    }

    fn get_long_list(&self, path: impl Into<Query>) -> Option<Vec<i64>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_long))
    }

    fn get_float_list(&self, path: impl Into<Query>) -> Option<Vec<f32>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_float))
    }

    fn get_double_list(&self, path: impl Into<Query>) -> Option<Vec<f64>> {
        self.get_list(path)
            .map(|items| coerce_lenient(&items, coerce::as_double))
    }

    /// Materializes every view held by the list at `path`.
    fn get_map_list(&self, path: impl Into<Query>) -> Option<Vec<DataMap>> {
        let container = self.container();
        self.get_list(path).map(|items| {
            coerce_lenient(&items, |item| {
                item.as_view_id().map(|id| container.materialize(id))
            })
        })
    }

    /// Returns the views held by the list at `path`.
    fn get_view_list(&self, path: impl Into<Query>) -> Option<Vec<View<'_>>> {
        let container = self.container();
        self.get_list(path).map(|items| {
            coerce_lenient(&items, |item| {
                item.as_view_id().and_then(|id| container.view(id))
            })
        })
    }

    /// Builds a value from the view at `path`.
    fn get_serializable<T: DataBuilder>(&self, path: impl Into<Query>) -> Option<T> {
        let view = self.get_view(path)?;
        T::build(&view)
    }

    /// Builds one value per view in the list at `path`, dropping views that
    /// do not build.
    fn get_serializable_list<T: DataBuilder>(&self, path: impl Into<Query>) -> Option<Vec<T>> {
        self.get_view_list(path)
            .map(|views| views.iter().filter_map(T::build).collect())
    }

    /// Lists entry paths relative to this view.
    ///
    /// Deep listing appends, after the direct keys, the keys of every nested
    /// view prefixed with the name of that view.
    fn get_keys(&self, deep: bool) -> Vec<Query> {
        self.container().keys_in(self.view_id(), deep)
    }

    /// Pairs each path of [`get_keys`](Self::get_keys) with its value.
    ///
    /// Deep listing expands nested views into [`Resolved::Nested`].
    fn get_values(&self, deep: bool) -> Vec<(Query, Resolved<'_>)> {
        self.container().values_in(self.view_id(), deep)
    }

    /// Detached copy of this view's entries.
    fn to_map(&self) -> DataMap {
        self.container().materialize(self.view_id())
    }

    /// Detached document holding a copy of this view's subtree.
    fn copy(&self) -> Container {
        Container::from_map(self.to_map())
    }
}

/// Write access to a view of a data document.
pub trait DataViewMut: DataView {
    /// The container owning this view.
    fn container_mut(&mut self) -> &mut Container;

    /// Stores `value` at `path`.
    ///
    /// Intermediate views are reused or created, only the final entry is
    /// replaced. A [`DataValue::Map`] replaces the entry with a fresh view
    /// holding the map's entries; lists are stored as snapshots.
    ///
    /// Fails on the empty path.
    fn set(&mut self, path: impl Into<Query>, value: impl Into<DataValue>) -> crate::Result<()> {
        let id = self.view_id();
        self.container_mut()
            .set_in(id, &path.into(), value.into())?;
        Ok(())
    }

    /// Deep-copies another view of the same document into `path`.
    ///
    /// Entries are merged into the destination one by one. Copying a view
    /// into itself is rejected.
    fn set_view(&mut self, path: impl Into<Query>, source: ViewId) -> crate::Result<()> {
        let id = self.view_id();
        self.container_mut().set_view_in(id, &path.into(), source)?;
        Ok(())
    }

    /// Deep-copies another document into `path`, merging entry by entry.
    fn set_container(&mut self, path: impl Into<Query>, source: &Container) -> crate::Result<()> {
        let id = self.view_id();
        self.container_mut()
            .merge_map_in(id, &path.into(), source.to_map())?;
        Ok(())
    }

    /// Renders `value` as a document and merges it into `path`.
    fn set_serializable<T: DataSerializable + ?Sized>(
        &mut self,
        path: impl Into<Query>,
        value: &T,
    ) -> crate::Result<()> {
        let rendered = value.to_container();
        self.set_container(path, &rendered)
    }

    /// Removes the entry at `path`, returning a detached copy of it.
    fn remove(&mut self, path: impl Into<Query>) -> Option<DataValue> {
        let id = self.view_id();
        self.container_mut().remove_in(id, &path.into())
    }

    /// Creates an empty view at `path`, replacing whatever was there.
    fn create_view(&mut self, path: impl Into<Query>) -> crate::Result<ViewMut<'_>> {
        let id = self.view_id();
        let container = self.container_mut();
        let child = container.create_view_in(id, &path.into())?;
        Ok(ViewMut::new(container, child))
    }

    /// Creates a view at `path` seeded with `seed`.
    ///
    /// Seed keys are split on `.` at every level; nested maps are seeded
    /// into nested views the same way.
    fn create_view_with(
        &mut self,
        path: impl Into<Query>,
        seed: DataMap,
    ) -> crate::Result<ViewMut<'_>> {
        let id = self.view_id();
        let container = self.container_mut();
        let child = container.create_view_with_in(id, &path.into(), seed)?;
        Ok(ViewMut::new(container, child))
    }

    /// Returns a write handle for the nested view at `path`.
    fn get_view_mut(&mut self, path: impl Into<Query>) -> Option<ViewMut<'_>> {
        let child = self.get(path)?.as_view_id()?;
        self.container_mut().view_mut(child)
    }
}

/// Shared handle to one view of a container.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    container: &'a Container,
    id: ViewId,
}

impl<'a> View<'a> {
    pub(crate) fn new(container: &'a Container, id: ViewId) -> Self {
        Self { container, id }
    }

    /// Like [`DataView::get_view`], but the result borrows the container
    /// rather than this handle.
    pub fn get_view(&self, path: impl Into<Query>) -> Option<View<'a>> {
        let id = self.container.lookup_view(self.id, &path.into())?;
        self.container.view(id)
    }
}

impl DataView for View<'_> {
    fn container(&self) -> &Container {
        self.container
    }

    fn view_id(&self) -> ViewId {
        self.id
    }
}

impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.to_map() == other.to_map()
    }
}

/// Exclusive handle to one view of a container.
#[derive(Debug)]
pub struct ViewMut<'a> {
    container: &'a mut Container,
    id: ViewId,
}

impl<'a> ViewMut<'a> {
    pub(crate) fn new(container: &'a mut Container, id: ViewId) -> Self {
        Self { container, id }
    }

    /// Downgrades to a shared handle.
    pub fn as_view(&self) -> View<'_> {
        View::new(&*self.container, self.id)
    }
}

impl DataView for ViewMut<'_> {
    fn container(&self) -> &Container {
        &*self.container
    }

    fn view_id(&self) -> ViewId {
        self.id
    }
}

impl DataViewMut for ViewMut<'_> {
    fn container_mut(&mut self) -> &mut Container {
        self.container
    }
}

impl DataView for Container {
    fn container(&self) -> &Container {
        self
    }

    fn view_id(&self) -> ViewId {
        ViewId::ROOT
    }
}

impl DataViewMut for Container {
    fn container_mut(&mut self) -> &mut Container {
        self
    }
}
