//! The arena that owns every view of a data document.
//!
//! A [`Container`] is a document root together with all of the views nested
//! below it. Views live in slots of a single arena and refer to each other by
//! [`ViewId`] handles, so the parent link of a view is a plain index rather
//! than a back pointer.
//!
//! Slots are reused once the view they held is removed or replaced. Each
//! slot carries a generation counter that is bumped on release, which lets
//! a handle to a released view be detected instead of silently resolving to
//! whatever view moved into the slot afterwards.

use std::fmt;

use super::{
    errors::DataError,
    map::OrderedMap,
    query::Query,
    value::{DataMap, DataValue, Resolved, Value},
    view::{DataView, View, ViewMut},
};

/// Handle to a view stored in a [`Container`].
///
/// Handles are only meaningful for the container that issued them, and only
/// while the view is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId {
    index: u32,
    generation: u32,
}

impl ViewId {
    /// The root view of every container.
    pub const ROOT: ViewId = ViewId {
        index: 0,
        generation: 0,
    };

    /// Slot index inside the arena
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns true if this handle refers to a container root
    pub fn is_root(&self) -> bool {
        *self == ViewId::ROOT
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    parent: Option<ViewId>,
    path: Query,
    /// `Value::View` pointing at this node, handed out for empty-query lookups
    handle: Value,
    entries: OrderedMap<Value>,
}

impl Node {
    pub(crate) fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub(crate) fn path(&self) -> &Query {
        &self.path
    }

    pub(crate) fn entries(&self) -> &OrderedMap<Value> {
        &self.entries
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A data document: the root view and the arena holding its nested views.
///
/// All read and write operations come from the [`DataView`] and
/// [`DataViewMut`](super::DataViewMut) traits, which `Container` implements
/// for its root view.
#[derive(Clone)]
pub struct Container {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates an empty document.
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            path: Query::empty(),
            handle: Value::View(ViewId::ROOT),
            entries: OrderedMap::new(),
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
        }
    }

    /// Builds a document holding the given entries.
    ///
    /// Keys are taken as single segments. Nested maps become nested views.
    pub fn from_map(map: DataMap) -> Self {
        let mut container = Self::new();
        for (key, value) in map {
            container.set_entry(ViewId::ROOT, key, value);
        }
        container
    }

    /// Returns a read handle for the view `id`, if it is alive.
    pub fn view(&self, id: ViewId) -> Option<View<'_>> {
        self.node(id).map(|_| View::new(self, id))
    }

    /// Returns a write handle for the view `id`, if it is alive.
    pub fn view_mut(&mut self, id: ViewId) -> Option<ViewMut<'_>> {
        if self.is_live(id) {
            Some(ViewMut::new(self, id))
        } else {
            None
        }
    }

    /// Returns a read handle for the root view.
    pub fn as_view(&self) -> View<'_> {
        View::new(self, ViewId::ROOT)
    }

    /// Returns a write handle for the root view.
    pub fn as_view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::new(self, ViewId::ROOT)
    }

    /// Number of live views, the root included.
    pub fn view_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Returns true if `id` refers to a live view of this container.
    pub fn is_live(&self, id: ViewId) -> bool {
        self.node(id).is_some()
    }

    pub(crate) fn node(&self, id: ViewId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn require_live(&self, id: ViewId) -> Result<(), DataError> {
        if self.is_live(id) {
            Ok(())
        } else {
            Err(DataError::UnknownView { view: id })
        }
    }

    // Arena management

    fn alloc(&mut self, parent: ViewId, path: Query) -> ViewId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = ViewId {
            index,
            generation: slot.generation,
        };
        slot.node = Some(Node {
            parent: Some(parent),
            path,
            handle: Value::View(id),
            entries: OrderedMap::new(),
        });
        id
    }

    /// Releases every view reachable from a value that is leaving the tree.
    fn release(&mut self, value: Value) {
        match value {
            Value::View(id) => self.free_node(id),
            Value::List(items) => items.into_iter().for_each(|item| self.release(item)),
            _ => {}
        }
    }

    fn free_node(&mut self, id: ViewId) {
        if id.is_root() {
            return;
        }
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return;
        };
        if slot.generation != id.generation {
            return;
        }
        let Some(node) = slot.node.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        tracing::trace!(view = %id, path = %node.path, "Released view");

        for (_, value) in node.entries {
            self.release(value);
        }
    }

    /// Stores `value` under `key`, releasing whatever it replaces.
    fn insert_entry(&mut self, id: ViewId, key: String, value: Value) {
        let old = match self.node_mut(id) {
            Some(node) => node.entries.insert(key, value),
            None => None,
        };
        if let Some(old) = old {
            self.release(old);
        }
    }

    /// Creates a fresh empty view under `key`, replacing any existing entry.
    fn create_child(&mut self, parent: ViewId, key: String) -> ViewId {
        let path = match self.node(parent) {
            Some(node) => node.path.then_segment(key.clone()),
            None => Query::segment(key.clone()),
        };
        let child = self.alloc(parent, path);
        self.insert_entry(parent, key, Value::View(child));
        child
    }

    /// Returns the view stored under `key`, creating it when the entry is
    /// missing or holds something else.
    fn child_view(&mut self, parent: ViewId, key: &str) -> ViewId {
        let existing = self
            .node(parent)
            .and_then(|node| node.entries.get(key))
            .and_then(Value::as_view_id);
        match existing {
            Some(child) => child,
            None => self.create_child(parent, key.to_string()),
        }
    }

    /// Walks to the view owning the last segment of `query`, creating
    /// intermediate views as needed.
    fn descend(&mut self, id: ViewId, query: &Query) -> ViewId {
        let mut current = id;
        if let Some((_, init)) = query.parts().split_last() {
            for segment in init {
                current = self.child_view(current, segment);
            }
        }
        current
    }

    // Reads

    pub(crate) fn lookup(&self, id: ViewId, query: &Query) -> Option<&Value> {
        let (last, init) = match query.parts().split_last() {
            Some(split) => split,
            None => return self.node(id).map(|node| &node.handle),
        };
        let mut current = id;
        for segment in init {
            current = self.node(current)?.entries.get(segment)?.as_view_id()?;
        }
        self.node(current)?.entries.get(last)
    }

    pub(crate) fn lookup_view(&self, id: ViewId, query: &Query) -> Option<ViewId> {
        self.lookup(id, query).and_then(Value::as_view_id)
    }

    pub(crate) fn keys_in(&self, id: ViewId, deep: bool) -> Vec<Query> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        let mut keys: Vec<Query> = node.entries.keys().map(Query::segment).collect();
        if deep {
            for (key, value) in node.entries.iter() {
                if let Value::View(child) = value {
                    let prefix = Query::segment(key.clone());
                    keys.extend(
                        self.keys_in(*child, true)
                            .into_iter()
                            .map(|sub| prefix.then(&sub)),
                    );
                }
            }
        }
        keys
    }

    /// Pairs every key of [`keys_in`](Self::keys_in) with its value. Deep
    /// traversal also expands each nested view into its own deep values.
    pub(crate) fn values_in(&self, id: ViewId, deep: bool) -> Vec<(Query, Resolved<'_>)> {
        self.keys_in(id, deep)
            .into_iter()
            .filter_map(|key| {
                let resolved = match self.lookup(id, &key)? {
                    Value::View(child) if deep => Resolved::Nested(self.values_in(*child, true)),
                    other => Resolved::Value(other),
                };
                Some((key, resolved))
            })
            .collect()
    }

    /// Detached copy of the entries of view `id`.
    pub(crate) fn materialize(&self, id: ViewId) -> DataMap {
        match self.node(id) {
            Some(node) => node
                .entries
                .iter()
                .map(|(key, value)| (key.clone(), self.materialize_value(value)))
                .collect(),
            None => DataMap::new(),
        }
    }

    pub(crate) fn materialize_value(&self, value: &Value) -> DataValue {
        match value {
            Value::Bool(b) => DataValue::Bool(*b),
            Value::Int(n) => DataValue::Int(*n),
            Value::Long(n) => DataValue::Long(*n),
            Value::Double(n) => DataValue::Double(*n),
            Value::Text(s) => DataValue::Text(s.clone()),
            Value::Bytes(b) => DataValue::Bytes(b.clone()),
            Value::List(items) => {
                DataValue::List(items.iter().map(|item| self.materialize_value(item)).collect())
            }
            Value::View(id) => DataValue::Map(self.materialize(*id)),
        }
    }

    // Writes

    pub(crate) fn set_in(
        &mut self,
        id: ViewId,
        query: &Query,
        value: DataValue,
    ) -> Result<(), DataError> {
        let Some(last) = query.parts().last() else {
            return Err(DataError::InvalidQuery {
                query: query.to_string(),
                reason: "cannot set a value at the empty query".to_string(),
            });
        };
        self.require_live(id)?;
        let owner = self.descend(id, query);
        self.set_entry(owner, last.clone(), value);
        Ok(())
    }

    /// Stores a detached value directly under `key` of view `id`.
    ///
    /// Maps replace the entry with a fresh view, lists are stored as
    /// snapshots with their maps turned into views.
    pub(crate) fn set_entry(&mut self, id: ViewId, key: String, value: DataValue) {
        match value.into_scalar() {
            Ok(scalar) => self.insert_entry(id, key, scalar),
            Err(DataValue::Map(map)) => {
                let child = self.create_child(id, key);
                for (sub_key, sub_value) in map {
                    self.set_entry(child, sub_key, sub_value);
                }
            }
            Err(DataValue::List(items)) => {
                let base = match self.node(id) {
                    Some(node) => node.path.then_segment(key.clone()),
                    None => Query::segment(key.clone()),
                };
                let list = self.normalize_list(id, &base, items);
                self.insert_entry(id, key, Value::List(list));
            }
            // into_scalar only rejects lists and maps
            Err(_) => {}
        }
    }

    /// Converts a detached list into its stored form. Maps inside the list
    /// become views owned by `holder`.
    fn normalize_list(
        &mut self,
        holder: ViewId,
        base: &Query,
        items: Vec<DataValue>,
    ) -> Vec<Value> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item.into_scalar() {
                Ok(scalar) => scalar,
                Err(DataValue::Map(map)) => {
                    let view = self.alloc(holder, base.then_segment(index.to_string()));
                    for (key, value) in map {
                        self.set_entry(view, key, value);
                    }
                    Value::View(view)
                }
                Err(DataValue::List(inner)) => {
                    let nested = base.then_segment(index.to_string());
                    Value::List(self.normalize_list(holder, &nested, inner))
                }
                Err(_) => Value::List(Vec::new()),
            })
            .collect()
    }

    pub(crate) fn create_view_in(
        &mut self,
        id: ViewId,
        query: &Query,
    ) -> Result<ViewId, DataError> {
        let Some(last) = query.parts().last() else {
            return Err(DataError::InvalidQuery {
                query: query.to_string(),
                reason: "cannot create a view at the empty query".to_string(),
            });
        };
        self.require_live(id)?;
        let owner = self.descend(id, query);
        let child = self.create_child(owner, last.clone());
        tracing::debug!(view = %child, path = %query, "Created view");
        Ok(child)
    }

    pub(crate) fn create_view_with_in(
        &mut self,
        id: ViewId,
        query: &Query,
        seed: DataMap,
    ) -> Result<ViewId, DataError> {
        let child = self.create_view_in(id, query)?;
        for (key, value) in seed {
            let path = Query::of('.', &key);
            match value {
                DataValue::Map(nested) => {
                    self.create_view_with_in(child, &path, nested)?;
                }
                other => self.set_in(child, &path, other)?,
            }
        }
        Ok(child)
    }

    /// Returns the view at `query`, creating it and any missing intermediate
    /// views. The empty query resolves to `id` itself.
    fn ensure_view_in(&mut self, id: ViewId, query: &Query) -> Result<ViewId, DataError> {
        self.require_live(id)?;
        let mut current = id;
        for segment in query.parts() {
            current = self.child_view(current, segment);
        }
        Ok(current)
    }

    /// Merges `map` into the view at `query` entry by entry.
    ///
    /// Existing entries that the map does not mention are kept, nested maps
    /// merge into existing nested views.
    pub(crate) fn merge_map_in(
        &mut self,
        id: ViewId,
        query: &Query,
        map: DataMap,
    ) -> Result<(), DataError> {
        let target = self.ensure_view_in(id, query)?;
        self.merge_into(target, map);
        Ok(())
    }

    fn merge_into(&mut self, target: ViewId, map: DataMap) {
        for (key, value) in map {
            match value {
                DataValue::Map(sub) => {
                    let child = self.child_view(target, &key);
                    self.merge_into(child, sub);
                }
                other => self.set_entry(target, key, other),
            }
        }
    }

    pub(crate) fn set_view_in(
        &mut self,
        id: ViewId,
        query: &Query,
        source: ViewId,
    ) -> Result<(), DataError> {
        self.require_live(source)?;
        if source == id {
            let path = self
                .node(id)
                .map(|node| node.path.to_string())
                .unwrap_or_default();
            return Err(DataError::SelfReference { path });
        }
        let snapshot = self.materialize(source);
        tracing::debug!(
            source = %source,
            path = %query,
            entries = snapshot.len(),
            "Copying view"
        );
        self.merge_map_in(id, query, snapshot)
    }

    pub(crate) fn remove_in(&mut self, id: ViewId, query: &Query) -> Option<DataValue> {
        let last = query.parts().last()?;
        let owner = self.lookup_view(id, &query.pop())?;
        let removed = self.node_mut(owner)?.entries.remove(last)?;
        let detached = self.materialize_value(&removed);
        self.release(removed);
        tracing::debug!(path = %query, "Removed entry");
        Some(detached)
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.materialize(ViewId::ROOT) == other.materialize(ViewId::ROOT)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("entries", &self.materialize(ViewId::ROOT))
            .field("views", &self.view_count())
            .finish()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.materialize(ViewId::ROOT))
    }
}

impl From<DataMap> for Container {
    fn from(map: DataMap) -> Self {
        Container::from_map(map)
    }
}

impl serde::Serialize for Container {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Container {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DataMap::deserialize(deserializer).map(Container::from_map)
    }
}
