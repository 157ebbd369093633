//! Query types for addressing locations inside a data document.
//!
//! A [`Query`] is an immutable, ordered sequence of string segments. Two
//! queries are the same path when their segments are equal, no matter which
//! separator was used to build them.
//!
//! # Usage
//!
//! ```rust
//! use dataview::data::Query;
//! use dataview::query;
//!
//! // Split a string on a literal separator
//! let slashed = Query::of('/', "player/inventory/slot");
//! let dotted = Query::of('.', "player.inventory.slot");
//! assert_eq!(slashed, dotted);
//!
//! // Explicit segments, no splitting
//! let explicit = query!("player", "inventory", "slot");
//! assert_eq!(explicit, dotted);
//!
//! // Concatenation
//! let joined = query!("player").then(&query!("inventory", "slot"));
//! assert_eq!(joined.as_string("."), "player.inventory.slot");
//! ```
//!
//! Segments are never escaped: a segment that contains the separator does not
//! survive a trip through [`Query::as_string`] and back.

use std::{fmt, str::FromStr};

/// The separator used by `Display`, `FromStr` and `From<&str>`.
pub const DEFAULT_SEPARATOR: char = '.';

/// An ordered sequence of path segments.
///
/// The empty query (zero segments) denotes the node a query is evaluated
/// against. All other queries address an entry below it.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Query {
    parts: Vec<String>,
}

pub(crate) static EMPTY_QUERY: Query = Query { parts: Vec::new() };

impl Query {
    /// Returns the empty query.
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    /// Splits `path` on a literal separator character.
    ///
    /// An empty `path` produces a single empty segment. Trailing empty
    /// segments are dropped, so `"a.b."` is `["a", "b"]` and `"."` is the
    /// empty query.
    pub fn of(separator: char, path: &str) -> Self {
        let mut buf = [0u8; 4];
        Self::split(separator.encode_utf8(&mut buf), path)
    }

    /// Splits `path` on a literal separator string.
    ///
    /// The separator is matched literally. An empty separator leaves `path`
    /// as a single segment.
    pub fn split(separator: &str, path: &str) -> Self {
        if path.is_empty() {
            return Self {
                parts: vec![String::new()],
            };
        }
        if separator.is_empty() {
            return Self {
                parts: vec![path.to_string()],
            };
        }

        let mut parts: Vec<String> = path.split(separator).map(str::to_string).collect();
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
        Self { parts }
    }

    /// Wraps the given segments verbatim.
    ///
    /// Segments are not validated; empty segments are kept as they are.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a query with exactly one segment.
    pub fn segment(segment: impl Into<String>) -> Self {
        Self {
            parts: vec![segment.into()],
        }
    }

    /// Returns the segments of this query.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns an owned copy of the segments.
    pub fn to_parts(&self) -> Vec<String> {
        self.parts.clone()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if this query has no segments.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns a new query made of this query's segments followed by `other`'s.
    pub fn then(&self, other: &Query) -> Query {
        let mut parts = Vec::with_capacity(self.parts.len() + other.parts.len());
        parts.extend(self.parts.iter().cloned());
        parts.extend(other.parts.iter().cloned());
        Query { parts }
    }

    /// Returns a new query with one more segment at the end.
    pub fn then_segment(&self, segment: impl Into<String>) -> Query {
        let mut parts = self.parts.clone();
        parts.push(segment.into());
        Query { parts }
    }

    /// Returns one single-segment query per segment, in order.
    pub fn query_parts(&self) -> Vec<Query> {
        self.parts.iter().map(Query::segment).collect()
    }

    /// Returns the first segment, if any.
    pub fn first(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }

    /// Returns the last segment as a query, or the query itself when it has
    /// at most one segment.
    pub fn last(&self) -> Query {
        match self.parts.last() {
            Some(last) if self.parts.len() > 1 => Query::segment(last.clone()),
            _ => self.clone(),
        }
    }

    /// Returns this query without its last segment.
    pub fn pop(&self) -> Query {
        match self.parts.split_last() {
            Some((_, init)) => Query::from_parts(init.iter().cloned()),
            None => Query::empty(),
        }
    }

    /// Returns this query without its first segment.
    pub fn pop_first(&self) -> Query {
        match self.parts.split_first() {
            Some((_, rest)) => Query::from_parts(rest.iter().cloned()),
            None => Query::empty(),
        }
    }

    /// Joins the segments with `separator`.
    pub fn as_string(&self, separator: impl AsRef<str>) -> String {
        self.parts.join(separator.as_ref())
    }
}

impl AsRef<Query> for Query {
    fn as_ref(&self) -> &Query {
        self
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 4];
        write!(
            f,
            "{}",
            self.as_string(DEFAULT_SEPARATOR.encode_utf8(&mut buf))
        )
    }
}

impl FromStr for Query {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Query::of(DEFAULT_SEPARATOR, s))
    }
}

impl From<&str> for Query {
    fn from(path: &str) -> Self {
        Query::of(DEFAULT_SEPARATOR, path)
    }
}

impl From<String> for Query {
    fn from(path: String) -> Self {
        Query::of(DEFAULT_SEPARATOR, &path)
    }
}

impl From<&String> for Query {
    fn from(path: &String) -> Self {
        Query::of(DEFAULT_SEPARATOR, path)
    }
}

impl From<&Query> for Query {
    fn from(query: &Query) -> Self {
        query.clone()
    }
}

impl From<Vec<String>> for Query {
    fn from(parts: Vec<String>) -> Self {
        Query { parts }
    }
}

impl<const N: usize> From<[&str; N]> for Query {
    fn from(parts: [&str; N]) -> Self {
        Query::from_parts(parts)
    }
}

impl FromIterator<String> for Query {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Query::from_parts(iter)
    }
}

/// Constructs a [`Query`] from explicit segments.
///
/// Segments are taken verbatim (no splitting) and may be any `ToString`.
///
/// ```rust
/// # use dataview::query;
/// let empty = query!();
/// assert!(empty.is_empty());
///
/// let slot = 3;
/// let q = query!("inventory", slot);
/// assert_eq!(q.parts(), ["inventory", "3"]);
/// ```
#[macro_export]
macro_rules! query {
    () => {
        $crate::data::Query::empty()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::data::Query::from_parts([$($segment.to_string()),+])
    };
}
