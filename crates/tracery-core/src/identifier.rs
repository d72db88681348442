//! Node identity: engine-side indices and caller-visible identifiers.
//!
//! Every node gets a dense, 1-based [`NodeIndex`] in registration order. The
//! index is the only name the layout engine ever sees; callers refer to nodes
//! by their own identifier. [`IdentifierMap`] keeps both directions in a
//! single ordered set so the inverse can never drift from the forward map.

use std::{fmt, num::NonZeroU32, str::FromStr};

use indexmap::IndexSet;
use log::trace;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while registering or resolving identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("duplicate node identifier `{0}`")]
    Duplicate(String),

    #[error("unknown node identifier `{0}`")]
    Unknown(String),

    #[error("invalid node index `{0}`")]
    InvalidIndex(String),
}

/// Engine-internal sequential node index, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(NonZeroU32);

impl NodeIndex {
    /// Creates an index from its numeric value, or `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Returns the numeric value of this index.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Position of this index inside a zero-based collection.
    fn position(self) -> usize {
        (self.get() - 1) as usize
    }

    fn from_position(position: usize) -> Self {
        let value = u32::try_from(position + 1).unwrap_or(u32::MAX);
        Self(NonZeroU32::new(value).unwrap_or(NonZeroU32::MAX))
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeIndex {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .ok()
            .and_then(NodeIndex::new)
            .ok_or_else(|| IdentifierError::InvalidIndex(s.to_string()))
    }
}

/// Bidirectional map between caller identifiers and [`NodeIndex`] values.
///
/// The set position of an identifier is its index minus one, so lookups in
/// both directions are answered by the same structure.
///
/// # Examples
///
/// ```
/// use tracery_core::identifier::IdentifierMap;
///
/// let mut ids = IdentifierMap::new();
/// let api = ids.insert(Some("api")).unwrap();
/// let anonymous = ids.insert(None).unwrap();
///
/// assert_eq!(api.to_string(), "1");
/// assert_eq!(ids.resolve("2").unwrap(), anonymous);
/// assert_eq!(ids.id_of(api), Some("api"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    ids: IndexSet<String>,
}

impl IdentifierMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the next node and returns its index.
    ///
    /// When `id` is `None` the decimal form of the new index becomes the
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::Duplicate`] if the identifier is already
    /// registered. The map is left unchanged in that case.
    pub fn insert(&mut self, id: Option<&str>) -> Result<NodeIndex, IdentifierError> {
        let index = NodeIndex::from_position(self.ids.len());
        let id = id.map_or_else(|| index.to_string(), str::to_string);

        if self.ids.contains(&id) {
            return Err(IdentifierError::Duplicate(id));
        }

        trace!(id = id.as_str(), index = index.get(); "Registered node identifier");
        self.ids.insert(id);
        Ok(index)
    }

    /// Resolves a caller identifier to its node index.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::Unknown`] if the identifier was never registered.
    pub fn resolve(&self, id: &str) -> Result<NodeIndex, IdentifierError> {
        self.ids
            .get_index_of(id)
            .map(NodeIndex::from_position)
            .ok_or_else(|| IdentifierError::Unknown(id.to_string()))
    }

    /// Returns the caller identifier registered for `index`.
    pub fn id_of(&self, index: NodeIndex) -> Option<&str> {
        self.ids.get_index(index.position()).map(String::as_str)
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no node has been registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over `(index, id)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &str)> {
        self.ids
            .iter()
            .enumerate()
            .map(|(position, id)| (NodeIndex::from_position(position), id.as_str()))
    }
}
