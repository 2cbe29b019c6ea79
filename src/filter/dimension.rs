//! Dimension types for the cross-filter store.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// An item that exposes one value per named dimension.
///
/// The set of dimensions an item answers for is closed: the store checks at
/// construction that every declared dimension resolves for every item.
pub trait Faceted {
    /// Value type shared by every dimension of the item.
    type Value: Clone + PartialEq + fmt::Debug;

    /// Value of the item for `dimension`, or `None` if the item has no such
    /// attribute.
    fn facet(&self, dimension: &str) -> Option<&Self::Value>;
}

impl<V> Faceted for BTreeMap<String, V>
where
    V: Clone + PartialEq + fmt::Debug,
{
    type Value = V;

    fn facet(&self, dimension: &str) -> Option<&V> {
        self.get(dimension)
    }
}

impl<V, S> Faceted for HashMap<String, V, S>
where
    V: Clone + PartialEq + fmt::Debug,
    S: std::hash::BuildHasher,
{
    type Value = V;

    fn facet(&self, dimension: &str) -> Option<&V> {
        self.get(dimension)
    }
}

/// Current choice for a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<V> {
    /// Wildcard: every value matches.
    Any,
    /// A single value from the dimension's domain.
    Value(V),
}

impl<V> Selection<V> {
    /// Check if this is the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Get the selected value, if any.
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Any => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Check whether an item value passes this selection.
    pub fn admits(&self, candidate: &V) -> bool
    where
        V: PartialEq,
    {
        match self {
            Self::Any => true,
            Self::Value(v) => v == candidate,
        }
    }
}

impl<V> Default for Selection<V> {
    fn default() -> Self {
        Self::Any
    }
}

impl<V> From<V> for Selection<V> {
    fn from(value: V) -> Self {
        Self::Value(value)
    }
}

impl<V: fmt::Display> fmt::Display for Selection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::Value(v) => write!(f, "{}", v),
        }
    }
}

/// One filterable attribute: its fixed domain and its current selection.
///
/// Fields are private; selections only change through
/// [`FilterStore::select`](super::FilterStore::select) and
/// [`FilterStore::reset`](super::FilterStore::reset).
#[derive(Debug, Clone)]
pub struct Dimension<V> {
    name: String,
    domain: Arc<[V]>,
    selected: Selection<V>,
}

impl<V: PartialEq> Dimension<V> {
    pub(crate) fn new(name: String, domain: Arc<[V]>) -> Self {
        Self {
            name,
            domain,
            selected: Selection::Any,
        }
    }

    /// Dimension (attribute) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every legal value, in declaration order.
    pub fn domain(&self) -> &[V] {
        &self.domain
    }

    /// Current selection.
    pub fn selected(&self) -> &Selection<V> {
        &self.selected
    }

    /// Check if `value` belongs to the domain.
    pub fn contains(&self, value: &V) -> bool {
        self.domain.iter().any(|v| v == value)
    }

    pub(crate) fn set(&mut self, selection: Selection<V>) {
        self.selected = selection;
    }
}

/// Ordered list of dimensions and their domains, used to build a store.
#[derive(Debug, Clone)]
pub struct FilterConfig<V> {
    pub(crate) dimensions: Vec<(String, Vec<V>)>,
}

impl<V> FilterConfig<V> {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self {
            dimensions: Vec::new(),
        }
    }

    /// Declare a dimension with its full domain.
    pub fn dimension(mut self, name: impl Into<String>, domain: impl IntoIterator<Item = V>) -> Self {
        self.dimensions.push((name.into(), domain.into_iter().collect()));
        self
    }

    /// Number of declared dimensions.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Check if no dimension is declared.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

impl<V> Default for FilterConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_admits() {
        let any: Selection<&str> = Selection::Any;
        let red: Selection<&str> = "red".into();

        assert!(any.admits(&"blue"));
        assert!(red.admits(&"red"));
        assert!(!red.admits(&"blue"));
        assert_eq!(red.value(), Some(&"red"));
        assert!(any.value().is_none());
    }

    #[test]
    fn test_selection_serde() {
        let any: Selection<String> = Selection::Any;
        let red: Selection<String> = Selection::Value("red".to_string());

        assert_eq!(serde_json::to_string(&any).unwrap(), "\"any\"");
        assert_eq!(serde_json::to_string(&red).unwrap(), "{\"value\":\"red\"}");

        let back: Selection<String> = serde_json::from_str("{\"value\":\"red\"}").unwrap();
        assert_eq!(back, red);
    }

    #[test]
    fn test_map_items_are_faceted() {
        let mut item = BTreeMap::new();
        item.insert("color".to_string(), "red");

        assert_eq!(item.facet("color"), Some(&"red"));
        assert_eq!(item.facet("size"), None);
    }

    #[test]
    fn test_config_keeps_declaration_order() {
        let config = FilterConfig::new()
            .dimension("size", ["S", "M"])
            .dimension("color", ["red", "blue"]);

        assert_eq!(config.len(), 2);
        assert_eq!(config.dimensions[0].0, "size");
        assert_eq!(config.dimensions[1].1, vec!["red", "blue"]);
    }
}
