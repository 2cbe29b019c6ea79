//! The cross-filter store.
//!
//! Holds a fixed item collection and one [`Dimension`] per filterable
//! attribute. Selecting a value in one dimension narrows the filtered items
//! and the options still reachable in the *other* dimensions.
//!
//! ## Option reachability
//!
//! `available_options(D)` ignores D's own selection. Narrowing a dimension
//! therefore never hides the values that would let the user widen it again.
//!
//! ## Consistency
//!
//! The filtered view is recomputed eagerly inside `select` and `reset`, which
//! take `&mut self`. Readers always observe the result of the last completed
//! mutation.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::dimension::{Dimension, Faceted, FilterConfig, Selection};

/// Error type for filter store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The same dimension name was declared more than once.
    #[error("Dimension declared twice: {0}")]
    DuplicateDimension(String),
    /// A dimension was declared with no legal values.
    #[error("Dimension {0} has an empty domain")]
    EmptyDomain(String),
    /// A domain lists the same value twice.
    #[error("Dimension {dimension} repeats domain value {value}")]
    DuplicateDomainValue {
        /// Dimension name.
        dimension: String,
        /// Debug rendering of the repeated value.
        value: String,
    },
    /// An item has no value for a declared dimension.
    #[error("Item {index} has no value for dimension {dimension}")]
    MissingAttribute {
        /// Position of the item in the collection.
        index: usize,
        /// Dimension name.
        dimension: String,
    },
    /// The dimension is not declared in this store.
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),
    /// A selection outside the dimension's domain.
    #[error("Value {value} is not in the domain of {dimension}")]
    OutOfDomain {
        /// Dimension name.
        dimension: String,
        /// Debug rendering of the rejected value.
        value: String,
    },
}

/// Multi-dimensional cross-filter over a fixed item collection.
pub struct FilterStore<I: Faceted> {
    items: Arc<[I]>,
    dimensions: Vec<Dimension<I::Value>>,
    /// Indices into `items` matching every current selection.
    filtered: Vec<usize>,
}

impl<I: Faceted> FilterStore<I> {
    /// Create a store over `items` with the dimensions declared in `config`.
    ///
    /// Every selection starts at [`Selection::Any`]. Fails when a dimension
    /// is declared twice, has an empty or repeating domain, or when any item
    /// lacks a value for a declared dimension.
    pub fn new(
        items: impl Into<Arc<[I]>>,
        config: FilterConfig<I::Value>,
    ) -> Result<Self, FilterError> {
        let items = items.into();
        let mut dimensions: Vec<Dimension<I::Value>> = Vec::with_capacity(config.len());

        for (name, domain) in config.dimensions {
            if dimensions.iter().any(|d| d.name() == name) {
                return Err(FilterError::DuplicateDimension(name));
            }
            if domain.is_empty() {
                return Err(FilterError::EmptyDomain(name));
            }
            for (i, value) in domain.iter().enumerate() {
                if domain[..i].contains(value) {
                    return Err(FilterError::DuplicateDomainValue {
                        dimension: name,
                        value: format!("{:?}", value),
                    });
                }
            }
            dimensions.push(Dimension::new(name, domain.into()));
        }

        for (index, item) in items.iter().enumerate() {
            if let Some(missing) = dimensions.iter().find(|d| item.facet(d.name()).is_none()) {
                return Err(FilterError::MissingAttribute {
                    index,
                    dimension: missing.name().to_string(),
                });
            }
        }

        let filtered = (0..items.len()).collect();

        tracing::debug!(
            items = items.len(),
            dimensions = dimensions.len(),
            "Filter store created"
        );

        Ok(Self {
            items,
            dimensions,
            filtered,
        })
    }

    /// Every dimension in declaration order.
    pub fn dimensions(&self) -> &[Dimension<I::Value>] {
        &self.dimensions
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&Dimension<I::Value>> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    /// The full, unfiltered item collection.
    pub fn items(&self) -> &Arc<[I]> {
        &self.items
    }

    /// Set the selection of `dimension`.
    ///
    /// A concrete value must belong to the dimension's domain; otherwise the
    /// previous selection is kept and `OutOfDomain` is returned.
    pub fn select(
        &mut self,
        dimension: &str,
        selection: impl Into<Selection<I::Value>>,
    ) -> Result<(), FilterError> {
        let selection = selection.into();
        let index = self.position(dimension)?;
        let dim = &mut self.dimensions[index];

        if let Selection::Value(value) = &selection {
            if !dim.contains(value) {
                return Err(FilterError::OutOfDomain {
                    dimension: dimension.to_string(),
                    value: format!("{:?}", value),
                });
            }
        }

        dim.set(selection);
        self.refilter();

        tracing::debug!(
            dimension = dimension,
            selected = ?self.dimensions[index].selected(),
            matched = self.filtered.len(),
            "Selection changed"
        );

        Ok(())
    }

    /// Domain values of `dimension` still reachable under the other
    /// dimensions' selections, in domain order.
    pub fn available_options(&self, dimension: &str) -> Result<Vec<&I::Value>, FilterError> {
        let index = self.position(dimension)?;
        let dim = &self.dimensions[index];

        let reachable: Vec<&I::Value> = self
            .items
            .iter()
            .filter(|item| self.matches(item, Some(index)))
            .filter_map(|item| item.facet(dim.name()))
            .collect();

        Ok(dim
            .domain()
            .iter()
            .filter(|value| reachable.contains(value))
            .collect())
    }

    /// Items matching every current selection, in original order.
    pub fn filtered_items(&self) -> Vec<&I> {
        self.filtered.iter().map(|&i| &self.items[i]).collect()
    }

    /// Number of items matching every current selection.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Check if any dimension has a concrete selection.
    pub fn is_filtered(&self) -> bool {
        self.dimensions.iter().any(|d| !d.selected().is_any())
    }

    /// Set every selection back to [`Selection::Any`].
    pub fn reset(&mut self) {
        for dim in &mut self.dimensions {
            dim.set(Selection::Any);
        }
        self.refilter();

        tracing::debug!(matched = self.filtered.len(), "Selections reset");
    }

    /// Serializable view of every dimension and the filtered count.
    pub fn snapshot(&self) -> FilterSnapshot<I::Value> {
        let dimensions = self
            .dimensions
            .iter()
            .map(|dim| DimensionSnapshot {
                name: dim.name().to_string(),
                domain: dim.domain().to_vec(),
                selected: dim.selected().clone(),
                available: self
                    .available_options(dim.name())
                    .unwrap_or_default()
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();

        FilterSnapshot {
            dimensions,
            total: self.items.len(),
            matched: self.filtered.len(),
        }
    }

    fn position(&self, dimension: &str) -> Result<usize, FilterError> {
        self.dimensions
            .iter()
            .position(|d| d.name() == dimension)
            .ok_or_else(|| FilterError::UnknownDimension(dimension.to_string()))
    }

    /// Check an item against every selection except the one at `skip`.
    fn matches(&self, item: &I, skip: Option<usize>) -> bool {
        self.dimensions
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .all(|(_, dim)| match dim.selected() {
                Selection::Any => true,
                Selection::Value(v) => item.facet(dim.name()) == Some(v),
            })
    }

    fn refilter(&mut self) {
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item, None))
            .map(|(i, _)| i)
            .collect();
    }
}

impl<I: Faceted> Clone for FilterStore<I> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            dimensions: self.dimensions.clone(),
            filtered: self.filtered.clone(),
        }
    }
}

impl<I: Faceted> fmt::Debug for FilterStore<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStore")
            .field("items", &self.items.len())
            .field("dimensions", &self.dimensions)
            .field("matched", &self.filtered.len())
            .finish()
    }
}

/// Serializable state of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionSnapshot<V> {
    /// Dimension name.
    pub name: String,
    /// Full domain in declaration order.
    pub domain: Vec<V>,
    /// Current selection.
    pub selected: Selection<V>,
    /// Values still reachable under the other selections.
    pub available: Vec<V>,
}

/// Serializable state of a whole store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSnapshot<V> {
    /// Per-dimension state in declaration order.
    pub dimensions: Vec<DimensionSnapshot<V>>,
    /// Size of the full collection.
    pub total: usize,
    /// Size of the filtered view.
    pub matched: usize,
}
