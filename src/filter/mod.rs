//! Multi-dimensional cross-filter.

pub mod dimension;
pub mod store;

pub use dimension::{Dimension, Faceted, FilterConfig, Selection};
pub use store::{DimensionSnapshot, FilterError, FilterSnapshot, FilterStore};
