//! Page-data loaders.
//!
//! Each loader fetches records through a [`RecordSource`](crate::source::RecordSource)
//! and maps them into the view models the site renders.

pub mod portfolio;
pub mod home;
pub mod export;

use crate::records::RecordError;

pub use portfolio::{
    featured_portfolios, portfolio_categories, portfolio_filter, CategoryOption, PortfolioCarousel,
};
pub use home::{home_page, linkedin_username, team, HomePage};
pub use export::{export_portfolios, export_portfolios_to_path};

/// Error type for page loaders.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The record source failed.
    #[error("Source error: {0}")]
    Source(String),
    /// A record did not decode.
    #[error(transparent)]
    Record(#[from] RecordError),
    /// Writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serializing an export failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    /// Create a source error from any error type.
    pub fn from_source<E: std::error::Error>(e: E) -> Self {
        Self::Source(e.to_string())
    }
}
