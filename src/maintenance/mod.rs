//! Maintenance jobs over portfolio records.
//!
//! Jobs run against a [`RecordSource`](crate::source::RecordSource) with
//! admin credentials. Companies are processed in fixed-size batches; the
//! companies of one batch are processed concurrently. A company that fails
//! is logged and counted, and the run continues.
//!
//! Every job stamps a version marker into the company's metadata
//! (`metadata.<job>.processed_with`) and skips companies already stamped
//! with the current version, so reruns only touch what is left.

pub mod batch;
pub mod marker;
pub mod color;
pub mod svg;
pub mod auto_invert;
pub mod logos;

use crate::records::RecordError;

pub use batch::{
    process_in_batches, BatchItem, BatchReport, ItemFailure, Outcome, DEFAULT_BATCH_SIZE,
};
pub use marker::{is_processed, processed_with, with_marker};
pub use color::{hex_to_hsl, needs_inverted_foreground, ColorError, Hsl};
pub use svg::{extract_viewbox, parse_viewbox_overrides, set_viewbox};
pub use auto_invert::{AutoInvertJob, AUTO_INVERT_JOB_KEY, AUTO_INVERT_VERSION};
pub use logos::{
    optimize_image, ImageCodec, OptimizeLogosJob, OptimizedImage, OPTIMIZE_LOGOS_JOB_KEY,
    OPTIMIZE_LOGOS_VERSION, WEBP_QUALITY,
};

/// Error type for maintenance jobs.
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    /// The record source failed.
    #[error("Source error: {0}")]
    Source(String),
    /// A record did not decode.
    #[error(transparent)]
    Record(#[from] RecordError),
    /// An accent colour could not be parsed.
    #[error(transparent)]
    Color(#[from] ColorError),
    /// The image codec failed.
    #[error("Codec error: {0}")]
    Codec(String),
    /// The viewBox override list is not valid JSON.
    #[error("Invalid viewBox overrides: {0}")]
    ViewBoxOverrides(#[source] serde_json::Error),
    /// A company has no logo to work from.
    #[error("No logo uploaded for {0}")]
    MissingLogo(String),
    /// Batches must hold at least one item.
    #[error("Batch size must be at least 1")]
    ZeroBatchSize,
}

impl MaintenanceError {
    /// Create a source error from any error type.
    pub fn from_source<E: std::error::Error>(e: E) -> Self {
        Self::Source(e.to_string())
    }

    /// Create a codec error from any error type.
    pub fn from_codec<E: std::error::Error>(e: E) -> Self {
        Self::Codec(e.to_string())
    }
}
