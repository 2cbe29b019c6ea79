//! # portfolio-kernel
//!
//! Data layer of a venture portfolio site.
//!
//! The centre piece is a generic cross-filter:
//!
//! > Given a collection and a selection per dimension, which items match, and
//! > which values of each dimension would still match something?
//!
//! ## Architecture
//!
//! ```text
//! RecordSource ──▶ records (typed) ──▶ pages (view models)
//!      │                                   │
//!      │                                   ▼
//!      │                             FilterStore
//!      ▼
//! maintenance jobs (batched, version-marked)
//! ```
//!
//! ## Filter Guarantees
//!
//! - Filtered items keep collection order
//! - A dimension's options ignore that dimension's own selection
//! - Options keep domain order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filter;
pub mod records;
pub mod source;
pub mod pages;
pub mod maintenance;
pub mod config;
pub mod telemetry;

// Re-exports
pub use filter::{
    Dimension, DimensionSnapshot, Faceted, FilterConfig, FilterError, FilterSnapshot,
    FilterStore, Selection,
};
pub use records::{
    Collection, Fund, Manager, PortfolioCompany, RecordError, RecordMeta, Stage, TeamMember,
};
pub use source::{
    file_url, FileRef, FileUpload, InMemoryRecordSource, ListQuery, RecordFilter, RecordPatch,
    RecordSource,
};
pub use pages::LoadError;
pub use maintenance::{
    AutoInvertJob, BatchReport, ImageCodec, MaintenanceError, OptimizeLogosJob, Outcome,
};
pub use config::{AdminCredentials, ConfigError, MaintenanceConfig, SiteConfig};
pub use telemetry::{init_tracing, LogFormat};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
