//! Derive `invert_foreground` from each SVG logo company's accent colour.

use super::batch::{process_in_batches, BatchReport, Outcome, DEFAULT_BATCH_SIZE};
use super::color::needs_inverted_foreground;
use super::marker::{is_processed, with_marker};
use super::MaintenanceError;
use crate::config::{AdminCredentials, MaintenanceConfig};
use crate::records::{decode_records, Collection, PortfolioCompany};
use crate::source::{ListQuery, RecordFilter, RecordPatch, RecordSource};

/// Marker version written by this job.
pub const AUTO_INVERT_VERSION: &str = "1.0.1";

/// Metadata key of this job's marker.
pub const AUTO_INVERT_JOB_KEY: &str = "auto_invert";

/// Sets `invert_foreground` on companies with SVG logos.
#[derive(Debug, Clone)]
pub struct AutoInvertJob {
    batch_size: usize,
}

impl Default for AutoInvertJob {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoInvertJob {
    /// Create a job with the default batch size.
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Create a job using the configured batch size.
    pub fn from_config(config: &MaintenanceConfig) -> Self {
        Self::new().with_batch_size(config.batch_size)
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Companies processed concurrently per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Authenticate, then process every company whose logo is an SVG.
    pub async fn run<S: RecordSource>(
        &self,
        source: &S,
        credentials: &AdminCredentials,
    ) -> Result<BatchReport, MaintenanceError> {
        source
            .authenticate(&credentials.email, &credentials.password)
            .await
            .map_err(MaintenanceError::from_source)?;
        tracing::info!(email = %credentials.email, "Authenticated as admin");

        let query = ListQuery::all().filter(RecordFilter::like("logo", "%.svg"));
        let records = source
            .list_records(Collection::PortfolioCompanies, &query)
            .await
            .map_err(MaintenanceError::from_source)?;
        let companies: Vec<PortfolioCompany> = decode_records(records)?;

        tracing::info!(count = companies.len(), "Found companies");

        process_in_batches(AUTO_INVERT_JOB_KEY, &companies, self.batch_size, |company| {
            self.process(source, company)
        })
        .await
    }

    /// Process one company.
    pub async fn process<S: RecordSource>(
        &self,
        source: &S,
        company: &PortfolioCompany,
    ) -> Result<Outcome, MaintenanceError> {
        let metadata = company.metadata.as_ref();
        if is_processed(metadata, AUTO_INVERT_JOB_KEY, AUTO_INVERT_VERSION) {
            return Ok(Outcome::Skipped);
        }

        let invert = needs_inverted_foreground(&company.accent)?;
        let patch = RecordPatch::new()
            .set("invert_foreground", invert)
            .set("metadata", with_marker(metadata, AUTO_INVERT_JOB_KEY, AUTO_INVERT_VERSION));

        source
            .update_record(Collection::PortfolioCompanies, &company.meta.id, patch)
            .await
            .map_err(MaintenanceError::from_source)?;

        tracing::debug!(company = %company.name, invert = invert, "Set invert_foreground");

        Ok(Outcome::Completed)
    }
}
