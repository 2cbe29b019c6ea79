//! Fixed-size batches of independent async operations.

use std::future::Future;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;

use super::MaintenanceError;
use crate::records::PortfolioCompany;

/// Batch size used when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Something a batch job can name in its logs.
pub trait BatchItem {
    /// Human-readable label.
    fn label(&self) -> &str;
}

impl BatchItem for PortfolioCompany {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Result of processing one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The item was processed.
    Completed,
    /// Nothing to do for the item.
    Skipped,
}

/// An item that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// Item label.
    pub item: String,
    /// Error message.
    pub error: String,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Job name.
    pub job: String,
    /// Items processed.
    pub completed: usize,
    /// Items skipped.
    pub skipped: usize,
    /// Items that failed, in processing order.
    pub failures: Vec<ItemFailure>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    fn start(job: &str) -> Self {
        let now = Utc::now();
        Self {
            job: job.to_string(),
            completed: 0,
            skipped: 0,
            failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    fn record(&mut self, item: &str, result: Result<Outcome, MaintenanceError>) {
        match result {
            Ok(Outcome::Completed) => {
                self.completed += 1;
                tracing::info!(job = %self.job, item = item, "Completed");
            }
            Ok(Outcome::Skipped) => {
                self.skipped += 1;
                tracing::info!(job = %self.job, item = item, "Already processed, skipping");
            }
            Err(e) => {
                tracing::error!(job = %self.job, item = item, error = %e, "Failed");
                self.failures.push(ItemFailure {
                    item: item.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    /// Number of failed items.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of items seen.
    pub fn total(&self) -> usize {
        self.completed + self.skipped + self.failures.len()
    }

    /// Check if no item failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run `process` over `items` in batches of `batch_size`.
///
/// Batches run one after another; the items of a batch run concurrently and
/// their completion order does not matter. Item errors are logged and
/// recorded in the report, never propagated.
pub async fn process_in_batches<'a, T, F, Fut>(
    job: &str,
    items: &'a [T],
    batch_size: usize,
    process: F,
) -> Result<BatchReport, MaintenanceError>
where
    T: BatchItem,
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = Result<Outcome, MaintenanceError>>,
{
    if batch_size == 0 {
        return Err(MaintenanceError::ZeroBatchSize);
    }

    let mut report = BatchReport::start(job);

    for (index, batch) in items.chunks(batch_size).enumerate() {
        tracing::debug!(job = job, batch = index, size = batch.len(), "Processing batch");

        let results = join_all(batch.iter().map(&process)).await;
        for (item, result) in batch.iter().zip(results) {
            report.record(item.label(), result);
        }
    }

    report.finished_at = Utc::now();

    tracing::info!(
        job = job,
        completed = report.completed,
        skipped = report.skipped,
        failed = report.failed(),
        "Done"
    );

    Ok(report)
}
