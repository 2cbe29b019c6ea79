//! Logo optimization.
//!
//! The uploaded original is kept in `unoptimised_logo`; `logo` is replaced by
//! an optimized copy. SVGs go through the codec's SVG optimizer, after an
//! optional viewBox override. Everything else is re-encoded to WebP.

use std::collections::BTreeMap;

use super::batch::{process_in_batches, BatchReport, Outcome, DEFAULT_BATCH_SIZE};
use super::marker::{is_processed, with_marker};
use super::svg::{extract_viewbox, set_viewbox};
use super::MaintenanceError;
use crate::config::{AdminCredentials, MaintenanceConfig};
use crate::records::{decode_records, Collection, PortfolioCompany};
use crate::source::{FileRef, FileUpload, ListQuery, RecordPatch, RecordSource};

/// Marker version written by this job.
pub const OPTIMIZE_LOGOS_VERSION: &str = "1.2.0";

/// Metadata key of this job's marker.
pub const OPTIMIZE_LOGOS_JOB_KEY: &str = "optimise";

/// WebP quality for re-encoded raster logos.
pub const WEBP_QUALITY: u8 = 85;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";
const WEBP_CONTENT_TYPE: &str = "image/webp";

/// Image encoder used by [`OptimizeLogosJob`].
pub trait ImageCodec: Send + Sync {
    /// Error type for codec operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Minify an SVG document. The result must keep a `viewBox`.
    fn optimize_svg(&self, svg: &str, file_name: &str) -> Result<String, Self::Error>;

    /// Decode a raster image and encode it as WebP.
    fn encode_webp(&self, image: &[u8], quality: u8) -> Result<Vec<u8>, Self::Error>;
}

/// An optimized logo ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedImage {
    /// Encoded image.
    pub bytes: Vec<u8>,
    /// File name to upload under.
    pub file_name: String,
    /// MIME type.
    pub content_type: &'static str,
}

impl OptimizedImage {
    /// Upload to `field`.
    pub fn into_upload(self, field: impl Into<String>) -> FileUpload {
        FileUpload {
            field: field.into(),
            file_name: self.file_name,
            content_type: self.content_type.to_string(),
            bytes: self.bytes,
        }
    }
}

fn is_svg(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".svg")
}

/// `file_name` with its extension replaced by `.webp`.
///
/// Names without an extension are kept.
fn webp_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => format!("{stem}.webp"),
        _ => file_name.to_string(),
    }
}

/// Optimize one logo.
///
/// When `viewbox` is given and the SVG's current viewBox differs, the
/// override is applied before minifying. `viewbox` is ignored for raster
/// images.
pub fn optimize_image<C: ImageCodec>(
    codec: &C,
    bytes: &[u8],
    file_name: &str,
    viewbox: Option<&str>,
) -> Result<OptimizedImage, MaintenanceError> {
    if !is_svg(file_name) {
        let encoded = codec
            .encode_webp(bytes, WEBP_QUALITY)
            .map_err(MaintenanceError::from_codec)?;
        return Ok(OptimizedImage {
            bytes: encoded,
            file_name: webp_file_name(file_name),
            content_type: WEBP_CONTENT_TYPE,
        });
    }

    let mut svg = String::from_utf8_lossy(bytes).into_owned();

    if let Some(viewbox) = viewbox {
        if extract_viewbox(&svg) == Some(viewbox) {
            tracing::debug!(file = file_name, viewbox = viewbox, "ViewBox already matches");
        } else {
            tracing::debug!(file = file_name, viewbox = viewbox, "Setting viewBox");
            svg = set_viewbox(&svg, viewbox);
        }
    }

    let optimized = codec
        .optimize_svg(&svg, file_name)
        .map_err(MaintenanceError::from_codec)?;

    Ok(OptimizedImage {
        bytes: optimized.into_bytes(),
        file_name: file_name.to_string(),
        content_type: SVG_CONTENT_TYPE,
    })
}

/// Replaces every company's logo with an optimized copy.
pub struct OptimizeLogosJob<C> {
    codec: C,
    batch_size: usize,
    viewboxes: BTreeMap<String, String>,
}

impl<C: ImageCodec> OptimizeLogosJob<C> {
    /// Create a job with the default batch size and no viewBox overrides.
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            batch_size: DEFAULT_BATCH_SIZE,
            viewboxes: BTreeMap::new(),
        }
    }

    /// Create a job using the configured batch size.
    pub fn from_config(codec: C, config: &MaintenanceConfig) -> Self {
        Self::new(codec).with_batch_size(config.batch_size)
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

    /// ViewBox overrides keyed by company name.
    pub fn with_viewboxes(mut self, viewboxes: BTreeMap<String, String>) -> Self {
        self.viewboxes = viewboxes;
        self
    }

    /// The codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Authenticate, then process every company.
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

        let records = source
            .list_records(Collection::PortfolioCompanies, &ListQuery::all())
            .await
            .map_err(MaintenanceError::from_source)?;
        let companies: Vec<PortfolioCompany> = decode_records(records)?;

        tracing::info!(
            count = companies.len(),
            viewbox_overrides = self.viewboxes.len(),
            "Found companies"
        );

        process_in_batches(OPTIMIZE_LOGOS_JOB_KEY, &companies, self.batch_size, |company| {
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
        if is_processed(metadata, OPTIMIZE_LOGOS_JOB_KEY, OPTIMIZE_LOGOS_VERSION) {
            return Ok(Outcome::Skipped);
        }

        let (source_name, original) = if company.unoptimised_logo.is_empty() {
            if company.logo.is_empty() {
                return Err(MaintenanceError::MissingLogo(company.name.clone()));
            }

            tracing::info!(company = %company.name, "Migrating logo to unoptimised_logo");
            let bytes = download(source, company, &company.logo).await?;
            let patch = RecordPatch::new().file(FileUpload::new(
                "unoptimised_logo",
                company.logo.as_str(),
                bytes.clone(),
            ));
            source
                .update_record(Collection::PortfolioCompanies, &company.meta.id, patch)
                .await
                .map_err(MaintenanceError::from_source)?;

            (company.logo.as_str(), bytes)
        } else {
            let name = company.unoptimised_logo.as_str();
            (name, download(source, company, name).await?)
        };

        let viewbox = self.viewboxes.get(&company.name).map(String::as_str);
        if let Some(viewbox) = viewbox {
            tracing::debug!(company = %company.name, viewbox = viewbox, "Found viewBox override");
        }

        let optimized = optimize_image(&self.codec, &original, source_name, viewbox)?;

        tracing::info!(company = %company.name, file = %optimized.file_name, "Uploading");
        let patch = RecordPatch::new()
            .file(optimized.into_upload("logo"))
            .set("metadata", with_marker(metadata, OPTIMIZE_LOGOS_JOB_KEY, OPTIMIZE_LOGOS_VERSION));

        source
            .update_record(Collection::PortfolioCompanies, &company.meta.id, patch)
            .await
            .map_err(MaintenanceError::from_source)?;

        Ok(Outcome::Completed)
    }
}

async fn download<S: RecordSource>(
    source: &S,
    company: &PortfolioCompany,
    file_name: &str,
) -> Result<Vec<u8>, MaintenanceError> {
    tracing::debug!(company = %company.name, file = file_name, "Downloading");
    source
        .download_file(&FileRef::new(&company.meta, file_name))
        .await
        .map_err(MaintenanceError::from_source)
}
