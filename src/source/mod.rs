//! Record service backends.
//!
//! The content service is an external collaborator: a record store with
//! per-collection list/update calls and file serving. [`RecordSource`] is
//! the seam; [`InMemoryRecordSource`] backs tests and offline runs.

pub mod memory;
pub mod query;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::records::{Collection, RecordMeta};

pub use memory::{InMemoryError, InMemoryRecordSource};
pub use query::{ListQuery, RecordFilter};

/// Trait for record service backends.
///
/// `list_records` returns the full list in the service's order.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Error type for source operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Base URL used to build public file URLs.
    fn base_url(&self) -> &str;

    /// Authenticate as an admin. Required before writes.
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), Self::Error>;

    /// Fetch every record of `collection` matching `query`.
    async fn list_records(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<Value>, Self::Error>;

    /// Apply a patch to one record and return the updated record.
    async fn update_record(
        &self,
        collection: Collection,
        id: &str,
        patch: RecordPatch,
    ) -> Result<Value, Self::Error>;

    /// Download a stored file.
    async fn download_file(&self, file: &FileRef) -> Result<Vec<u8>, Self::Error>;
}

/// Location of a file attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileRef {
    /// Owning collection ID.
    pub collection_id: String,
    /// Owning record ID.
    pub record_id: String,
    /// Stored file name.
    pub file_name: String,
}

impl FileRef {
    /// Reference a file of a record.
    pub fn new(meta: &RecordMeta, file_name: impl Into<String>) -> Self {
        Self {
            collection_id: meta.collection_id.clone(),
            record_id: meta.id.clone(),
            file_name: file_name.into(),
        }
    }

    /// Public URL of the file under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/api/files/{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.collection_id,
            self.record_id,
            self.file_name
        )
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.collection_id, self.record_id, self.file_name)
    }
}

/// Public URL of `file_name` attached to the record described by `meta`.
pub fn file_url(base_url: &str, meta: &RecordMeta, file_name: &str) -> String {
    FileRef::new(meta, file_name).url(base_url)
}

/// A file to attach to a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Field the file is stored under.
    pub field: String,
    /// File name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload, inferring the content type from the extension.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            field: field.into(),
            file_name,
            content_type,
            bytes,
        }
    }
}

/// MIME type for an image file name.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Field updates and file uploads for one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    /// Plain field values.
    pub fields: Map<String, Value>,
    /// Files to store; each sets its field to the file name.
    pub files: Vec<FileUpload>,
}

impl RecordPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Attach a file.
    pub fn file(mut self, upload: FileUpload) -> Self {
        self.files.push(upload);
        self
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }
}
