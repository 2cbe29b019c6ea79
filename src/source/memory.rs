//! In-memory record source for testing and offline runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::{FileRef, ListQuery, RecordPatch, RecordSource};
use crate::config::SiteConfig;
use crate::records::Collection;

/// Error type for the in-memory source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InMemoryError {
    /// No record with this ID in the collection.
    #[error("Record not found: {collection}/{id}")]
    RecordNotFound {
        /// Collection searched.
        collection: Collection,
        /// Missing record ID.
        id: String,
    },
    /// No stored file at this location.
    #[error("File not found: {0}")]
    FileNotFound(FileRef),
    /// Wrong admin email or password.
    #[error("Invalid admin credentials")]
    InvalidCredentials,
    /// A write was attempted before authenticating.
    #[error("Admin authentication required")]
    Unauthorized,
    /// A record added to the source was not a JSON object.
    #[error("Record in {0} is not a JSON object")]
    NotAnObject(Collection),
}

#[derive(Debug, Default)]
struct Inner {
    /// Records per collection, in insertion order.
    records: BTreeMap<Collection, Vec<Value>>,
    /// File blobs.
    files: BTreeMap<FileRef, Vec<u8>>,
    authenticated: bool,
}

/// In-memory record source.
///
/// Records keep insertion order. When admin credentials are configured,
/// writes are rejected until [`RecordSource::authenticate`] succeeds.
#[derive(Debug)]
pub struct InMemoryRecordSource {
    base_url: String,
    admin: Option<(String, String)>,
    inner: RwLock<Inner>,
}

impl InMemoryRecordSource {
    /// Create an empty source serving files under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            admin: None,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Create an empty source serving files under the configured content URL.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.content_url.as_str())
    }

    /// Require admin authentication for writes.
    pub fn with_admin(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = Some((email.into(), password.into()));
        self
    }

    /// Collection ID assigned to records of `collection`.
    pub fn collection_id(collection: Collection) -> String {
        format!("pbc_{}", collection.as_str())
    }

    /// Add a record. System fields are filled in when absent.
    pub fn add_record(&self, collection: Collection, record: Value) -> Result<(), InMemoryError> {
        let Value::Object(mut object) = record else {
            return Err(InMemoryError::NotAnObject(collection));
        };

        object
            .entry("collectionId")
            .or_insert_with(|| Value::from(Self::collection_id(collection)));
        object
            .entry("collectionName")
            .or_insert_with(|| Value::from(collection.as_str()));

        self.inner
            .write()
            .records
            .entry(collection)
            .or_default()
            .push(Value::Object(object));
        Ok(())
    }

    /// Store a file for a record.
    pub fn add_file(&self, collection: Collection, record_id: &str, file_name: &str, bytes: Vec<u8>) {
        let file = FileRef {
            collection_id: Self::collection_id(collection),
            record_id: record_id.to_string(),
            file_name: file_name.to_string(),
        };
        self.inner.write().files.insert(file, bytes);
    }

    /// Current state of a record.
    pub fn record(&self, collection: Collection, id: &str) -> Option<Value> {
        self.inner
            .read()
            .records
            .get(&collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned()
    }

    /// Stored file contents.
    pub fn file(&self, collection: Collection, record_id: &str, file_name: &str) -> Option<Vec<u8>> {
        let file = FileRef {
            collection_id: Self::collection_id(collection),
            record_id: record_id.to_string(),
            file_name: file_name.to_string(),
        };
        self.inner.read().files.get(&file).cloned()
    }

    /// Number of records in a collection.
    pub fn num_records(&self, collection: Collection) -> usize {
        self.inner
            .read()
            .records
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn expand(inner: &Inner, collection: Collection, record: &mut Value, fields: &[String]) {
        let mut expanded = Map::new();

        for field in fields {
            let Some(target) = collection.relation(field) else {
                continue;
            };
            let related = inner.records.get(&target);
            let lookup = |id: &str| {
                related.and_then(|records| records.iter().find(|r| record_id(r) == Some(id)).cloned())
            };

            match record.get(field.as_str()) {
                Some(Value::Array(ids)) => {
                    let resolved: Vec<Value> = ids
                        .iter()
                        .filter_map(Value::as_str)
                        .filter_map(lookup)
                        .collect();
                    expanded.insert(field.clone(), Value::Array(resolved));
                }
                Some(Value::String(id)) => {
                    if let Some(found) = lookup(id.as_str()) {
                        expanded.insert(field.clone(), found);
                    }
                }
                _ => {}
            }
        }

        if !expanded.is_empty() {
            if let Value::Object(object) = record {
                object.insert("expand".to_string(), Value::Object(expanded));
            }
        }
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    type Error = InMemoryError;

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<(), Self::Error> {
        match &self.admin {
            Some((e, p)) if e == email && p == password => {
                self.inner.write().authenticated = true;
                Ok(())
            }
            Some(_) => Err(InMemoryError::InvalidCredentials),
            None => Ok(()),
        }
    }

    async fn list_records(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<Value>, Self::Error> {
        let inner = self.inner.read();
        let records = inner
            .records
            .get(&collection)
            .map(|records| records.as_slice())
            .unwrap_or_default();

        Ok(records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .map(|mut r| {
                Self::expand(&inner, collection, &mut r, &query.expand);
                r
            })
            .collect())
    }

    async fn update_record(
        &self,
        collection: Collection,
        id: &str,
        patch: RecordPatch,
    ) -> Result<Value, Self::Error> {
        let mut inner = self.inner.write();

        if self.admin.is_some() && !inner.authenticated {
            return Err(InMemoryError::Unauthorized);
        }

        let not_found = || InMemoryError::RecordNotFound {
            collection,
            id: id.to_string(),
        };

        let object = inner
            .records
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|r| record_id(r) == Some(id)))
            .and_then(Value::as_object_mut)
            .ok_or_else(not_found)?;

        for (field, value) in patch.fields {
            object.insert(field, value);
        }

        let collection_id = object
            .get("collectionId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Self::collection_id(collection));

        let mut stored = Vec::with_capacity(patch.files.len());
        for upload in patch.files {
            object.insert(upload.field, Value::from(upload.file_name.as_str()));
            stored.push((
                FileRef {
                    collection_id: collection_id.clone(),
                    record_id: id.to_string(),
                    file_name: upload.file_name,
                },
                upload.bytes,
            ));
        }

        let updated = Value::Object(object.clone());
        inner.files.extend(stored);

        tracing::debug!(collection = %collection, id = id, "Record updated");

        Ok(updated)
    }

    async fn download_file(&self, file: &FileRef) -> Result<Vec<u8>, Self::Error> {
        self.inner
            .read()
            .files
            .get(file)
            .cloned()
            .ok_or_else(|| InMemoryError::FileNotFound(file.clone()))
    }
}
