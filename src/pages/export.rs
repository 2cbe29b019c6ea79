//! Static export of portfolio records for the build.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::LoadError;
use crate::records::Collection;
use crate::source::{ListQuery, RecordSource};

/// Write every portfolio company record as JSON with a 4-space indent.
///
/// Records are written as the service returns them. Returns the number of
/// records written.
pub async fn export_portfolios<S, W>(source: &S, mut writer: W) -> Result<usize, LoadError>
where
    S: RecordSource,
    W: Write,
{
    let records = source
        .list_records(Collection::PortfolioCompanies, &ListQuery::all())
        .await
        .map_err(LoadError::from_source)?;

    let mut ser = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    writer.flush()?;

    tracing::info!(count = records.len(), "Exported portfolio companies");

    Ok(records.len())
}

/// Export to a file, replacing it if present.
pub async fn export_portfolios_to_path<S: RecordSource>(
    source: &S,
    path: impl AsRef<Path>,
) -> Result<usize, LoadError> {
    let file = File::create(path.as_ref())?;
    export_portfolios(source, BufWriter::new(file)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryRecordSource;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_export_indent_and_content() {
        let source = InMemoryRecordSource::new("https://content.test");
        source
            .add_record(Collection::PortfolioCompanies, json!({"id": "p1", "name": "Acme"}))
            .unwrap();

        let mut out = Vec::new();
        let count = export_portfolios(&source, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(count, 1);
        assert!(text.starts_with("[\n    {\n        \""));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["name"], "Acme");
    }

    #[tokio::test]
    async fn test_export_empty_collection() {
        let source = InMemoryRecordSource::new("https://content.test");
        let mut out = Vec::new();

        assert_eq!(export_portfolios(&source, &mut out).await.unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "[]");
    }
}
