//! Version markers stored in record metadata.
//!
//! A job stamps `metadata.<job>.processed_with = <version>` after handling a
//! record. Other metadata keys are left alone.

use serde_json::{Map, Value};

const PROCESSED_WITH: &str = "processed_with";

/// Version a job last processed the record with.
pub fn processed_with<'a>(metadata: Option<&'a Value>, job: &str) -> Option<&'a str> {
    metadata?.get(job)?.get(PROCESSED_WITH)?.as_str()
}

/// Check if the record was processed by `job` at exactly `version`.
pub fn is_processed(metadata: Option<&Value>, job: &str, version: &str) -> bool {
    processed_with(metadata, job) == Some(version)
}

/// Metadata with the marker for `job` set to `version`.
///
/// Non-object metadata is replaced.
pub fn with_marker(metadata: Option<&Value>, job: &str, version: &str) -> Value {
    let mut object = match metadata {
        Some(Value::Object(object)) => object.clone(),
        _ => Map::new(),
    };

    let mut marker = Map::new();
    marker.insert(PROCESSED_WITH.to_string(), Value::from(version));
    object.insert(job.to_string(), Value::Object(marker));

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_metadata() {
        assert_eq!(processed_with(None, "optimise"), None);
        assert!(!is_processed(None, "optimise", "1.2.0"));
        assert!(!is_processed(Some(&Value::Null), "optimise", "1.2.0"));
    }

    #[test]
    fn test_version_must_match() {
        let metadata = json!({"optimise": {"processed_with": "1.1.0"}});

        assert_eq!(processed_with(Some(&metadata), "optimise"), Some("1.1.0"));
        assert!(!is_processed(Some(&metadata), "optimise", "1.2.0"));
        assert!(is_processed(Some(&metadata), "optimise", "1.1.0"));
        assert!(!is_processed(Some(&metadata), "auto_invert", "1.1.0"));
    }

    #[test]
    fn test_with_marker_keeps_other_keys() {
        let metadata = json!({
            "auto_invert": {"processed_with": "1.0.1"},
            "optimise": {"processed_with": "1.1.0", "note": "old"}
        });

        let updated = with_marker(Some(&metadata), "optimise", "1.2.0");

        assert_eq!(
            updated,
            json!({
                "auto_invert": {"processed_with": "1.0.1"},
                "optimise": {"processed_with": "1.2.0"}
            })
        );
    }

    #[test]
    fn test_with_marker_on_empty() {
        assert_eq!(
            with_marker(None, "auto_invert", "1.0.1"),
            json!({"auto_invert": {"processed_with": "1.0.1"}})
        );
        assert_eq!(
            with_marker(Some(&json!("junk")), "auto_invert", "1.0.1"),
            json!({"auto_invert": {"processed_with": "1.0.1"}})
        );
    }
}
