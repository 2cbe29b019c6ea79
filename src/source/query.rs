//! List queries against the record service.

use regex_lite::Regex;
use serde_json::Value;

/// Filter condition on record fields.
///
/// Renders to the service's filter syntax with [`to_query_string`] and can be
/// evaluated locally with [`matches`].
///
/// [`to_query_string`]: RecordFilter::to_query_string
/// [`matches`]: RecordFilter::matches
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    /// Field equals a value.
    Eq(String, Value),
    /// Case-insensitive LIKE; `%` and `_` are wildcards, no `%` means "contains".
    Like(String, String),
    /// Every condition holds.
    And(Vec<RecordFilter>),
}

impl RecordFilter {
    /// Equality condition.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    /// LIKE condition.
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Like(field.into(), pattern.into())
    }

    /// Conjunction with another condition.
    pub fn and(self, other: RecordFilter) -> Self {
        match self {
            Self::And(mut all) => {
                all.push(other);
                Self::And(all)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Render in the service's filter syntax.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Eq(field, value) => format!("{}={}", field, literal(value)),
            Self::Like(field, pattern) => format!("{} ~ {}", field, Value::from(pattern.as_str())),
            Self::And(all) => all
                .iter()
                .map(|f| f.to_query_string())
                .collect::<Vec<_>>()
                .join(" && "),
        }
    }

    /// Evaluate against a JSON record.
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Self::Eq(field, value) => record.get(field) == Some(value),
            Self::Like(field, pattern) => record
                .get(field)
                .and_then(Value::as_str)
                .map(|text| like_match(text, pattern))
                .unwrap_or(false),
            Self::And(all) => all.iter().all(|f| f.matches(record)),
        }
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        other => other.to_string(),
    }
}

/// SQL LIKE semantics: `%` is any run of characters, `_` any single
/// character. A pattern without `%` matches anywhere in the text.
fn like_match(text: &str, pattern: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let pattern = if pattern.contains('%') {
        pattern
    } else {
        format!("%{pattern}%")
    };

    let mut source = String::from("(?s)^");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            c => source.push_str(&regex_lite::escape(c.encode_utf8(&mut buf))),
        }
    }
    source.push('$');

    Regex::new(&source)
        .map(|re| re.is_match(&text.to_lowercase()))
        .unwrap_or(false)
}

/// Options for a full-list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Optional filter.
    pub filter: Option<RecordFilter>,
    /// Relation fields to expand inline under `expand`.
    pub expand: Vec<String>,
}

impl ListQuery {
    /// Query returning every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the filter.
    pub fn filter(mut self, filter: RecordFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Expand a relation field.
    pub fn expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    /// Check a record against the filter (no filter matches everything).
    pub fn matches(&self, record: &Value) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(record))
    }
}
