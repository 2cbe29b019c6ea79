//! SVG viewBox handling.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex_lite::{Captures, Regex};
use serde::Deserialize;

use super::MaintenanceError;

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern"))
}

fn viewbox_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r#"(?i)viewBox\s*=\s*["']([^"']+)["']"#)
}

fn viewbox_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r#"(?i)viewBox\s*=\s*["'][^"']*["']"#)
}

fn size_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r#"(?i)\s+(?:width|height)\s*=\s*["'][^"']*["']"#)
}

fn svg_open_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)<svg([^>]*?)>")
}

/// The first `viewBox` value in `svg`.
pub fn extract_viewbox(svg: &str) -> Option<&str> {
    viewbox_value()
        .captures(svg)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Force the document's viewBox to `viewbox`.
///
/// Every `width`/`height` attribute is dropped so the image scales to its
/// container. An existing `viewBox` is replaced; otherwise one is added to
/// the first `<svg>` tag.
pub fn set_viewbox(svg: &str, viewbox: &str) -> String {
    let stripped = size_attr().replace_all(svg, "");
    let attr = format!(r#"viewBox="{viewbox}""#);

    if viewbox_attr().is_match(&stripped) {
        viewbox_attr()
            .replace(&stripped, |_: &Captures<'_>| attr.clone())
            .into_owned()
    } else {
        svg_open_tag()
            .replace(&stripped, |caps: &Captures<'_>| format!("<svg{} {attr}>", &caps[1]))
            .into_owned()
    }
}

#[derive(Debug, Deserialize)]
struct ViewBoxOverride {
    name: String,
    bbox: String,
}

/// Parse a JSON list of `{"name": .., "bbox": ..}` overrides into a map
/// from company name to viewBox. Later entries win.
pub fn parse_viewbox_overrides(json: &str) -> Result<BTreeMap<String, String>, MaintenanceError> {
    let overrides: Vec<ViewBoxOverride> =
        serde_json::from_str(json.trim()).map_err(MaintenanceError::ViewBoxOverrides)?;

    Ok(overrides
        .into_iter()
        .map(|o| (o.name, o.bbox))
        .collect())
}
