//! Portfolio company records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::people::Fund;
use super::stage::Stage;
use super::RecordMeta;
use crate::filter::Faceted;

/// Filter dimension over [`PortfolioCompany::stage`].
pub const STAGE_DIMENSION: &str = "stage";

/// Filter dimension over [`PortfolioCompany::inactive`] (`active` / `inactive`).
pub const STATUS_DIMENSION: &str = "status";

const ACTIVE: &str = "active";
const INACTIVE: &str = "inactive";

/// Related records resolved by an `expand` query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioExpand {
    /// Funds the company is held by.
    #[serde(default)]
    pub funds: Vec<Fund>,
}

/// A portfolio company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioCompany {
    /// System fields.
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Company name.
    pub name: String,
    /// Homepage URL.
    #[serde(default)]
    pub homepage: String,
    /// Accent colour (hex).
    #[serde(default)]
    pub accent: String,
    /// HTML blurb.
    #[serde(default)]
    pub blurb: String,
    /// Logo file served on the site.
    #[serde(default)]
    pub logo: String,
    /// Original logo upload, before optimization.
    #[serde(default)]
    pub unoptimised_logo: String,
    /// Also show the unoptimised logo.
    #[serde(default)]
    pub use_unoptimised_logo: bool,
    /// Render the logo inverted on dark accents.
    #[serde(default)]
    pub invert_foreground: bool,
    /// No longer active.
    #[serde(default)]
    pub inactive: bool,
    /// Shown in featured carousels.
    #[serde(default)]
    pub featured: bool,
    /// Publicly released.
    #[serde(default)]
    pub release: bool,
    /// Lifecycle stage.
    #[serde(default)]
    pub stage: Stage,
    /// IDs of the funds holding the company.
    #[serde(default)]
    pub funds: Vec<String>,
    /// Previous names, as stored.
    #[serde(default)]
    pub former_names: Option<Value>,
    /// Free-form metadata, including maintenance markers.
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Expanded relations.
    #[serde(default)]
    pub expand: PortfolioExpand,
}

impl PortfolioCompany {
    /// Status facet value.
    pub fn status(&self) -> &'static str {
        if self.inactive {
            INACTIVE
        } else {
            ACTIVE
        }
    }

    /// Logo file names to show, in display order.
    pub fn logo_files(&self) -> Vec<&str> {
        if self.use_unoptimised_logo {
            vec![self.logo.as_str(), self.unoptimised_logo.as_str()]
        } else {
            vec![self.logo.as_str()]
        }
    }

    /// Domain of the status dimension.
    pub fn statuses() -> [&'static str; 2] {
        [ACTIVE, INACTIVE]
    }
}

impl Faceted for PortfolioCompany {
    type Value = &'static str;

    fn facet(&self, dimension: &str) -> Option<&&'static str> {
        match dimension {
            STAGE_DIMENSION => Some(self.stage.key_ref()),
            STATUS_DIMENSION => Some(if self.inactive { &INACTIVE } else { &ACTIVE }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": "p1",
            "collectionId": "c_portfolio",
            "collectionName": "portfolio_companies",
            "name": "Acme",
            "homepage": "https://acme.test",
            "accent": "#112233",
            "logo": "acme.webp",
            "unoptimised_logo": "acme.png",
            "use_unoptimised_logo": false,
            "stage": "scaling",
            "funds": ["f1"],
            "metadata": null,
            "expand": {
                "funds": [{"id": "f1", "name": "Fund I"}]
            }
        })
    }

    #[test]
    fn test_decode_portfolio_company() {
        let company: PortfolioCompany = serde_json::from_value(sample()).unwrap();

        assert_eq!(company.meta.collection_id, "c_portfolio");
        assert_eq!(company.stage, Stage::Scaling);
        assert_eq!(company.expand.funds[0].name, "Fund I");
        assert!(company.metadata.is_none());
        assert_eq!(company.logo_files(), vec!["acme.webp"]);
    }

    #[test]
    fn test_logo_files_with_unoptimised() {
        let mut company: PortfolioCompany = serde_json::from_value(sample()).unwrap();
        company.use_unoptimised_logo = true;

        assert_eq!(company.logo_files(), vec!["acme.webp", "acme.png"]);
    }

    #[test]
    fn test_facets() {
        let mut company: PortfolioCompany = serde_json::from_value(sample()).unwrap();

        assert_eq!(company.facet(STAGE_DIMENSION), Some(&"scaling"));
        assert_eq!(company.facet(STATUS_DIMENSION), Some(&"active"));
        assert_eq!(company.facet("fund"), None);

        company.inactive = true;
        assert_eq!(company.facet(STATUS_DIMENSION), Some(&"inactive"));
        assert_eq!(company.status(), "inactive");
    }
}
