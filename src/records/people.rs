//! Funds, managers and team members.

use serde::{Deserialize, Serialize};

use super::RecordMeta;

/// A fund.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// System fields.
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Full fund name.
    pub name: String,
    /// Short display name.
    #[serde(default)]
    pub short_name: String,
    /// ID of the managing record.
    #[serde(default)]
    pub manager: String,
    /// Whether the fund is closed to new investments.
    #[serde(default)]
    pub closed: bool,
}

impl Fund {
    /// Short name if set, full name otherwise.
    pub fn display_name(&self) -> &str {
        if self.short_name.is_empty() {
            &self.name
        } else {
            &self.short_name
        }
    }
}

/// A fund manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    /// System fields.
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Manager name.
    pub name: String,
    /// Homepage URL.
    #[serde(default)]
    pub homepage: String,
    /// Accent colour (hex).
    #[serde(default)]
    pub accent: String,
    /// Logo file name.
    #[serde(default)]
    pub logo: String,
    /// Shown on the home page.
    #[serde(default)]
    pub featured: bool,
}

/// A team member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// System fields.
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Full name.
    pub name: String,
    /// Job title.
    #[serde(default)]
    pub title: String,
    /// Short biography.
    #[serde(default)]
    pub blurb: String,
    /// LinkedIn profile URL.
    #[serde(default)]
    pub linkedin: String,
    /// Picture file name.
    #[serde(default)]
    pub picture: String,
}
