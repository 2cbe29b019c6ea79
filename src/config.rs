//! Environment configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CONTENT_URL` (falls back to `PB_TYPEGEN_URL`) | `https://content.unifyventures.vc` |
//! | `PB_TYPEGEN_EMAIL` | required for maintenance |
//! | `PB_TYPEGEN_PASSWORD` | required for maintenance |
//! | `MAINTENANCE_BATCH_SIZE` | `5` |

use std::fmt;

use crate::maintenance::DEFAULT_BATCH_SIZE;

/// Content service used when none is configured.
pub const DEFAULT_CONTENT_URL: &str = "https://content.unifyventures.vc";

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),
    /// A variable holds an unusable value.
    #[error("Invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
    },
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Site-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL of the content service.
    pub content_url: String,
}

impl SiteConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            content_url: non_empty(lookup("CONTENT_URL"))
                .or_else(|| non_empty(lookup("PB_TYPEGEN_URL")))
                .unwrap_or_else(|| DEFAULT_CONTENT_URL.to_string()),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_url: DEFAULT_CONTENT_URL.to_string(),
        }
    }
}

/// Admin login for the content service.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Admin email.
    pub email: String,
    /// Admin password.
    pub password: String,
}

impl AdminCredentials {
    /// Create credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for maintenance jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceConfig {
    /// Content service settings.
    pub site: SiteConfig,
    /// Admin login.
    pub credentials: AdminCredentials,
    /// Companies processed concurrently per batch.
    pub batch_size: usize,
}

impl MaintenanceConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let email = non_empty(lookup("PB_TYPEGEN_EMAIL")).ok_or(ConfigError::Missing("PB_TYPEGEN_EMAIL"))?;
        let password =
            non_empty(lookup("PB_TYPEGEN_PASSWORD")).ok_or(ConfigError::Missing("PB_TYPEGEN_PASSWORD"))?;

        let batch_size = match non_empty(lookup("MAINTENANCE_BATCH_SIZE")) {
            None => DEFAULT_BATCH_SIZE,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "MAINTENANCE_BATCH_SIZE",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            site: SiteConfig::from_lookup(&lookup),
            credentials: AdminCredentials::new(email, password),
            batch_size,
        })
    }
}
