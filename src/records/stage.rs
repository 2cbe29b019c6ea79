//! Portfolio company stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a portfolio company.
///
/// Unknown or empty values decode as [`Stage::Unassigned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// First product in market.
    ProductLaunch,
    /// Finding product/market fit.
    MarketValidation,
    /// Growing the business.
    Scaling,
    /// Strong revenue growth.
    RevenueMomentum,
    /// Acquired or listed.
    LiquidityEvent,
    /// No stage set.
    #[default]
    #[serde(other)]
    Unassigned,
}

impl Stage {
    /// Every stage, in display order.
    pub const ALL: [Stage; 6] = [
        Self::ProductLaunch,
        Self::MarketValidation,
        Self::Scaling,
        Self::RevenueMomentum,
        Self::LiquidityEvent,
        Self::Unassigned,
    ];

    /// Stage key as stored by the service.
    pub fn as_str(&self) -> &'static str {
        self.key_ref()
    }

    /// Parse a stage key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }

    /// Human label: the key with underscores as spaces, in title case.
    pub fn label(&self) -> String {
        title_case(&self.as_str().replace('_', " "))
    }

    /// Key with a `'static` address, for use as a filter facet.
    pub(crate) fn key_ref(&self) -> &'static &'static str {
        match self {
            Self::ProductLaunch => &"product_launch",
            Self::MarketValidation => &"market_validation",
            Self::Scaling => &"scaling",
            Self::RevenueMomentum => &"revenue_momentum",
            Self::LiquidityEvent => &"liquidity_event",
            Self::Unassigned => &"unassigned",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper-case the first letter of each whitespace-separated word and
/// lower-case the rest.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
