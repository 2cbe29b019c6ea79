//! Portfolio page data.

use serde::Serialize;

use super::LoadError;
use crate::filter::{FilterConfig, FilterError, FilterStore};
use crate::records::{
    decode_records, Collection, PortfolioCompany, Stage, STAGE_DIMENSION, STATUS_DIMENSION,
};
use crate::source::{ListQuery, RecordFilter, RecordSource};

/// Fetch companies in `stage` with their funds expanded.
///
/// When `featured` is set only featured companies are returned.
pub async fn featured_portfolios<S: RecordSource>(
    source: &S,
    stage: Stage,
    featured: bool,
) -> Result<Vec<PortfolioCompany>, LoadError> {
    let by_stage = RecordFilter::eq("stage", stage.as_str());
    let filter = if featured {
        RecordFilter::eq("featured", true).and(by_stage)
    } else {
        by_stage
    };
    let query = ListQuery::all().filter(filter).expand("funds");

    let records = source
        .list_records(Collection::PortfolioCompanies, &query)
        .await
        .map_err(LoadError::from_source)?;
    let companies: Vec<PortfolioCompany> = decode_records(records)?;

    tracing::debug!(
        stage = %stage,
        featured = featured,
        count = companies.len(),
        "Loaded portfolio companies"
    );

    Ok(companies)
}

/// Companies laid out for an endless-scroll carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioCarousel {
    /// Companies, repeated as needed.
    pub companies: Vec<PortfolioCompany>,
    /// How many copies of the fetched list `companies` holds.
    pub iterations: u32,
}

impl PortfolioCarousel {
    /// Lists this short are shown once, without repetition.
    pub const MAX_UNREPEATED: usize = 4;

    /// Repeated lists are doubled until they hold at least this many entries.
    pub const MIN_LEN: usize = 20;

    /// Lay out an already fetched list.
    pub fn from_companies(mut companies: Vec<PortfolioCompany>) -> Self {
        let mut iterations = 1;

        if companies.len() > Self::MAX_UNREPEATED {
            while companies.len() < Self::MIN_LEN {
                companies.extend_from_within(..);
                iterations += 1;
            }
        }

        Self {
            companies,
            iterations,
        }
    }

    /// Fetch and lay out the companies of a stage.
    pub async fn load<S: RecordSource>(
        source: &S,
        stage: Stage,
        featured: bool,
    ) -> Result<Self, LoadError> {
        let companies = featured_portfolios(source, stage, featured).await?;
        Ok(Self::from_companies(companies))
    }
}

/// A stage as a select option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    /// Stage key.
    pub value: &'static str,
    /// Display label.
    pub label: String,
}

/// Every stage as a select option, in stage order.
pub fn portfolio_categories() -> Vec<CategoryOption> {
    Stage::ALL
        .iter()
        .map(|stage| CategoryOption {
            value: stage.as_str(),
            label: stage.label(),
        })
        .collect()
}

/// Cross-filter over companies by stage and status.
pub fn portfolio_filter(
    companies: Vec<PortfolioCompany>,
) -> Result<FilterStore<PortfolioCompany>, FilterError> {
    let config = FilterConfig::new()
        .dimension(STAGE_DIMENSION, Stage::ALL.iter().map(Stage::as_str))
        .dimension(STATUS_DIMENSION, PortfolioCompany::statuses());

    FilterStore::new(companies, config)
}
