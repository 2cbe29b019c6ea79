//! Home and team page data.

use serde::Serialize;
use url::Url;

use super::LoadError;
use crate::records::{decode_records, Collection, Manager, PortfolioCompany, TeamMember};
use crate::source::{file_url, ListQuery, RecordSource};

/// Data for the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    /// Every fund manager.
    pub managers: Vec<Manager>,
    /// Public URLs of every portfolio logo, in company order.
    pub portfolio_logos: Vec<String>,
}

/// Load the home page: managers and the portfolio logo wall.
///
/// Companies flagged `use_unoptimised_logo` contribute both logos.
pub async fn home_page<S: RecordSource>(source: &S) -> Result<HomePage, LoadError> {
    let managers: Vec<Manager> = decode_records(
        source
            .list_records(Collection::Managers, &ListQuery::all())
            .await
            .map_err(LoadError::from_source)?,
    )?;

    let companies: Vec<PortfolioCompany> = decode_records(
        source
            .list_records(Collection::PortfolioCompanies, &ListQuery::all())
            .await
            .map_err(LoadError::from_source)?,
    )?;

    let base_url = source.base_url();
    let portfolio_logos = companies
        .iter()
        .flat_map(|company| {
            company
                .logo_files()
                .into_iter()
                .map(move |file| file_url(base_url, &company.meta, file))
        })
        .collect();

    Ok(HomePage {
        managers,
        portfolio_logos,
    })
}

/// Load every team member.
pub async fn team<S: RecordSource>(source: &S) -> Result<Vec<TeamMember>, LoadError> {
    let records = source
        .list_records(Collection::Team, &ListQuery::all())
        .await
        .map_err(LoadError::from_source)?;
    Ok(decode_records(records)?)
}

/// Username part of a LinkedIn profile URL: the last non-empty path segment,
/// percent-encoded as it appears in the parsed URL.
///
/// Returns `None` when `url` does not parse or has no path segment.
pub fn linkedin_username(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let username = url.path_segments()?.filter(|segment| !segment.is_empty()).last()?;
    Some(username.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryRecordSource;
    use serde_json::json;

    #[test]
    fn test_linkedin_username() {
        assert_eq!(linkedin_username("https://www.linkedin.com/in/jane-doe/").as_deref(), Some("jane-doe"));
        assert_eq!(linkedin_username("https://linkedin.com/in/jane?trk=x#top").as_deref(), Some("jane"));
        assert_eq!(linkedin_username("https://linkedin.com/"), None);
        assert_eq!(linkedin_username("not a url"), None);
    }

    #[test]
    fn test_linkedin_username_follows_url_parsing() {
        // Backslashes act as separators and the `//` is optional for http(s).
        assert_eq!(linkedin_username("https://www.linkedin.com\\in\\jane").as_deref(), Some("jane"));
        assert_eq!(linkedin_username("https:www.linkedin.com/in/jane").as_deref(), Some("jane"));
        // Non-ASCII segments stay percent-encoded.
        assert_eq!(
            linkedin_username("https://www.linkedin.com/in/jané").as_deref(),
            Some("jan%C3%A9")
        );
    }

    #[tokio::test]
    async fn test_home_page_logos() {
        let source = InMemoryRecordSource::new("https://content.test");
        source
            .add_record(Collection::Managers, json!({"id": "m1", "name": "North Capital"}))
            .unwrap();
        source
            .add_record(
                Collection::PortfolioCompanies,
                json!({"id": "p1", "name": "Acme", "logo": "acme.webp", "unoptimised_logo": "acme.png", "use_unoptimised_logo": true}),
            )
            .unwrap();
        source
            .add_record(
                Collection::PortfolioCompanies,
                json!({"id": "p2", "name": "Beta", "logo": "beta.svg"}),
            )
            .unwrap();

        let page = home_page(&source).await.unwrap();

        assert_eq!(page.managers.len(), 1);
        assert_eq!(
            page.portfolio_logos,
            vec![
                "https://content.test/api/files/pbc_portfolio_companies/p1/acme.webp",
                "https://content.test/api/files/pbc_portfolio_companies/p1/acme.png",
                "https://content.test/api/files/pbc_portfolio_companies/p2/beta.svg",
            ]
        );
    }

    #[tokio::test]
    async fn test_team() {
        let source = InMemoryRecordSource::new("https://content.test");
        source
            .add_record(Collection::Team, json!({"id": "t1", "name": "Sam", "title": "Partner"}))
            .unwrap();

        let members = team(&source).await.unwrap();
        assert_eq!(members[0].title, "Partner");
    }
}
