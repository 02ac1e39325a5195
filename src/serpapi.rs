//! SerpAPI client for Google Scholar co-author listings.
//!
//! API Details:
//! - Endpoint: GET /search.json
//! - Engine: `google_scholar_author` with `view_op=list_colleagues`
//! - The co-author list arrives under `co_authors`; every field is optional

use crate::error::{ColleagueError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// SerpAPI base URL
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com";

/// Search engine serving Scholar author pages
const ENGINE: &str = "google_scholar_author";

/// View listing every co-author of the profile
const VIEW_OP: &str = "list_colleagues";

/// A co-author entry as returned by SerpAPI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub affiliations: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthorResponse {
    #[serde(default)]
    co_authors: Option<Vec<CoAuthor>>,
    #[serde(default)]
    error: Option<String>,
}

/// Co-author listing client
pub struct SerpApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SerpApiClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `base_url` - SerpAPI base URL (without trailing `/search.json`)
    /// * `api_key` - SerpAPI key; only needed once an author id is known
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Fetch the co-authors listed on a Scholar profile.
    ///
    /// An absent author id yields an empty list without issuing a request.
    pub async fn co_authors(&self, author_id: Option<&str>) -> Result<Vec<CoAuthor>> {
        let Some(author_id) = author_id else {
            warn!("No author id, skipping co-author lookup");
            return Ok(Vec::new());
        };

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ColleagueError::Config("SERPAPI_KEY is not set".to_string()))?;

        let url = format!("{}/search.json", self.base_url);
        debug!(url = %url, author_id = author_id, "Requesting co-author list");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", api_key),
                ("engine", ENGINE),
                ("author_id", author_id),
                ("view_op", VIEW_OP),
                ("hl", "en"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<AuthorResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            warn!(status = status.as_u16(), error = %message, "SerpAPI error");
            return Err(ColleagueError::Api {
                code: status.as_u16() as i32,
                message,
            });
        }

        let co_authors = parse_co_authors(&body)?;
        info!(author_id = author_id, count = co_authors.len(), "Fetched co-authors");
        Ok(co_authors)
    }
}

/// Parse a SerpAPI author response body into its co-author list.
///
/// A missing `co_authors` field is an empty list; an `error` field is an
/// API error.
pub fn parse_co_authors(body: &str) -> Result<Vec<CoAuthor>> {
    let response: AuthorResponse = serde_json::from_str(body)?;

    if let Some(message) = response.error {
        return Err(ColleagueError::Api { code: 200, message });
    }

    Ok(response.co_authors.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_co_authors() {
        let body = r#"{
            "search_metadata": {"status": "Success"},
            "co_authors": [
                {"name": "A", "link": "https://scholar.google.com/citations?user=1", "author_id": "1",
                 "affiliations": "National Taiwan University", "email": "a@x.com"},
                {"name": "B", "affiliations": "MIT", "author_id": "2"},
                {"name": "C"}
            ]
        }"#;

        let co_authors = parse_co_authors(body).expect("Parse failed");
        assert_eq!(co_authors.len(), 3);
        assert_eq!(co_authors[0].email.as_deref(), Some("a@x.com"));
        assert_eq!(co_authors[1].email, None);
        assert_eq!(co_authors[2].affiliations, None);
    }

    #[test]
    fn test_parse_missing_co_authors() {
        let co_authors = parse_co_authors(r#"{"author": {"name": "Prof X"}}"#).expect("Parse failed");
        assert!(co_authors.is_empty());
    }

    #[test]
    fn test_parse_error_field() {
        let err = parse_co_authors(r#"{"error": "Invalid API key."}"#).expect_err("should fail");
        assert!(matches!(err, ColleagueError::Api { ref message, .. } if message == "Invalid API key."));
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(parse_co_authors("<html>"), Err(ColleagueError::Json(_))));
    }

    #[tokio::test]
    async fn test_absent_author_id_skips_request() {
        // Unroutable base URL: any request would fail
        let client = SerpApiClient::new(Client::new(), "http://127.0.0.1:9", None);
        let co_authors = client.co_authors(None).await.expect("lookup failed");
        assert!(co_authors.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let client = SerpApiClient::new(Client::new(), DEFAULT_SERPAPI_URL, None);
        let err = client.co_authors(Some("ABC123")).await.expect_err("should fail");
        assert!(matches!(err, ColleagueError::Config(_)));
    }
}
