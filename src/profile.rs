//! Google Scholar author lookup.
//!
//! Resolves a free-text author name to a Scholar profile identifier by
//! scraping the author search page and reading the first result card.
//! Request and page problems never surface as errors: they come back as
//! [`Lookup::Missing`] with a [`MissReason`] so callers can tell a missing
//! profile apart from a blocked or failed request. Only a bad base URL is
//! an error.

use crate::error::{ColleagueError, OptionExt, Result};
use scraper::{Html, Selector};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default Google Scholar URL
pub const DEFAULT_SCHOLAR_URL: &str = "https://scholar.google.com";

/// User agent string for requests
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// First result card link on the author search page
const PROFILE_LINK_SELECTOR: &str = "div.gs_ai_t h3 a";

/// Marker preceding the profile identifier in a profile URL
const USER_MARKER: &str = "user=";

/// Why an author lookup produced no identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    /// The search page had no result card
    NotFound,
    /// Scholar answered with a CAPTCHA / unusual traffic page
    Blocked,
    /// Scholar answered with a non-success status
    HttpStatus(u16),
    /// The request could not be completed
    Network(String),
    /// A result card was found but its link was unusable
    Parse(String),
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissReason::NotFound => write!(f, "no matching profile"),
            MissReason::Blocked => write!(f, "blocked by CAPTCHA"),
            MissReason::HttpStatus(code) => write!(f, "HTTP status {}", code),
            MissReason::Network(msg) => write!(f, "network error: {}", msg),
            MissReason::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

/// Outcome of resolving an author name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Scholar profile identifier of the first search result
    Found(String),
    /// No identifier, with the reason
    Missing(MissReason),
}

impl Lookup {
    /// The resolved identifier, if any
    pub fn author_id(&self) -> Option<&str> {
        match self {
            Lookup::Found(id) => Some(id.as_str()),
            Lookup::Missing(_) => None,
        }
    }
}

/// Build HTTP client with optional proxy
pub fn build_http_client(proxy: Option<&str>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .cookie_store(true);

    if let Some(proxy_url) = proxy {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
            ColleagueError::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e))
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ColleagueError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Build the author search URL.
///
/// The name goes into `mauthors` form-encoded, so spaces become `+`.
pub fn build_search_url(base_url: &str, author_name: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/citations", base_url.trim_end_matches('/')))
        .map_err(|e| ColleagueError::Config(format!("Invalid base URL: {}", e)))?;

    url.query_pairs_mut()
        .append_pair("view_op", "search_authors")
        .append_pair("mauthors", author_name.trim());

    Ok(url)
}

/// Resolve an author name to a Scholar profile identifier.
///
/// Only the first listed profile is used; same-named authors are not
/// disambiguated. Request and page problems come back as
/// [`Lookup::Missing`]; an unusable `base_url` is a config error.
pub async fn resolve_author_id(client: &reqwest::Client, base_url: &str, author_name: &str) -> Result<Lookup> {
    let url = build_search_url(base_url, author_name)?;

    info!(author = author_name, url = %url, "Searching Scholar profiles");

    let response = match client
        .get(url.as_str())
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!(author = author_name, error = %e, "Profile search request failed");
            return Ok(Lookup::Missing(MissReason::Network(e.to_string())));
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(author = author_name, status = status.as_u16(), "Profile search returned an error status");
        return Ok(Lookup::Missing(MissReason::HttpStatus(status.as_u16())));
    }

    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            warn!(author = author_name, error = %e, "Failed to read profile search page");
            return Ok(Lookup::Missing(MissReason::Network(e.to_string())));
        }
    };

    let lookup = lookup_from_html(&html);
    match &lookup {
        Lookup::Found(id) => info!(author = author_name, author_id = %id, "Resolved Scholar profile"),
        Lookup::Missing(reason) => warn!(author = author_name, reason = %reason, "No Scholar profile resolved"),
    }
    Ok(lookup)
}

/// Turn a search results page into a lookup outcome.
///
/// The CAPTCHA markers are only checked when the page has no result card.
pub fn lookup_from_html(html: &str) -> Lookup {
    let href = match parse_first_profile_href(html) {
        Ok(Some(href)) => href,
        Ok(None) if is_blocked_page(html) => return Lookup::Missing(MissReason::Blocked),
        Ok(None) => return Lookup::Missing(MissReason::NotFound),
        Err(e) => return Lookup::Missing(MissReason::Parse(e.to_string())),
    };

    debug!(href = %href, "First profile link");

    match parse_author_id(&href) {
        Ok(id) => Lookup::Found(id),
        Err(e) => Lookup::Missing(MissReason::Parse(e.to_string())),
    }
}

fn is_blocked_page(html: &str) -> bool {
    html.contains("Solving the above CAPTCHA") || html.contains("unusual traffic")
}

/// Extract the `href` of the first result card link, if any.
pub fn parse_first_profile_href(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let link_selector =
        Selector::parse(PROFILE_LINK_SELECTOR).map_err(|e| ColleagueError::Parse(e.to_string()))?;

    let Some(link) = document.select(&link_selector).next() else {
        return Ok(None);
    };

    link.value()
        .attr("href")
        .map(|href| Some(href.to_string()))
        .ok_or_parse("profile link has no href")
}

/// Extract the identifier from a profile URL.
///
/// The identifier runs from `user=` to the next `&`, or to the end of the
/// string when no `&` follows.
pub fn parse_author_id(href: &str) -> Result<String> {
    let (_, rest) = href
        .split_once(USER_MARKER)
        .ok_or_parse("profile link has no user= parameter")?;
    let id = rest.split('&').next().unwrap_or_default();

    if id.is_empty() {
        return Err(ColleagueError::Parse("empty user= parameter".to_string()));
    }
    Ok(id.to_string())
}
