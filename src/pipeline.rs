//! Resolve → fetch → filter → export.
//!
//! Each stage hands an explicit value to the next: the lookup outcome, the
//! co-author list, then the connections. Stages run one after another.

use crate::config::Settings;
use crate::error::{ColleagueError, Result};
use crate::export;
use crate::filter::Connection;
use crate::profile::{self, Lookup};
use crate::serpapi::SerpApiClient;
use tracing::info;
use url::Url;

/// Summary of a single run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Outcome of the author lookup
    pub lookup: Lookup,
    /// Connections found, in output order
    pub connections: Vec<Connection>,
    /// Rows appended to the output file
    pub rows_written: usize,
}

/// Co-author region search for one configuration
pub struct Pipeline {
    settings: Settings,
    client: reqwest::Client,
    serpapi: SerpApiClient,
}

impl Pipeline {
    /// Build the HTTP client and API clients for the given settings.
    ///
    /// Fails with a config error on an unparsable base URL or an empty
    /// institution list.
    pub fn new(settings: Settings) -> Result<Self> {
        check_base_url("SCHOLAR_BASE_URL", &settings.scholar_base_url)?;
        check_base_url("SERPAPI_BASE_URL", &settings.serpapi_base_url)?;
        if settings.region.is_empty() {
            return Err(ColleagueError::Config(format!(
                "no institutions configured for region {}",
                settings.region_name
            )));
        }

        let client = profile::build_http_client(settings.proxy.as_deref())?;
        let serpapi = SerpApiClient::new(
            client.clone(),
            &settings.serpapi_base_url,
            settings.serpapi_key.clone(),
        );

        Ok(Self {
            settings,
            client,
            serpapi,
        })
    }

    /// Settings this pipeline runs with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve an author name to a Scholar profile identifier
    pub async fn resolve(&self, author_name: &str) -> Result<Lookup> {
        profile::resolve_author_id(&self.client, &self.settings.scholar_base_url, author_name).await
    }

    /// Fetch the co-authors of `author_id` and keep those in the region
    pub async fn connections(&self, author_id: Option<&str>, author_name: &str) -> Result<Vec<Connection>> {
        let co_authors = self.serpapi.co_authors(author_id).await?;
        let connections = self.settings.region.connections(&co_authors, author_name);

        info!(
            co_authors = co_authors.len(),
            matches = connections.len(),
            region = %self.settings.region_name,
            "Filtered co-authors"
        );
        Ok(connections)
    }

    /// Run every stage for one author and append matches to the output file
    pub async fn run(&self, author_name: &str) -> Result<RunReport> {
        if author_name.trim().is_empty() {
            return Err(ColleagueError::Validation("author name must not be empty".to_string()));
        }

        let lookup = self.resolve(author_name).await?;
        let connections = self.connections(lookup.author_id(), author_name).await?;
        let rows_written = export::append_connections(&self.settings.output_path, &connections)?;

        Ok(RunReport {
            lookup,
            connections,
            rows_written,
        })
    }
}

fn check_base_url(name: &str, base_url: &str) -> Result<()> {
    Url::parse(base_url)
        .map(|_| ())
        .map_err(|e| ColleagueError::Config(format!("Invalid {} '{}': {}", name, base_url, e)))
}
