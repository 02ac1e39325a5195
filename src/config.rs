//! Run configuration.
//!
//! Values come from the process environment (after `.env` has been loaded
//! by the binary) with built-in defaults; CLI flags override them in
//! `main`.

use crate::export;
use crate::filter::RegionFilter;
use crate::profile::DEFAULT_SCHOLAR_URL;
use crate::serpapi::DEFAULT_SERPAPI_URL;
use std::path::PathBuf;

/// SerpAPI credential
pub const ENV_SERPAPI_KEY: &str = "SERPAPI_KEY";
/// Scholar base URL override (mirrors)
pub const ENV_SCHOLAR_BASE_URL: &str = "SCHOLAR_BASE_URL";
/// SerpAPI base URL override
pub const ENV_SERPAPI_BASE_URL: &str = "SERPAPI_BASE_URL";
/// Region label used in the summary line
pub const ENV_REGION_NAME: &str = "REGION_NAME";
/// Comma-separated institution substrings
pub const ENV_REGION_INSTITUTIONS: &str = "REGION_INSTITUTIONS";

/// Settings for a single run
#[derive(Debug, Clone)]
pub struct Settings {
    pub serpapi_key: Option<String>,
    pub scholar_base_url: String,
    pub serpapi_base_url: String,
    pub region_name: String,
    pub region: RegionFilter,
    pub output_path: PathBuf,
    pub proxy: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            serpapi_key: None,
            scholar_base_url: DEFAULT_SCHOLAR_URL.to_string(),
            serpapi_base_url: DEFAULT_SERPAPI_URL.to_string(),
            region_name: "Taiwan".to_string(),
            region: RegionFilter::default(),
            output_path: export::default_output_path(),
            proxy: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a variable lookup function.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let default = Self::default();

        Self {
            serpapi_key: var(ENV_SERPAPI_KEY),
            scholar_base_url: var(ENV_SCHOLAR_BASE_URL).unwrap_or(default.scholar_base_url),
            serpapi_base_url: var(ENV_SERPAPI_BASE_URL).unwrap_or(default.serpapi_base_url),
            region_name: var(ENV_REGION_NAME).unwrap_or(default.region_name),
            region: var(ENV_REGION_INSTITUTIONS)
                .map(|list| RegionFilter::new(list.split(',')))
                .unwrap_or(default.region),
            output_path: default.output_path,
            proxy: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.serpapi_key, None);
        assert_eq!(settings.scholar_base_url, "https://scholar.google.com");
        assert_eq!(settings.serpapi_base_url, "https://serpapi.com");
        assert_eq!(settings.region_name, "Taiwan");
        assert_eq!(settings.region, RegionFilter::default());
        assert_eq!(settings.output_path, PathBuf::from("taiwan_connections.csv"));
    }

    #[test]
    fn test_values_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_SERPAPI_KEY, " secret "),
            (ENV_SCHOLAR_BASE_URL, "http://127.0.0.1:8080"),
            (ENV_REGION_NAME, "Japan"),
            (ENV_REGION_INSTITUTIONS, "University of Tokyo, Kyoto,,Osaka"),
        ]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.serpapi_key.as_deref(), Some("secret"));
        assert_eq!(settings.scholar_base_url, "http://127.0.0.1:8080");
        assert_eq!(settings.serpapi_base_url, "https://serpapi.com");
        assert_eq!(settings.region_name, "Japan");
        assert_eq!(settings.region.institutions(), ["university of tokyo", "kyoto", "osaka"]);
    }

    #[test]
    fn test_blank_key_is_unset() {
        let settings = Settings::from_lookup(|key| (key == ENV_SERPAPI_KEY).then(|| "  ".to_string()));
        assert_eq!(settings.serpapi_key, None);
    }
}
