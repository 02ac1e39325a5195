//! Region affiliation filter.
//!
//! Keeps co-authors whose affiliation text mentions one of the configured
//! institution or city names and flattens them into [`Connection`] rows.

use crate::serpapi::CoAuthor;
use serde::{Deserialize, Serialize};

/// Institutions and cities matched by default (Taiwan).
pub const TAIWAN_INSTITUTIONS: &[&str] = &[
    "national taiwan university",
    "national cheng kung university",
    "national tsing hua university",
    "national chiao tung university",
    "national yang ming chiao tung university",
    "academia sinica",
    "taipei",
    "kaohsiung",
    "taichung",
    "tainan",
    "taiwan",
];

/// A co-author matched to the region, linked to the queried author.
///
/// Field order is the exported CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub name: String,
    pub affiliation: String,
    pub author_id: Option<String>,
    pub email: Option<String>,
    /// Display name of the author the co-author list belongs to
    pub connected_author: String,
}

/// Case-insensitive substring filter over affiliations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFilter {
    institutions: Vec<String>,
}

impl RegionFilter {
    /// Create a filter from institution substrings.
    ///
    /// Entries are lower-cased and trimmed; blank entries are dropped.
    pub fn new<I, S>(institutions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let institutions = institutions
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { institutions }
    }

    /// Institution substrings in match order
    pub fn institutions(&self) -> &[String] {
        &self.institutions
    }

    /// True when no institution is configured, so nothing can match
    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }

    /// Institution substrings contained in an affiliation, in list order
    pub fn matches<'a>(&'a self, affiliation: &str) -> impl Iterator<Item = &'a str> + 'a {
        let affiliation = affiliation.to_lowercase();
        self.institutions
            .iter()
            .filter(move |institution| affiliation.contains(institution.as_str()))
            .map(String::as_str)
    }

    /// Flatten matching co-authors into connections.
    ///
    /// A co-author emits one connection per matching institution, so an
    /// affiliation matching k entries appears k times. Output follows the
    /// upstream order, then institution order.
    pub fn connections(&self, co_authors: &[CoAuthor], connected_author: &str) -> Vec<Connection> {
        let mut connections = Vec::new();

        for co_author in co_authors {
            let affiliation = co_author.affiliations.as_deref().unwrap_or_default();
            for _ in self.matches(affiliation) {
                connections.push(Connection {
                    name: co_author.name.clone().unwrap_or_default(),
                    affiliation: affiliation.to_string(),
                    author_id: co_author.author_id.clone(),
                    email: co_author.email.clone(),
                    connected_author: connected_author.to_string(),
                });
            }
        }

        connections
    }
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self::new(TAIWAN_INSTITUTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn co_author(name: &str, affiliations: Option<&str>, author_id: &str, email: Option<&str>) -> CoAuthor {
        CoAuthor {
            name: Some(name.to_string()),
            affiliations: affiliations.map(str::to_string),
            author_id: Some(author_id.to_string()),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_single_institution_scenario() {
        let co_authors = vec![
            co_author("A", Some("National Taiwan University"), "1", Some("a@x.com")),
            co_author("B", Some("MIT"), "2", None),
        ];
        let filter = RegionFilter::new(["national taiwan university"]);

        let connections = filter.connections(&co_authors, "Prof X");
        assert_eq!(
            connections,
            vec![Connection {
                name: "A".to_string(),
                affiliation: "National Taiwan University".to_string(),
                author_id: Some("1".to_string()),
                email: Some("a@x.com".to_string()),
                connected_author: "Prof X".to_string(),
            }]
        );
    }

    #[test]
    fn test_default_list_emits_duplicates() {
        let co_authors = vec![
            co_author("A", Some("National Taiwan University"), "1", Some("a@x.com")),
            co_author("B", Some("MIT"), "2", None),
        ];

        let connections = RegionFilter::default().connections(&co_authors, "Prof X");
        // "national taiwan university" and "taiwan"
        assert_eq!(connections.len(), 2);
        assert!(connections.iter().all(|c| c.name == "A" && c.connected_author == "Prof X"));
    }

    #[test]
    fn test_match_count_equals_emitted_rows() {
        let filter = RegionFilter::default();
        let affiliation = "Dept. of EE, National Cheng Kung University, Tainan, Taiwan";
        let expected = filter.matches(affiliation).count();
        assert_eq!(expected, 3);

        let rows = filter.connections(&[co_author("C", Some(affiliation), "3", None)], "Prof Y");
        assert_eq!(rows.len(), expected);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let filter = RegionFilter::new(["Academia Sinica"]);
        assert_eq!(filter.institutions(), ["academia sinica"]);
        assert_eq!(filter.matches("ACADEMIA SINICA, Institute of Physics").count(), 1);
    }

    #[test]
    fn test_no_affiliation_emits_nothing() {
        let co_authors = vec![
            co_author("D", None, "4", None),
            co_author("E", Some("Stanford University"), "5", None),
        ];
        assert!(RegionFilter::default().connections(&co_authors, "Prof Z").is_empty());
    }

    #[test]
    fn test_order_follows_upstream_then_institutions() {
        let co_authors = vec![
            co_author("F", Some("Kaohsiung Medical University"), "6", None),
            co_author("G", Some("Taipei Medical University, Taiwan"), "7", None),
        ];
        let filter = RegionFilter::new(["taiwan", "taipei", "kaohsiung"]);

        let names: Vec<_> = filter
            .connections(&co_authors, "Prof X")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["F", "G", "G"]);
        assert_eq!(
            filter.matches("Taipei Medical University, Taiwan").collect::<Vec<_>>(),
            ["taiwan", "taipei"]
        );
    }

    #[test]
    fn test_blank_entries_dropped() {
        let filter = RegionFilter::new(["", "  ", " Taichung "]);
        assert_eq!(filter.institutions(), ["taichung"]);
        assert!(!filter.is_empty());
        assert!(RegionFilter::new([" ", ""]).is_empty());
    }
}
