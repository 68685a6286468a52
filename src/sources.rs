//! Title → citation page table.
//!
//! Titles must match the data file exactly; a publication whose title is not
//! in the table is skipped by the updater.

use crate::url_validator::validate_source_url;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;
use url::Url;

pub const DEFAULT_PUBLICATION_URLS: &[(&str, &str)] = &[
    (
        "Resilience strategies to recover from the cascading ripple effect in a copper supply chain through project management",
        "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=oUNyeYMAAAAJ&citation_for_view=oUNyeYMAAAAJ:u5HHmVD_uO8C",
    ),
    (
        "Environment and economic analysis of reverse supply chain scenarios for remanufacturing using discrete-event simulation approach",
        "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=oUNyeYMAAAAJ&citation_for_view=oUNyeYMAAAAJ:zYLM7Y9cAGgC",
    ),
    (
        "Supply chain routing in a diary industry using heterogeneous fleet system: simulation-based approach",
        "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=oUNyeYMAAAAJ&citation_for_view=oUNyeYMAAAAJ:9yKSN-GCB0IC",
    ),
    (
        "Application of multi grade fuzzy approach to compute the circularity index of manufacturing organizations",
        "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=oUNyeYMAAAAJ&citation_for_view=oUNyeYMAAAAJ:d1gkVwhDpl0C",
    ),
    (
        "Application of dmaic to reduce the rejection rate of starter motor shaft assembly in the automobile industry: a case study",
        "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=oUNyeYMAAAAJ&citation_for_view=oUNyeYMAAAAJ:Tyk-4Ss8FVUC",
    ),
    (
        "A QFD Approach for Selection of Design for Logistics Strategies",
        "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=oUNyeYMAAAAJ&citation_for_view=oUNyeYMAAAAJ:2osOgNQ5qMEC",
    ),
];

/// Validated lookup table used by the updater.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    urls: HashMap<String, Url>,
}

impl SourceMap {
    /// Build from raw pairs. Entries whose URL fails validation are logged
    /// and left out, so those publications behave as unregistered.
    pub fn build<I, S>(entries: I, allowed_hosts: &[S]) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
        S: AsRef<str>,
    {
        let mut urls = HashMap::new();
        for (title, raw) in entries {
            match validate_source_url(&raw, allowed_hosts) {
                Ok(url) => {
                    urls.insert(title, url);
                }
                Err(e) => warn!("Ignoring source URL for \"{}\": {}", title, e),
            }
        }
        Self { urls }
    }

    /// Built-in table with `overrides` applied on top.
    pub fn with_defaults<S: AsRef<str>>(
        overrides: &BTreeMap<String, String>,
        allowed_hosts: &[S],
    ) -> Self {
        let mut merged: BTreeMap<String, String> = DEFAULT_PUBLICATION_URLS
            .iter()
            .map(|(t, u)| (t.to_string(), u.to_string()))
            .collect();
        merged.extend(overrides.iter().map(|(t, u)| (t.clone(), u.clone())));
        Self::build(merged, allowed_hosts)
    }

    pub fn get(&self, title: &str) -> Option<&Url> {
        self.urls.get(title)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
