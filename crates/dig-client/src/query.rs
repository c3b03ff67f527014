//! Query planning: one outbound read request per (filters, search) pair.
//!
//! A [`DiscoveryQuery`] is also the request signature. Two plans compare
//! equal exactly when they would produce the same URL, which is what lets
//! the view discard responses for a pair that is no longer active.

use dig_core::{DiscoveryType, Era, FilterState};
use reqwest::Url;
use serde::Serialize;

use crate::error::ClientError;

const LIST_PATH: &str = "/api/discoveries";
const FILTER_PATH: &str = "/api/discoveries/filters";
const SEARCH_PATH: &str = "/api/discoveries/search";

/// What caused a refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A selector changed.
    Filters,
    /// The debounced search text settled.
    Search,
}

/// Active parameters for the filtered endpoint. Inactive ones are `None`
/// and never appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bible_era: Option<Era>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiscoveryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl FilterParams {
    /// `(name, value)` pairs in wire order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(era) = self.bible_era {
            pairs.push(("bibleEra", era.as_str()));
        }
        if let Some(region) = &self.region {
            pairs.push(("region", region.as_str()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.as_str()));
        }
        if let Some(query) = &self.query {
            pairs.push(("query", query.as_str()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "endpoint", rename_all = "lowercase")]
pub enum DiscoveryQuery {
    /// `GET /api/discoveries`
    All,
    /// `GET /api/discoveries/filters?...`
    Filtered(FilterParams),
    /// `GET /api/discoveries/search?query=...`
    Search { query: String },
}

fn trimmed(search: &str) -> Option<String> {
    let search = search.trim();
    (!search.is_empty()).then(|| search.to_string())
}

impl DiscoveryQuery {
    /// Plan for the filter flow: every active selection plus the search text.
    #[must_use]
    pub fn from_filters(filters: &FilterState, search: &str) -> Self {
        let query = trimmed(search);
        if !filters.is_active() && query.is_none() {
            return Self::All;
        }
        Self::Filtered(FilterParams {
            bible_era: filters.bible_era,
            region: filters.region.clone(),
            kind: filters.kind,
            query,
        })
    }

    /// Plan for the search flow alone.
    #[must_use]
    pub fn from_search(search: &str) -> Self {
        trimmed(search).map_or(Self::All, |query| Self::Search { query })
    }

    /// Pick the request for a trigger.
    ///
    /// A search keystroke never drops active filters: while any selection is
    /// set, the search text rides along on the filtered endpoint instead.
    #[must_use]
    pub fn plan(trigger: Trigger, filters: &FilterState, search: &str) -> Self {
        match trigger {
            Trigger::Search if !filters.is_active() => Self::from_search(search),
            Trigger::Search | Trigger::Filters => Self::from_filters(filters, search),
        }
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::All => LIST_PATH,
            Self::Filtered(_) => FILTER_PATH,
            Self::Search { .. } => SEARCH_PATH,
        }
    }

    /// Query-string pairs in wire order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::All => Vec::new(),
            Self::Filtered(params) => params.pairs(),
            Self::Search { query } => vec![("query", query.as_str())],
        }
    }

    /// Render the full request URL against a backend origin.
    ///
    /// Values are `application/x-www-form-urlencoded`, so a space becomes `+`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base` is not an absolute URL.
    pub fn to_url(&self, base: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{}", base.trim().trim_end_matches('/'), self.path());
        let mut url =
            Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        let pairs = self.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}
