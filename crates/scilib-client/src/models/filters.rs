//! Facets, committed filter chips and the frozen search snapshot.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A filterable dimension with server-side autocomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    Author,
    Journal,
    Venue,
    PubType,
}

impl Facet {
    /// Every facet, in display order.
    pub const ALL: [Self; 4] = [Self::Author, Self::Journal, Self::Venue, Self::PubType];

    /// Name used by the `/suggest` endpoint's `type` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Journal => "journal",
            Self::Venue => "venue",
            Self::PubType => "pubType",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised facet name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown facet '{0}' (expected author, journal, venue or pubType)")]
pub struct ParseFacetError(pub String);

impl FromStr for Facet {
    type Err = ParseFacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(Self::Author),
            "journal" => Ok(Self::Journal),
            "venue" => Ok(Self::Venue),
            "pubtype" | "pub_type" | "pub-type" => Ok(Self::PubType),
            _ => Err(ParseFacetError(s.to_string())),
        }
    }
}

/// A committed facet value, shown as a removable chip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub facet: Facet,
    pub value: String,
}

impl ActiveFilter {
    #[must_use]
    pub fn new(facet: Facet, value: impl Into<String>) -> Self {
        Self { facet, value: value.into() }
    }
}

/// Insertion-ordered set of committed filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters(Vec<ActiveFilter>);

impl ActiveFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter. Returns false if an equal filter is already present.
    pub fn insert(&mut self, filter: ActiveFilter) -> bool {
        if self.0.contains(&filter) {
            return false;
        }
        self.0.push(filter);
        true
    }

    /// Remove a filter by value equality. Returns true if one was removed.
    pub fn remove(&mut self, filter: &ActiveFilter) -> bool {
        let before = self.0.len();
        self.0.retain(|f| f != filter);
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, filter: &ActiveFilter) -> bool {
        self.0.contains(filter)
    }

    /// Committed values for one facet, in insertion order.
    #[must_use]
    pub fn values(&self, facet: Facet) -> Vec<String> {
        self.0.iter().filter(|f| f.facet == facet).map(|f| f.value.clone()).collect()
    }

    /// Values to send for `facet`: the chips if any are committed, otherwise the
    /// non-blank free text as a single value, otherwise nothing.
    #[must_use]
    pub fn resolve(&self, facet: Facet, free_text: &str) -> Option<Vec<String>> {
        let chips = self.values(facet);
        if !chips.is_empty() {
            return Some(chips);
        }
        let text = free_text.trim();
        (!text.is_empty()).then(|| vec![text.to_string()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveFilter> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActiveFilters {
    type Item = &'a ActiveFilter;
    type IntoIter = std::slice::Iter<'a, ActiveFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Query parameters frozen when a search starts and reused for every page of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub query: String,
    pub year: Option<i32>,
    pub venues: Option<Vec<String>>,
    pub authors: Option<Vec<String>>,
    pub journals: Option<Vec<String>>,
    pub pub_types: Option<Vec<String>>,
    pub hindex_from: Option<f64>,
    pub hindex_to: Option<f64>,
    pub citations_from: Option<i32>,
    pub citations_to: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub open_access: Option<bool>,
}

impl SearchFilters {
    /// A plain text search with no facets.
    #[must_use]
    pub fn for_query(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }
}
