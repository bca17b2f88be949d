//! State, events and effects of the search screen.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    ActiveFilter, ActiveFilters, Facet, Publication, ScoringField, ScoringParams,
    ScoringParamsDraft, SearchFilters,
};

/// Everything the search screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub query: String,
    pub is_advanced_visible: bool,
    pub year: String,
    pub author_query: String,
    pub journal_query: String,
    pub venue_query: String,
    pub pub_type_query: String,
    pub hindex_from: String,
    pub hindex_to: String,
    pub citations_from: String,
    pub citations_to: String,
    pub open_access: bool,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,

    pub publications: Vec<Publication>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub active_filters: ActiveFilters,

    pub author_suggestions: Vec<String>,
    pub journal_suggestions: Vec<String>,
    pub venue_suggestions: Vec<String>,
    pub pub_type_suggestions: Vec<String>,

    /// Next page to fetch.
    pub current_page: u32,
    /// Set once the server returns an empty page for the current search.
    pub is_last_page: bool,
    /// Snapshot of the current search; `None` until the first search.
    pub last_filters: Option<Arc<SearchFilters>>,

    pub is_params_dialog_open: bool,
    pub scoring_params: Option<ScoringParams>,
    pub scoring_draft: ScoringParamsDraft,
    pub scoring_error: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            query: String::new(),
            is_advanced_visible: false,
            year: String::new(),
            author_query: String::new(),
            journal_query: String::new(),
            venue_query: String::new(),
            pub_type_query: String::new(),
            hindex_from: String::new(),
            hindex_to: String::new(),
            citations_from: String::new(),
            citations_to: String::new(),
            open_access: false,
            date_from: None,
            date_to: None,
            publications: Vec::new(),
            is_loading: false,
            error_message: None,
            active_filters: ActiveFilters::new(),
            author_suggestions: Vec::new(),
            journal_suggestions: Vec::new(),
            venue_suggestions: Vec::new(),
            pub_type_suggestions: Vec::new(),
            current_page: 1,
            is_last_page: false,
            last_filters: None,
            is_params_dialog_open: false,
            scoring_params: None,
            scoring_draft: ScoringParamsDraft::default(),
            scoring_error: None,
        }
    }
}

impl UiState {
    /// Free text typed into a facet's box.
    #[must_use]
    pub fn facet_query(&self, facet: Facet) -> &str {
        match facet {
            Facet::Author => &self.author_query,
            Facet::Journal => &self.journal_query,
            Facet::Venue => &self.venue_query,
            Facet::PubType => &self.pub_type_query,
        }
    }

    pub(crate) fn facet_query_mut(&mut self, facet: Facet) -> &mut String {
        match facet {
            Facet::Author => &mut self.author_query,
            Facet::Journal => &mut self.journal_query,
            Facet::Venue => &mut self.venue_query,
            Facet::PubType => &mut self.pub_type_query,
        }
    }

    /// Autocomplete values currently offered for a facet.
    #[must_use]
    pub fn suggestions(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Author => &self.author_suggestions,
            Facet::Journal => &self.journal_suggestions,
            Facet::Venue => &self.venue_suggestions,
            Facet::PubType => &self.pub_type_suggestions,
        }
    }

    pub(crate) fn suggestions_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Author => &mut self.author_suggestions,
            Facet::Journal => &mut self.journal_suggestions,
            Facet::Venue => &mut self.venue_suggestions,
            Facet::PubType => &mut self.pub_type_suggestions,
        }
    }

    /// Freeze the current inputs into search parameters.
    ///
    /// Committed chips win over free text for each facet. Numeric boxes that do
    /// not parse are treated as empty.
    #[must_use]
    pub fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            query: self.query.clone(),
            year: parse_field(&self.year),
            venues: self.active_filters.resolve(Facet::Venue, &self.venue_query),
            authors: self.active_filters.resolve(Facet::Author, &self.author_query),
            journals: self.active_filters.resolve(Facet::Journal, &self.journal_query),
            pub_types: self.active_filters.resolve(Facet::PubType, &self.pub_type_query),
            hindex_from: parse_field(&self.hindex_from),
            hindex_to: parse_field(&self.hindex_to),
            citations_from: parse_field(&self.citations_from),
            citations_to: parse_field(&self.citations_to),
            date_from: self.date_from,
            date_to: self.date_to,
            open_access: self.open_access.then_some(true),
        }
    }
}

fn parse_field<T: std::str::FromStr>(text: &str) -> Option<T> {
    text.trim().parse().ok()
}

/// User interactions with the search screen.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ToggleAdvancedSection,
    QueryChanged(String),
    YearChanged(String),
    AuthorQueryChanged(String),
    JournalQueryChanged(String),
    VenueQueryChanged(String),
    PubTypeQueryChanged(String),
    HIndexFromChanged(String),
    HIndexToChanged(String),
    CitationsFromChanged(String),
    CitationsToChanged(String),
    OpenAccessToggled,
    DateFromChanged(Option<NaiveDate>),
    DateToChanged(Option<NaiveDate>),
    SearchClicked,
    LoadMore,
    AddFilter(ActiveFilter),
    RemoveFilter(ActiveFilter),
    SuggestionSelected { facet: Facet, value: String },
    AdjustParamsClicked,
    DismissParamsDialog,
    ScoringFieldChanged(ScoringField, String),
    UpdateAllParams,
}

impl UiEvent {
    /// The text-changed event for a facet's box.
    #[must_use]
    pub fn facet_query_changed(facet: Facet, text: impl Into<String>) -> Self {
        let text = text.into();
        match facet {
            Facet::Author => Self::AuthorQueryChanged(text),
            Facet::Journal => Self::JournalQueryChanged(text),
            Facet::Venue => Self::VenueQueryChanged(text),
            Facet::PubType => Self::PubTypeQueryChanged(text),
        }
    }
}

/// One-shot notifications for the search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    ShowError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_starts_at_page_one() {
        let state = UiState::default();
        assert_eq!(state.current_page, 1);
        assert!(!state.is_last_page);
        assert!(state.last_filters.is_none());
    }

    #[test]
    fn test_to_filters_chip_wins_over_free_text() {
        let mut state = UiState { author_query: "Hinton".into(), ..UiState::default() };
        state.active_filters.insert(ActiveFilter::new(Facet::Author, "LeCun"));

        let filters = state.to_filters();
        assert_eq!(filters.authors, Some(vec!["LeCun".to_string()]));
    }

    #[test]
    fn test_to_filters_free_text_fallback() {
        let state = UiState {
            query: "graph neural networks".into(),
            venue_query: "NeurIPS".into(),
            journal_query: "  ".into(),
            ..UiState::default()
        };

        let filters = state.to_filters();
        assert_eq!(filters.venues, Some(vec!["NeurIPS".to_string()]));
        assert_eq!(filters.journals, None);
        assert_eq!(filters.authors, None);
    }

    #[test]
    fn test_to_filters_lenient_numbers() {
        let state = UiState {
            year: "2019".into(),
            hindex_from: "12.5".into(),
            hindex_to: "lots".into(),
            citations_from: " 10 ".into(),
            citations_to: "".into(),
            open_access: true,
            ..UiState::default()
        };

        let filters = state.to_filters();
        assert_eq!(filters.year, Some(2019));
        assert_eq!(filters.hindex_from, Some(12.5));
        assert_eq!(filters.hindex_to, None);
        assert_eq!(filters.citations_from, Some(10));
        assert_eq!(filters.citations_to, None);
        assert_eq!(filters.open_access, Some(true));
    }

    #[test]
    fn test_open_access_off_is_not_sent() {
        assert_eq!(UiState::default().to_filters().open_access, None);
    }

    #[test]
    fn test_facet_query_changed_maps_to_variant() {
        assert_eq!(
            UiEvent::facet_query_changed(Facet::PubType, "Review"),
            UiEvent::PubTypeQueryChanged("Review".into())
        );
    }
}
