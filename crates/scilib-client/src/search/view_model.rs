//! Search orchestration: paged search, autocomplete, filter chips, scoring dialog.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

use super::contract::{UiEffect, UiEvent, UiState};
use crate::config::api;
use crate::models::{ActiveFilter, Facet, ScoringParams, SearchFilters};
use crate::repository::PublicationRepository;
use crate::state::StateHolder;
use crate::task::{TaskSlot, run_cancellable};

/// Shown when the scoring parameters cannot be fetched.
pub const LOAD_PARAMS_ERROR: &str = "Failed to load parameters";

/// Shown when the scoring parameters cannot be replaced.
pub const UPDATE_PARAMS_ERROR: &str = "Failed to update parameters";

/// Owns the search screen's state and the requests that feed it.
///
/// All mutations go through [`SearchViewModel::on_event`]. Events that start
/// requests spawn onto the current Tokio runtime, so `on_event` must be called
/// from within one.
#[derive(Clone)]
pub struct SearchViewModel {
    inner: Arc<Inner>,
}

struct Inner {
    repository: Arc<dyn PublicationRepository>,
    page_size: u32,
    state: StateHolder<UiState, UiEffect>,
    search: TaskSlot,
    author_suggestions: TaskSlot,
    journal_suggestions: TaskSlot,
    venue_suggestions: TaskSlot,
    pub_type_suggestions: TaskSlot,
    scoring: TaskSlot,
}

impl Inner {
    fn suggestion_slot(&self, facet: Facet) -> &TaskSlot {
        match facet {
            Facet::Author => &self.author_suggestions,
            Facet::Journal => &self.journal_suggestions,
            Facet::Venue => &self.venue_suggestions,
            Facet::PubType => &self.pub_type_suggestions,
        }
    }
}

impl SearchViewModel {
    /// Create a view model with the default page size.
    #[must_use]
    pub fn new(repository: Arc<dyn PublicationRepository>) -> Self {
        Self::with_page_size(repository, api::PAGE_SIZE)
    }

    #[must_use]
    pub fn with_page_size(repository: Arc<dyn PublicationRepository>, page_size: u32) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                page_size,
                state: StateHolder::new(UiState::default()),
                search: TaskSlot::new("search"),
                author_suggestions: TaskSlot::new("author-suggestions"),
                journal_suggestions: TaskSlot::new("journal-suggestions"),
                venue_suggestions: TaskSlot::new("venue-suggestions"),
                pub_type_suggestions: TaskSlot::new("pub-type-suggestions"),
                scoring: TaskSlot::new("scoring"),
            }),
        }
    }

    /// Clone of the current state.
    #[must_use]
    pub fn state(&self) -> UiState {
        self.inner.state.snapshot()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.state.subscribe()
    }

    /// State changes as a stream, starting with the current value.
    #[must_use]
    pub fn state_stream(&self) -> WatchStream<UiState> {
        self.inner.state.stream()
    }

    /// Take the one-shot effect receiver. Only the first call returns `Some`.
    pub fn take_effects(&self) -> Option<mpsc::UnboundedReceiver<UiEffect>> {
        self.inner.state.take_effects()
    }

    /// Handle one user interaction.
    pub fn on_event(&self, event: UiEvent) {
        let state = &self.inner.state;
        match event {
            UiEvent::ToggleAdvancedSection => {
                state.update(|s| s.is_advanced_visible = !s.is_advanced_visible);
            }
            UiEvent::QueryChanged(query) => state.update(|s| s.query = query),
            UiEvent::YearChanged(year) => state.update(|s| s.year = year),
            UiEvent::AuthorQueryChanged(text) => self.facet_query_changed(Facet::Author, text),
            UiEvent::JournalQueryChanged(text) => self.facet_query_changed(Facet::Journal, text),
            UiEvent::VenueQueryChanged(text) => self.facet_query_changed(Facet::Venue, text),
            UiEvent::PubTypeQueryChanged(text) => self.facet_query_changed(Facet::PubType, text),
            UiEvent::HIndexFromChanged(value) => state.update(|s| s.hindex_from = value),
            UiEvent::HIndexToChanged(value) => state.update(|s| s.hindex_to = value),
            UiEvent::CitationsFromChanged(value) => state.update(|s| s.citations_from = value),
            UiEvent::CitationsToChanged(value) => state.update(|s| s.citations_to = value),
            UiEvent::OpenAccessToggled => state.update(|s| s.open_access = !s.open_access),
            UiEvent::DateFromChanged(date) => state.update(|s| s.date_from = date),
            UiEvent::DateToChanged(date) => state.update(|s| s.date_to = date),
            UiEvent::SearchClicked => self.start_search(),
            UiEvent::LoadMore => self.load_more(),
            UiEvent::AddFilter(filter) => {
                state.update_if(|s| s.active_filters.insert(filter));
            }
            UiEvent::RemoveFilter(filter) => {
                state.update_if(|s| s.active_filters.remove(&filter));
            }
            UiEvent::SuggestionSelected { facet, value } => self.select_suggestion(facet, value),
            UiEvent::AdjustParamsClicked => self.open_params_dialog(),
            UiEvent::DismissParamsDialog => state.update(|s| s.is_params_dialog_open = false),
            UiEvent::ScoringFieldChanged(field, value) => {
                state.update(|s| s.scoring_draft.set(field, value));
            }
            UiEvent::UpdateAllParams => self.submit_params(),
        }
    }

    /// Start a new search from the current inputs, replacing any search in flight.
    fn start_search(&self) {
        let mut request = None;
        self.inner.state.update(|s| {
            let filters = Arc::new(s.to_filters());
            s.current_page = 1;
            s.is_last_page = false;
            s.publications.clear();
            s.last_filters = Some(Arc::clone(&filters));
            s.is_loading = true;
            s.error_message = None;
            request = Some((self.inner.search.replace(), filters));
        });

        if let Some((token, filters)) = request {
            tracing::info!(query = %filters.query, "starting new search");
            self.spawn_page_fetch(token, filters, 1);
        }
    }

    /// Fetch the next page of the current search unless busy, exhausted or idle.
    fn load_more(&self) {
        let mut request = None;
        self.inner.state.update_if(|s| {
            if s.is_loading || s.is_last_page {
                return false;
            }
            let Some(filters) = s.last_filters.clone() else {
                return false;
            };
            s.is_loading = true;
            s.error_message = None;
            request = Some((self.inner.search.replace(), filters, s.current_page));
            true
        });

        match request {
            Some((token, filters, page)) => {
                tracing::debug!(page, "loading next page");
                self.spawn_page_fetch(token, filters, page);
            }
            None => tracing::trace!("load more ignored"),
        }
    }

    fn spawn_page_fetch(&self, token: CancellationToken, filters: Arc<SearchFilters>, page: u32) {
        let vm = self.clone();
        tokio::spawn(async move {
            let inner = &vm.inner;
            let result = run_cancellable(
                &token,
                inner.repository.search_publications(&filters, page, inner.page_size),
            )
            .await;

            let mut notify = None;
            inner.state.update_if_current(&token, |s| {
                s.is_loading = false;
                match result {
                    Ok(items) => {
                        let items = items.unwrap_or_default();
                        if items.is_empty() {
                            tracing::debug!(page, "reached last page");
                            s.is_last_page = true;
                        } else {
                            tracing::debug!(page, count = items.len(), "page loaded");
                            s.publications.extend(items);
                            s.current_page += 1;
                        }
                    }
                    Err(err) if err.is_silent() => {}
                    Err(err) => {
                        tracing::warn!(page, error = ?err, "search failed");
                        let message = err.message();
                        s.error_message = Some(message.clone());
                        notify = Some(message);
                    }
                }
            });

            if let Some(message) = notify {
                inner.state.emit(UiEffect::ShowError(message));
            }
        });
    }

    /// Record a facet's free text and refresh its suggestions.
    fn facet_query_changed(&self, facet: Facet, text: String) {
        let query = text.trim().to_string();
        let mut token = None;
        self.inner.state.update(|s| {
            *s.facet_query_mut(facet) = text;
            let slot = self.inner.suggestion_slot(facet);
            if query.is_empty() {
                slot.cancel();
                s.suggestions_mut(facet).clear();
            } else {
                token = Some(slot.replace());
            }
        });

        if let Some(token) = token {
            self.spawn_suggestions(token, facet, query);
        }
    }

    fn spawn_suggestions(&self, token: CancellationToken, facet: Facet, query: String) {
        let vm = self.clone();
        tokio::spawn(async move {
            let inner = &vm.inner;
            let result = run_cancellable(&token, inner.repository.get_suggestions(facet, &query)).await;

            inner.state.update_if_current(&token, |s| {
                *s.suggestions_mut(facet) = match result {
                    Ok(values) => values.unwrap_or_default(),
                    Err(err) => {
                        tracing::debug!(%facet, error = ?err, "suggestions unavailable");
                        Vec::new()
                    }
                };
            });
        });
    }

    /// Commit a suggestion as a chip and clear the facet's box.
    fn select_suggestion(&self, facet: Facet, value: String) {
        self.inner.state.update(|s| {
            s.active_filters.insert(ActiveFilter::new(facet, value));
            s.facet_query_mut(facet).clear();
            s.suggestions_mut(facet).clear();
            self.inner.suggestion_slot(facet).cancel();
        });
    }

    fn open_params_dialog(&self) {
        let mut token = None;
        self.inner.state.update(|s| {
            s.is_params_dialog_open = true;
            s.scoring_error = None;
            token = Some(self.inner.scoring.replace());
        });

        if let Some(token) = token {
            let vm = self.clone();
            tokio::spawn(async move { vm.load_params(&token).await });
        }
    }

    /// Resolve the draft against the loaded params, close the dialog and submit.
    fn submit_params(&self) {
        let mut request = None;
        self.inner.state.update(|s| {
            s.is_params_dialog_open = false;
            match s.scoring_params {
                Some(previous) => {
                    let params = s.scoring_draft.resolve(&previous);
                    request = Some((self.inner.scoring.replace(), params));
                }
                None => tracing::warn!("scoring parameters submitted before they were loaded"),
            }
        });

        let Some((token, params)) = request else {
            return;
        };

        let vm = self.clone();
        tokio::spawn(async move {
            let inner = &vm.inner;
            match run_cancellable(&token, inner.repository.update_all_scoring_params(&params)).await {
                Ok(()) => {
                    tracing::info!(?params, "scoring parameters updated");
                    vm.load_params(&token).await;
                }
                Err(err) if err.is_silent() => {}
                Err(err) => {
                    tracing::warn!(error = ?err, "failed to update scoring parameters");
                    vm.fail_scoring(&token, UPDATE_PARAMS_ERROR);
                }
            }
        });
    }

    async fn load_params(&self, token: &CancellationToken) {
        let inner = &self.inner;
        match run_cancellable(token, inner.repository.get_scoring_params()).await {
            Ok(params) => {
                inner.state.update_if_current(token, |s| store_params(s, params));
            }
            Err(err) if err.is_silent() => {}
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load scoring parameters");
                self.fail_scoring(token, LOAD_PARAMS_ERROR);
            }
        }
    }

    fn fail_scoring(&self, token: &CancellationToken, message: &str) {
        let applied = self.inner.state.update_if_current(token, |s| {
            s.scoring_error = Some(message.to_string());
        });
        if applied {
            self.inner.state.emit(UiEffect::ShowError(message.to_string()));
        }
    }
}

fn store_params(state: &mut UiState, params: ScoringParams) {
    state.scoring_params = Some(params);
    state.scoring_draft = (&params).into();
}

impl std::fmt::Debug for SearchViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchViewModel").field("page_size", &self.inner.page_size).finish()
    }
}
