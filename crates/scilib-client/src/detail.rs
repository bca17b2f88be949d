//! The publication detail screen.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::models::PublicationDetail;
use crate::platform::PdfOpener;
use crate::repository::PublicationDetailRepository;
use crate::state::StateHolder;
use crate::task::{TaskSlot, run_cancellable};

/// Fallback for errors without a message of their own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailUiState {
    pub is_loading: bool,
    pub publication: Option<PublicationDetail>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailUiEvent {
    LoadPublication(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailUiEffect {
    ShowError(String),
}

/// Loads one publication at a time; a new load supersedes the previous one.
#[derive(Clone)]
pub struct DetailViewModel {
    inner: Arc<Inner>,
}

struct Inner {
    repository: Arc<dyn PublicationDetailRepository>,
    state: StateHolder<DetailUiState, DetailUiEffect>,
    load: TaskSlot,
}

impl DetailViewModel {
    #[must_use]
    pub fn new(repository: Arc<dyn PublicationDetailRepository>) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                state: StateHolder::new(DetailUiState::default()),
                load: TaskSlot::new("detail"),
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> DetailUiState {
        self.inner.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DetailUiState> {
        self.inner.state.subscribe()
    }

    pub fn take_effects(&self) -> Option<mpsc::UnboundedReceiver<DetailUiEffect>> {
        self.inner.state.take_effects()
    }

    /// Handle one user interaction. Must be called within a Tokio runtime.
    pub fn on_event(&self, event: DetailUiEvent) {
        match event {
            DetailUiEvent::LoadPublication(paper_id) => self.load(paper_id),
        }
    }

    /// Hand the loaded publication's PDF link to `opener`.
    ///
    /// Returns false when nothing is loaded or the publication has no PDF.
    pub fn open_pdf(&self, opener: &dyn PdfOpener) -> bool {
        let state = self.inner.state.snapshot();
        match state.publication.as_ref().and_then(PublicationDetail::pdf_url) {
            Some(url) => {
                tracing::info!(url, "opening pdf");
                opener.open_pdf(url);
                true
            }
            None => false,
        }
    }

    fn load(&self, paper_id: String) {
        let mut token = None;
        self.inner.state.update(|s| {
            s.is_loading = true;
            s.error_message = None;
            token = Some(self.inner.load.replace());
        });
        let Some(token) = token else {
            return;
        };

        tracing::debug!(%paper_id, "loading publication");
        let vm = self.clone();
        tokio::spawn(async move {
            let inner = &vm.inner;
            let result =
                run_cancellable(&token, inner.repository.get_publication_by_id(&paper_id)).await;

            let mut notify = None;
            inner.state.update_if_current(&token, |s| {
                s.is_loading = false;
                match result {
                    Ok(detail) => s.publication = Some(detail),
                    Err(err) if err.is_silent() => {}
                    Err(err) => {
                        tracing::warn!(%paper_id, error = ?err, "failed to load publication");
                        let message = Some(err.message())
                            .filter(|m| !m.trim().is_empty())
                            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                        s.error_message = Some(message.clone());
                        notify = Some(message);
                    }
                }
            });

            if let Some(message) = notify {
                inner.state.emit(DetailUiEffect::ShowError(message));
            }
        });
    }
}

impl std::fmt::Debug for DetailViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailViewModel").field("state", &self.inner.state.snapshot()).finish()
    }
}
