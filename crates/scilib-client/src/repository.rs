//! Repository seam between the view models and the REST services.
//!
//! The remote implementations are pass-throughs; the traits exist so view-state
//! logic can be driven by any source of results.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{Facet, Publication, PublicationDetail, ScoringParams, SearchFilters};
use crate::service::{DetailService, ResultService};

/// Search-side data access.
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// One page of results for a frozen search.
    async fn search_publications(
        &self,
        filters: &SearchFilters,
        page: u32,
        page_size: u32,
    ) -> ClientResult<Option<Vec<Publication>>>;

    /// Current scoring parameters.
    async fn get_scoring_params(&self) -> ClientResult<ScoringParams>;

    /// Replace all scoring parameters.
    async fn update_all_scoring_params(&self, params: &ScoringParams) -> ClientResult<()>;

    /// Autocomplete values for a facet.
    async fn get_suggestions(&self, facet: Facet, query: &str) -> ClientResult<Option<Vec<String>>>;
}

/// Detail-side data access.
#[async_trait]
pub trait PublicationDetailRepository: Send + Sync {
    async fn get_publication_by_id(&self, paper_id: &str) -> ClientResult<PublicationDetail>;
}

/// [`PublicationRepository`] backed by the search API.
#[derive(Debug, Clone)]
pub struct RemotePublicationRepository {
    service: ResultService,
}

impl RemotePublicationRepository {
    #[must_use]
    pub fn new(service: ResultService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PublicationRepository for RemotePublicationRepository {
    async fn search_publications(
        &self,
        filters: &SearchFilters,
        page: u32,
        page_size: u32,
    ) -> ClientResult<Option<Vec<Publication>>> {
        self.service.search(filters, page, page_size).await
    }

    async fn get_scoring_params(&self) -> ClientResult<ScoringParams> {
        self.service.get_scoring_params().await
    }

    async fn update_all_scoring_params(&self, params: &ScoringParams) -> ClientResult<()> {
        self.service.update_scoring_params(params).await
    }

    async fn get_suggestions(&self, facet: Facet, query: &str) -> ClientResult<Option<Vec<String>>> {
        self.service.get_suggestions(facet, query).await
    }
}

/// [`PublicationDetailRepository`] backed by the search API.
#[derive(Debug, Clone)]
pub struct RemotePublicationDetailRepository {
    service: DetailService,
}

impl RemotePublicationDetailRepository {
    #[must_use]
    pub fn new(service: DetailService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PublicationDetailRepository for RemotePublicationDetailRepository {
    async fn get_publication_by_id(&self, paper_id: &str) -> ClientResult<PublicationDetail> {
        self.service.get_publication_by_id(paper_id).await
    }
}
