//! REST facade over [`ApiClient`]: one method per endpoint, typed responses.

mod query;

use crate::client::ApiClient;
use crate::config::endpoints;
use crate::error::ClientResult;
use crate::models::{Facet, Publication, PublicationDetail, ScoringParams, SearchFilters};

pub use query::{DATE_FORMAT, SearchQuery};

/// Search, scoring and suggestion endpoints.
#[derive(Debug, Clone)]
pub struct ResultService {
    client: ApiClient,
}

impl ResultService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one page of results for a frozen search.
    ///
    /// The server may answer `null`; the page is returned as-is, unsorted.
    pub async fn search(
        &self,
        filters: &SearchFilters,
        page: u32,
        page_size: u32,
    ) -> ClientResult<Option<Vec<Publication>>> {
        self.search_with(&SearchQuery::from_filters(filters, page, page_size)).await
    }

    /// Fetch one page using every parameter the endpoint accepts.
    pub async fn search_with(&self, query: &SearchQuery) -> ClientResult<Option<Vec<Publication>>> {
        self.client.get(&[endpoints::SEARCH], &query.to_params()).await
    }

    /// Current scoring parameters.
    pub async fn get_scoring_params(&self) -> ClientResult<ScoringParams> {
        self.client.get(&[endpoints::PARAMS], &[]).await
    }

    /// Replace all scoring parameters.
    pub async fn update_scoring_params(&self, params: &ScoringParams) -> ClientResult<()> {
        self.client.post(&[endpoints::PARAMS, endpoints::UPDATE], params).await
    }

    /// Autocomplete values for `facet`.
    pub async fn get_suggestions(
        &self,
        facet: Facet,
        query: &str,
    ) -> ClientResult<Option<Vec<String>>> {
        let params = [("type", facet.as_str().to_string()), ("query", query.trim().to_string())];
        self.client.get(&[endpoints::SUGGEST], &params).await
    }
}

/// Single-publication endpoint.
#[derive(Debug, Clone)]
pub struct DetailService {
    client: ApiClient,
}

impl DetailService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one publication by id.
    pub async fn get_publication_by_id(&self, paper_id: &str) -> ClientResult<PublicationDetail> {
        self.client.get(&[endpoints::PUBLICATION, paper_id], &[]).await
    }
}
