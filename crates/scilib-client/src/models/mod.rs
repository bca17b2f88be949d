//! Data models for the search API.
//!
//! Wire models use `#[serde(rename_all = "camelCase")]` to match the API and
//! ignore unknown fields.

mod filters;
mod publication;
mod scoring;

pub use filters::{ActiveFilter, ActiveFilters, Facet, ParseFacetError, SearchFilters};
pub use publication::{Publication, PublicationDetail};
pub use scoring::{ScoringField, ScoringParams, ScoringParamsDraft};
