//! Scientific Library Client
//!
//! Client library for a scientific-publication search API: typed HTTP transport,
//! REST facade, and the view-state logic behind a search screen and a detail screen.
//!
//! # Features
//!
//! - **Paged search**: frozen filter snapshots, append-only paging, last-page detection
//! - **Facet filters**: author / journal / venue / publication-type chips with free-text fallback
//! - **Autocomplete**: one cancel-and-replace request stream per facet
//! - **Scoring editor**: fetch, edit and replace the server's ranking weights
//! - **Closed error set**: every failure maps to one [`NetworkError`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scilib_client::{ApiClient, Config, RemotePublicationRepository, ResultService};
//! use scilib_client::search::{SearchViewModel, UiEvent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new(Config::from_env()?)?;
//!     let repository = RemotePublicationRepository::new(ResultService::new(client));
//!     let search = SearchViewModel::new(Arc::new(repository));
//!
//!     search.on_event(UiEvent::QueryChanged("neural networks".into()));
//!     search.on_event(UiEvent::SearchClicked);
//!
//!     let mut state = search.subscribe();
//!     let state = state.wait_for(|s| !s.is_loading).await?;
//!     println!("{} results", state.publications.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod formatters;
pub mod models;
pub mod platform;
pub mod repository;
pub mod search;
pub mod service;
pub mod state;
pub mod task;

pub use client::ApiClient;
pub use config::Config;
pub use detail::DetailViewModel;
pub use error::{ClientResult, NetworkError};
pub use repository::{
    PublicationDetailRepository, PublicationRepository, RemotePublicationDetailRepository,
    RemotePublicationRepository,
};
pub use search::SearchViewModel;
pub use service::{DetailService, ResultService};
