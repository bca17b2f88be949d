//! The search screen: paged, faceted search with autocomplete and a scoring editor.

mod contract;
mod view_model;

pub use contract::{UiEffect, UiEvent, UiState};
pub use view_model::{LOAD_PARAMS_ERROR, SearchViewModel, UPDATE_PARAMS_ERROR};
