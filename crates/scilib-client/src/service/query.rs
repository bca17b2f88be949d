//! Query-string builder for `/search`.

use chrono::NaiveDate;

use crate::models::SearchFilters;

/// Date format used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Every parameter `/search` accepts.
///
/// `fields` and `affiliation` are accepted by the server but never derived from
/// [`SearchFilters`]; set them explicitly if needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
    pub year: Option<i32>,
    pub fields: Option<Vec<String>>,
    pub venues: Option<Vec<String>>,
    pub authors: Option<Vec<String>>,
    pub journals: Option<Vec<String>>,
    pub pub_types: Option<Vec<String>>,
    pub affiliation: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub citations_from: Option<i32>,
    pub citations_to: Option<i32>,
    pub open_access: Option<bool>,
    pub hindex_from: Option<f64>,
    pub hindex_to: Option<f64>,
}

impl SearchQuery {
    /// A bare text query for one page.
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self { query: query.into(), page, page_size, ..Self::default() }
    }

    /// Query for one page of a frozen search.
    #[must_use]
    pub fn from_filters(filters: &SearchFilters, page: u32, page_size: u32) -> Self {
        Self {
            query: filters.query.clone(),
            page,
            page_size,
            year: filters.year,
            fields: None,
            venues: filters.venues.clone(),
            authors: filters.authors.clone(),
            journals: filters.journals.clone(),
            pub_types: filters.pub_types.clone(),
            affiliation: None,
            date_from: filters.date_from,
            date_to: filters.date_to,
            citations_from: filters.citations_from,
            citations_to: filters.citations_to,
            open_access: filters.open_access,
            hindex_from: filters.hindex_from,
            hindex_to: filters.hindex_to,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    /// Serialize to query parameters.
    ///
    /// `query`, `page` and `pageSize` are always sent. Everything else is sent only
    /// when present and non-empty; lists are comma-joined.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.trim().to_string()),
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];

        push_opt(&mut params, "year", self.year);
        push_list(&mut params, "fields", self.fields.as_deref());
        push_list(&mut params, "venue", self.venues.as_deref());
        push_list(&mut params, "author", self.authors.as_deref());
        push_list(&mut params, "journal", self.journals.as_deref());
        push_list(&mut params, "pubType", self.pub_types.as_deref());
        if let Some(affiliation) = self.affiliation.as_deref().map(str::trim) {
            if !affiliation.is_empty() {
                params.push(("affiliation", affiliation.to_string()));
            }
        }
        push_opt(&mut params, "dateFrom", self.date_from.map(|d| d.format(DATE_FORMAT)));
        push_opt(&mut params, "dateTo", self.date_to.map(|d| d.format(DATE_FORMAT)));
        push_opt(&mut params, "citationsFrom", self.citations_from);
        push_opt(&mut params, "citationsTo", self.citations_to);
        push_opt(&mut params, "openAccess", self.open_access);
        push_opt(&mut params, "hindexFrom", self.hindex_from);
        push_opt(&mut params, "hindexTo", self.hindex_to);

        params
    }
}

fn push_opt<T: ToString>(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

fn push_list(params: &mut Vec<(&'static str, String)>, key: &'static str, values: Option<&[String]>) {
    if let Some(values) = values.filter(|v| !v.is_empty()) {
        params.push((key, values.join(",")));
    }
}
