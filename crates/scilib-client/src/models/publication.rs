//! Publication models matching the search API schema.

use serde::{Deserialize, Serialize};

/// A publication as returned in a search result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Unique paper ID.
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: String,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: String,

    /// Conference or venue name.
    #[serde(default)]
    pub venue: String,

    /// Journal name.
    #[serde(default)]
    pub journal: String,

    /// Publication year.
    #[serde(default)]
    pub year: i32,

    /// Publication date (`yyyy-MM-dd`).
    #[serde(default)]
    pub publication_date: String,

    /// Number of citations.
    #[serde(default)]
    pub citation_count: i32,

    /// Number of influential citations.
    #[serde(default)]
    pub influential_citation_count: i32,

    /// Average h-index of the authors.
    #[serde(default, rename = "avgHIndex")]
    pub avg_h_index: f64,

    /// Author names, already joined by the server.
    #[serde(default)]
    pub authors: String,

    /// Fields of study.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Secondary fields of study.
    #[serde(default, rename = "f2Fields")]
    pub f2_fields: Vec<String>,

    /// Publication types (e.g. "JournalArticle", "Review").
    #[serde(default)]
    pub publication_types: Vec<String>,

    /// Short summary.
    #[serde(default)]
    pub tldr: String,

    /// Whether the paper is open access.
    #[serde(default)]
    pub is_open_access: bool,

    /// Relevance score assigned by the server.
    #[serde(default)]
    pub score: f64,
}

impl Publication {
    /// Get the title, falling back to "Untitled" when blank.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        if self.title.trim().is_empty() { "Untitled" } else { &self.title }
    }

    /// Venue or journal, whichever is present.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        [self.venue.as_str(), self.journal.as_str()].into_iter().find(|s| !s.trim().is_empty())
    }
}

/// Full publication record. The server may omit any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDetail {
    #[serde(default)]
    pub paper_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub r#abstract: Option<String>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(default)]
    pub journal: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub publication_date: Option<String>,

    #[serde(default)]
    pub citation_count: Option<i32>,

    #[serde(default)]
    pub influential_citation_count: Option<i32>,

    #[serde(default, rename = "avgHIndex")]
    pub avg_h_index: Option<f64>,

    #[serde(default)]
    pub authors: Option<String>,

    #[serde(default)]
    pub fields: Option<Vec<String>>,

    #[serde(default, rename = "f2Fields")]
    pub f2_fields: Option<Vec<String>>,

    #[serde(default)]
    pub publication_types: Option<Vec<String>>,

    #[serde(default)]
    pub tldr: Option<String>,

    #[serde(default)]
    pub is_open_access: Option<bool>,

    /// Direct link to an open-access PDF.
    #[serde(default)]
    pub open_access_pdf_url: Option<String>,

    #[serde(default)]
    pub score: Option<f64>,
}

impl PublicationDetail {
    /// Get the title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Get the open-access PDF URL if present and non-blank.
    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.open_access_pdf_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> i32 {
        self.citation_count.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_decodes_wire_names() {
        let json = serde_json::json!({
            "paperId": "p1",
            "title": "Attention Is All You Need",
            "avgHIndex": 41.5,
            "f2Fields": ["NLP"],
            "publicationTypes": ["Conference"],
            "isOpenAccess": true,
            "score": 12.25,
            "somethingNew": 1
        });
        let publication: Publication = serde_json::from_value(json).unwrap();
        assert_eq!(publication.paper_id, "p1");
        assert!((publication.avg_h_index - 41.5).abs() < f64::EPSILON);
        assert_eq!(publication.f2_fields, vec!["NLP"]);
        assert!(publication.is_open_access);
        assert_eq!(publication.citation_count, 0);
    }

    #[test]
    fn test_publication_source_prefers_venue() {
        let publication = Publication {
            venue: "NeurIPS".into(),
            journal: "JMLR".into(),
            ..Default::default()
        };
        assert_eq!(publication.source(), Some("NeurIPS"));

        let journal_only = Publication { journal: "JMLR".into(), ..Default::default() };
        assert_eq!(journal_only.source(), Some("JMLR"));
        assert_eq!(Publication::default().source(), None);
    }

    #[test]
    fn test_detail_all_fields_optional() {
        let detail: PublicationDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail, PublicationDetail::default());
        assert_eq!(detail.title_or_default(), "Untitled");
        assert_eq!(detail.pdf_url(), None);
    }

    #[test]
    fn test_detail_blank_pdf_url_is_absent() {
        let detail = PublicationDetail {
            open_access_pdf_url: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(detail.pdf_url(), None);
    }
}
