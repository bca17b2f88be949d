//! Compact JSON output formatting.

use serde_json::{Value, json};

use crate::models::{Publication, PublicationDetail};

/// Create a compact publication representation for JSON output.
#[must_use]
pub fn compact_publication(publication: &Publication) -> Value {
    let mut obj = json!({
        "id": publication.paper_id,
        "title": publication.title_or_default(),
        "year": publication.year,
        "citations": publication.citation_count,
        "score": publication.score,
    });

    if !publication.authors.trim().is_empty() {
        obj["authors"] = json!(publication.authors);
    }

    if let Some(source) = publication.source() {
        obj["venue"] = json!(source);
    }

    if publication.is_open_access {
        obj["openAccess"] = json!(true);
    }

    if !publication.tldr.trim().is_empty() {
        obj["tldr"] = json!(publication.tldr);
    }

    obj
}

/// Create a compact detail representation, dropping absent fields.
#[must_use]
pub fn compact_detail(detail: &PublicationDetail) -> Value {
    let mut obj = json!({
        "id": detail.paper_id,
        "title": detail.title_or_default(),
        "citations": detail.citations(),
    });

    if let Some(year) = detail.year {
        obj["year"] = json!(year);
    }

    if let Some(authors) = &detail.authors {
        obj["authors"] = json!(authors);
    }

    if let Some(pdf) = detail.pdf_url() {
        obj["pdf"] = json!(pdf);
    }

    if let Some(tldr) = &detail.tldr {
        obj["tldr"] = json!(tldr);
    }

    obj
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_publication() {
        let publication = Publication {
            paper_id: "abc123".to_string(),
            title: "Test Paper".to_string(),
            year: 2024,
            citation_count: 42,
            authors: "John Doe, Jane Roe".to_string(),
            ..Default::default()
        };

        let compact = compact_publication(&publication);

        assert_eq!(compact["id"], "abc123");
        assert_eq!(compact["title"], "Test Paper");
        assert_eq!(compact["year"], 2024);
        assert_eq!(compact["citations"], 42);
        assert_eq!(compact["authors"], "John Doe, Jane Roe");
        assert!(compact.get("venue").is_none());
        assert!(compact.get("openAccess").is_none());
    }

    #[test]
    fn test_compact_detail_skips_missing() {
        let detail = PublicationDetail {
            paper_id: Some("p9".into()),
            open_access_pdf_url: Some("https://example.org/p9.pdf".into()),
            ..Default::default()
        };

        let compact = compact_detail(&detail);
        assert_eq!(compact["id"], "p9");
        assert_eq!(compact["title"], "Untitled");
        assert_eq!(compact["pdf"], "https://example.org/p9.pdf");
        assert!(compact.get("year").is_none());
    }
}
