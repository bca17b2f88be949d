//! Markdown output formatting.

use std::borrow::Cow;

use crate::models::{ActiveFilters, Publication, PublicationDetail, ScoringParams};

/// Abstracts longer than this many characters are cut.
const ABSTRACT_PREVIEW_CHARS: usize = 300;

/// Format a list of publications as Markdown.
#[must_use]
pub fn format_publications_markdown(publications: &[Publication]) -> String {
    if publications.is_empty() {
        return "No publications found.".to_string();
    }

    let mut output = format!("# Publications ({} results)\n\n", publications.len());

    for (i, publication) in publications.iter().enumerate() {
        output.push_str(&format_publication_markdown(publication, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single search result as Markdown.
#[must_use]
pub fn format_publication_markdown(publication: &Publication, index: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("## {}. {}\n\n", index, publication.title_or_default()));

    if !publication.authors.trim().is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", publication.authors));
    }

    let mut meta = Vec::new();
    if publication.year > 0 {
        meta.push(format!("**Year**: {}", publication.year));
    }
    meta.push(format!("**Citations**: {}", publication.citation_count));
    if let Some(source) = publication.source() {
        meta.push(format!("**Venue**: {source}"));
    }
    meta.push(format!("**Score**: {:.3}", publication.score));
    if publication.is_open_access {
        meta.push("**Open Access**".to_string());
    }
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    if !publication.fields.is_empty() {
        output.push_str(&format!("**Fields**: {}\n\n", publication.fields.join(", ")));
    }

    if !publication.tldr.trim().is_empty() {
        output.push_str(&format!("> **TLDR**: {}\n\n", publication.tldr));
    }

    if !publication.r#abstract.trim().is_empty() {
        output.push_str(&format!("**Abstract**: {}\n", preview(&publication.r#abstract)));
    }

    output.push_str(&format!("\n`{}`\n", publication.paper_id));

    output
}

/// Format a full publication record as Markdown.
#[must_use]
pub fn format_detail_markdown(detail: &PublicationDetail) -> String {
    let mut output = format!("# {}\n\n", detail.title_or_default());

    if let Some(authors) = &detail.authors {
        output.push_str(&format!("**Authors**: {authors}\n\n"));
    }

    let mut meta = Vec::new();
    if let Some(date) = &detail.publication_date {
        meta.push(format!("**Published**: {date}"));
    } else if let Some(year) = detail.year {
        meta.push(format!("**Year**: {year}"));
    }
    meta.push(format!("**Citations**: {}", detail.citations()));
    if let Some(influential) = detail.influential_citation_count {
        meta.push(format!("**Influential**: {influential}"));
    }
    if let Some(h_index) = detail.avg_h_index {
        meta.push(format!("**Avg h-index**: {h_index:.1}"));
    }
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    for (label, value) in [("Venue", &detail.venue), ("Journal", &detail.journal)] {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            output.push_str(&format!("**{label}**: {value}\n\n"));
        }
    }

    if let Some(types) = detail.publication_types.as_ref().filter(|t| !t.is_empty()) {
        output.push_str(&format!("**Types**: {}\n\n", types.join(", ")));
    }

    if let Some(fields) = detail.fields.as_ref().filter(|f| !f.is_empty()) {
        output.push_str(&format!("**Fields**: {}\n\n", fields.join(", ")));
    }

    if let Some(pdf_url) = detail.pdf_url() {
        output.push_str(&format!("**PDF**: [Open Access]({pdf_url})\n\n"));
    }

    if let Some(tldr) = &detail.tldr {
        output.push_str(&format!("> **TLDR**: {tldr}\n\n"));
    }

    if let Some(abs) = &detail.r#abstract {
        output.push_str(&format!("**Abstract**: {abs}\n"));
    }

    output
}

/// Format scoring weights as a Markdown table.
#[must_use]
pub fn format_scoring_params_markdown(params: &ScoringParams) -> String {
    let mut output = String::from("| Parameter | Value |\n|---|---|\n");
    for (name, value) in [
        ("bm25parameter", params.bm25_parameter),
        ("lambda", params.lambda),
        ("alpha", params.alpha),
        ("beta", params.beta),
        ("gamma", params.gamma),
    ] {
        output.push_str(&format!("| {name} | {value} |\n"));
    }
    output
}

/// One line listing the committed filter chips.
#[must_use]
pub fn format_active_filters(filters: &ActiveFilters) -> String {
    filters.iter().map(|f| format!("[{}: {}]", f.facet, f.value)).collect::<Vec<_>>().join(" ")
}

fn preview(text: &str) -> Cow<'_, str> {
    if text.chars().count() > ABSTRACT_PREVIEW_CHARS {
        Cow::Owned(format!("{}...", text.chars().take(ABSTRACT_PREVIEW_CHARS).collect::<String>()))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActiveFilter, Facet};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_publications_markdown(&[]), "No publications found.");
    }

    #[test]
    fn test_long_abstract_is_cut_on_char_boundary() {
        let publication = Publication {
            paper_id: "p1".into(),
            r#abstract: "ü".repeat(400),
            ..Default::default()
        };
        let md = format_publication_markdown(&publication, 1);
        assert!(md.contains("..."));
        assert!(md.contains("Untitled"));
    }

    #[test]
    fn test_active_filters_line() {
        let mut filters = ActiveFilters::new();
        filters.insert(ActiveFilter::new(Facet::Author, "Hinton"));
        filters.insert(ActiveFilter::new(Facet::PubType, "Review"));
        assert_eq!(format_active_filters(&filters), "[author: Hinton] [pubType: Review]");
    }
}
