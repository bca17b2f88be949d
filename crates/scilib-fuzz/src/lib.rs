//! Checks driven by the `scilib-client` fuzz targets.
//!
//! Decoding arbitrary bytes may fail but must never panic. Anything that does
//! decode is run through the accessors the CLI calls when printing it.
//!
//! ```bash
//! cd crates/scilib-fuzz
//! cargo +nightly fuzz run search_page -- -max_total_time=60
//! ```

use scilib_client::client::encode_query;
use scilib_client::models::{Publication, PublicationDetail, ScoringParams};

/// Which wire models accepted a JSON document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodedModels {
    pub publication: bool,
    pub detail: bool,
    pub scoring_params: bool,
}

/// Decode a `/search` body, which is a publication array or `null`.
///
/// Returns the number of publications, or `None` when the body is rejected.
pub fn decode_search_page(data: &[u8]) -> Option<usize> {
    let page = serde_json::from_slice::<Option<Vec<Publication>>>(data).ok()?;
    let items = page.unwrap_or_default();
    for item in &items {
        let _ = item.title_or_default();
        let _ = item.source();
    }
    Some(items.len())
}

/// Try one JSON document against every wire model.
pub fn decode_wire_models(data: &[u8]) -> DecodedModels {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return DecodedModels::default();
    };

    let detail = serde_json::from_value::<PublicationDetail>(value.clone()).ok();
    if let Some(detail) = &detail {
        let _ = detail.pdf_url();
        let _ = detail.title_or_default();
    }

    DecodedModels {
        publication: serde_json::from_value::<Publication>(value.clone()).is_ok(),
        detail: detail.is_some(),
        scoring_params: serde_json::from_value::<ScoringParams>(value).is_ok(),
    }
}

/// Encode `text` as the `query` parameter and return the encoded pair.
///
/// # Panics
///
/// When the output is not plain ASCII, carries a raw space or `+`, or does not
/// turn every space into exactly one `%20`.
pub fn check_query_encoding(text: &str) -> String {
    let encoded = encode_query(&[("query", text.to_string())]);
    assert!(encoded.is_ascii(), "non-ASCII output: {encoded}");
    assert!(!encoded.contains(' ') && !encoded.contains('+'), "space leaked: {encoded}");
    assert_eq!(encoded.matches("%20").count(), text.matches(' ').count(), "{encoded}");
    encoded
}
