//! Property-based tests for the query builder and filter models.

use proptest::prelude::*;

use scilib_client::client::encode_query;
use scilib_client::models::{ActiveFilter, ActiveFilters, Facet, ScoringParams, ScoringParamsDraft};
use scilib_client::service::SearchQuery;

fn arb_facet() -> impl Strategy<Value = Facet> {
    prop::sample::select(Facet::ALL.to_vec())
}

fn arb_values() -> impl Strategy<Value = Option<Vec<String>>> {
    proptest::option::of(prop::collection::vec("[A-Za-z ]{1,12}", 0..4))
}

fn arb_params() -> impl Strategy<Value = ScoringParams> {
    (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0).prop_map(
        |(bm25_parameter, lambda, alpha, beta, gamma)| ScoringParams {
            bm25_parameter,
            lambda,
            alpha,
            beta,
            gamma,
        },
    )
}

proptest! {
    /// Paging parameters always lead and appear exactly once.
    #[test]
    fn paging_params_always_present(
        query in ".{0,40}",
        page in 1u32..1000,
        page_size in 1u32..100,
        authors in arb_values(),
        venues in arb_values(),
    ) {
        let search = SearchQuery { authors, venues, ..SearchQuery::new(query.clone(), page, page_size) };
        let params = search.to_params();

        prop_assert_eq!(params[0].0, "query");
        prop_assert_eq!(&params[0].1, query.trim());
        prop_assert_eq!(&params[1], &("page", page.to_string()));
        prop_assert_eq!(&params[2], &("pageSize", page_size.to_string()));
        for key in ["query", "page", "pageSize", "author", "venue"] {
            prop_assert!(params.iter().filter(|(k, _)| *k == key).count() <= 1);
        }
    }

    /// Empty lists are never sent; non-empty lists are comma-joined in order.
    #[test]
    fn lists_are_joined_or_omitted(authors in arb_values()) {
        let search = SearchQuery { authors: authors.clone(), ..SearchQuery::new("q", 1, 10) };
        let sent = search.to_params().into_iter().find(|(k, _)| *k == "author").map(|(_, v)| v);

        match authors.filter(|a| !a.is_empty()) {
            Some(values) => prop_assert_eq!(sent, Some(values.join(","))),
            None => prop_assert_eq!(sent, None),
        }
    }

    /// Encoded query strings never contain raw spaces or plus signs for spaces.
    #[test]
    fn encoded_query_has_no_raw_spaces(text in "[a-z ]{0,30}") {
        let encoded = encode_query(&[("query", text.clone())]);
        prop_assert!(!encoded.contains(' '));
        prop_assert!(!encoded.contains('+'));
        prop_assert_eq!(encoded.matches("%20").count(), text.matches(' ').count());
    }

    /// A draft seeded from params resolves back to the same params.
    #[test]
    fn untouched_draft_resolves_to_previous(params in arb_params()) {
        let draft = ScoringParamsDraft::from(&params);
        prop_assert_eq!(draft.resolve(&params), params);
    }

    /// Unparsable text always falls back to the previous value.
    #[test]
    fn garbage_draft_keeps_previous(params in arb_params(), junk in "[a-z]{1,8}") {
        let draft = ScoringParamsDraft {
            bm25_parameter: junk.clone(),
            lambda: junk.clone(),
            alpha: junk.clone(),
            beta: junk.clone(),
            gamma: junk,
        };
        prop_assert_eq!(draft.resolve(&params), params);
    }

    /// Inserting the same chip any number of times keeps one copy.
    #[test]
    fn chip_insert_is_idempotent(facet in arb_facet(), value in "[A-Za-z]{1,10}", times in 1usize..5) {
        let mut filters = ActiveFilters::new();
        for _ in 0..times {
            filters.insert(ActiveFilter::new(facet, value.clone()));
        }
        prop_assert_eq!(filters.len(), 1);
        prop_assert_eq!(filters.values(facet), vec![value]);
    }

    /// A chip for a facet always shadows that facet's free text.
    #[test]
    fn chips_shadow_free_text(facet in arb_facet(), chip in "[A-Z][a-z]{1,8}", text in ".{0,20}") {
        let mut filters = ActiveFilters::new();
        filters.insert(ActiveFilter::new(facet, chip.clone()));
        prop_assert_eq!(filters.resolve(facet, &text), Some(vec![chip]));
    }
}
