//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use scilib_client::client::encode_query;
use scilib_client::config::api;
use scilib_client::{ApiClient, Config, NetworkError};

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_points_at_compiled_backend() {
    let config = Config::default();
    assert_eq!(config.base_url, api::BASE_URL);
    assert_eq!(config.page_size, api::PAGE_SIZE);
}

#[test]
fn test_config_page_size_override() {
    let config = Config::new("http://localhost:8080").with_page_size(25);
    assert_eq!(config.page_size, 25);
    assert_eq!(config.base_url, "http://localhost:8080");
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_client_creation_succeeds() {
    let client = ApiClient::new(Config::default());
    assert!(client.is_ok());
}

#[test]
fn test_client_rejects_garbage_url() {
    assert!(ApiClient::new(Config::new("not a url")).is_err());
    assert!(ApiClient::new(Config::new("mailto:someone@example.org")).is_err());
}

#[test]
fn test_client_keeps_base_path() {
    let client = ApiClient::new(Config::new("http://localhost:8080/api/")).unwrap();
    assert_eq!(client.base_url().path(), "/api/");
}

#[test]
fn test_query_encoding_uses_percent_twenty() {
    let encoded = encode_query(&[("query", "machine learning".into()), ("author", "O'Neil,Smith".into())]);
    assert_eq!(encoded, "query=machine%20learning&author=O%27Neil%2CSmith");
}

// =============================================================================
// Error Classification Tests
// =============================================================================

#[test]
fn test_only_cancellation_is_silent() {
    for err in [
        NetworkError::RequestTimeout,
        NetworkError::Forbidden,
        NetworkError::BadRequest,
        NetworkError::Conflict,
        NetworkError::TooManyRequests,
        NetworkError::NoInternet,
        NetworkError::PayloadTooLarge,
        NetworkError::ServerError,
        NetworkError::Serialization,
        NetworkError::Unknown,
    ] {
        assert!(!err.is_silent(), "{err:?}");
        assert!(!err.message().is_empty(), "{err:?}");
    }
    assert!(NetworkError::Cancellation.is_silent());
}

#[test]
fn test_status_classification() {
    assert_eq!(NetworkError::from_status(400), NetworkError::BadRequest);
    assert_eq!(NetworkError::from_status(403), NetworkError::Forbidden);
    assert_eq!(NetworkError::from_status(409), NetworkError::Conflict);
    assert_eq!(NetworkError::from_status(502), NetworkError::ServerError);
    assert_eq!(NetworkError::from_status(401), NetworkError::Unknown);
    assert_eq!(NetworkError::from_status(429), NetworkError::Unknown);
}
