//! Configuration for the publication search client.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Default search backend.
    pub const BASE_URL: &str = "http://192.168.1.72:8080";

    /// Environment variable that overrides [`BASE_URL`].
    pub const BASE_URL_ENV: &str = "SCILIB_BASE_URL";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Results per search page.
    pub const PAGE_SIZE: u32 = 10;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// REST endpoint path segments, relative to the base URL.
pub mod endpoints {
    /// Paged, faceted search.
    pub const SEARCH: &str = "search";

    /// Current scoring parameters.
    pub const PARAMS: &str = "params";

    /// Sub-path of [`PARAMS`] taking a full replacement.
    pub const UPDATE: &str = "update";

    /// Facet autocomplete.
    pub const SUGGEST: &str = "suggest";

    /// Single publication; the paper id follows as its own segment.
    pub const PUBLICATION: &str = "publication";
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the search backend (scheme, host and port).
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Results requested per page.
    pub page_size: u32,
}

impl Config {
    /// Create a configuration pointing at `base_url` with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            page_size: api::PAGE_SIZE,
        }
    }

    /// Create a test configuration for a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            page_size: api::PAGE_SIZE,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Falls back to the compiled-in backend when `SCILIB_BASE_URL` is unset.
    ///
    /// # Errors
    ///
    /// Returns error if the configured base URL is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var(api::BASE_URL_ENV).unwrap_or_else(|_| api::BASE_URL.to_string());
        url::Url::parse(&base_url)?;
        Ok(Self::new(base_url))
    }

    /// Override the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, api::BASE_URL);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_for_testing_uses_short_timeouts() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert!(config.request_timeout < api::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_with_page_size() {
        let config = Config::default().with_page_size(25);
        assert_eq!(config.page_size, 25);
    }
}
