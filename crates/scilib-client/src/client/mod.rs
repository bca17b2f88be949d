//! HTTP transport for the search API.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - A correlation token on every request (`X-Request-Id`)
//! - Request and connect timeouts
//! - Classification of every failure into [`NetworkError`]

pub mod request_id;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientResult, NetworkError};

pub use request_id::{REQUEST_ID_HEADER, RequestIdInitialiser};

/// HTTP client bound to one search backend.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Backend base URL.
    base_url: Url,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("base URL '{}' cannot carry a path", config.base_url);
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let client = ClientBuilder::new(client).with_init(RequestIdInitialiser).build();

        Ok(Self { client, base_url })
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` with query `params` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NetworkError`] on any failure.
    pub async fn get<T>(&self, path: &[&str], params: &[(&str, String)]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path, params)?;
        tracing::debug!(method = "GET", %url, "sending request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| log_failure(&url, e))?;
        let response = handle_response(&url, response)?;
        let body = response.bytes().await.map_err(|e| log_failure(&url, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(%url, error = %e, "failed to decode response body");
            NetworkError::Serialization
        })
    }

    /// POST `body` as JSON to `path`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NetworkError`] on any failure.
    pub async fn post<B>(&self, path: &[&str], body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[])?;
        tracing::debug!(method = "POST", %url, "sending request");

        let body_str = serde_json::to_string(body)?;

        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_str)
            .send()
            .await
            .map_err(|e| log_failure(&url, e))?;

        handle_response(&url, response)?;
        Ok(())
    }

    /// Build the URL for `path` below the base URL.
    fn url(&self, path: &[&str], params: &[(&str, String)]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut().map_err(|()| NetworkError::Unknown)?.pop_if_empty().extend(path);

        if !params.is_empty() {
            url.set_query(Some(&encode_query(params)));
        }

        Ok(url)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url.as_str()).finish()
    }
}

/// Encode query parameters with spaces as `%20` rather than `+`.
#[must_use]
pub fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(value: &str) -> String {
    // byte_serialize emits '+' only for spaces; a literal plus becomes %2B
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Map non-2xx status codes to errors.
fn handle_response(url: &Url, response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let err = NetworkError::from_status(status.as_u16());
    tracing::warn!(%url, status = status.as_u16(), error = ?err, "request rejected");
    Err(err)
}

fn log_failure(url: &Url, err: impl Into<NetworkError> + std::fmt::Display) -> NetworkError {
    tracing::warn!(%url, error = %err, "request failed");
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_uses_percent_twenty() {
        let encoded = encode_query(&[("query", "deep learning".to_string())]);
        assert_eq!(encoded, "query=deep%20learning");
    }

    #[test]
    fn test_encode_query_escapes_reserved() {
        let encoded = encode_query(&[
            ("author", "A&B".to_string()),
            ("venue", "C+D,E".to_string()),
        ]);
        assert_eq!(encoded, "author=A%26B&venue=C%2BD%2CE");
    }

    #[test]
    fn test_url_joins_segments() {
        let client = ApiClient::new(Config::for_testing("http://localhost:8080")).unwrap();
        let url = client.url(&["publication", "abc/def"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/publication/abc%2Fdef");

        let url = client.url(&["params", "update"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/params/update");
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let client = ApiClient::new(Config::for_testing("http://localhost:8080/api")).unwrap();
        let url = client.url(&["search"], &[("page", "1".to_string())]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/search?page=1");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ApiClient::new(Config::for_testing("not a url")).is_err());
        assert!(ApiClient::new(Config::for_testing("mailto:someone@example.com")).is_err());
    }
}
