//! Error types for the publication search client.
//!
//! The transport layer folds every failure into the closed [`NetworkError`] set.
//! Callers branch on [`ClientResult`] and never see transport faults directly.

/// Failure classes surfaced by the HTTP transport.
///
/// The set is fixed; failures that match no specific class become [`NetworkError::Unknown`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    RequestTimeout,

    /// HTTP 403.
    #[error("Access denied. Please sign in again")]
    Forbidden,

    /// HTTP 400.
    #[error("Invalid input")]
    BadRequest,

    /// HTTP 409.
    #[error("Unresolvable conflict")]
    Conflict,

    /// Not produced by the classifier.
    #[error("Too many requests to the server")]
    TooManyRequests,

    /// The server address could not be reached.
    #[error("No internet connection")]
    NoInternet,

    /// Not produced by the classifier.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// HTTP 5xx.
    #[error("Internal server error")]
    ServerError,

    /// The response body could not be decoded.
    #[error("Failed to process server data")]
    Serialization,

    /// The request was superseded or dropped. Silent.
    #[error("")]
    Cancellation,

    /// Anything else.
    #[error("Unknown error")]
    Unknown,
}

impl NetworkError {
    /// Classify a non-success HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            409 => Self::Conflict,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Human-readable message for inline display.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if this error should not be shown to the user.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::Cancellation)
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::RequestTimeout
        } else if err.is_connect() && is_unresolved_address(&err) {
            Self::NoInternet
        } else if err.is_decode() {
            Self::Serialization
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16())
        } else {
            Self::Unknown
        }
    }
}

/// True when a connect failure came from host name resolution.
///
/// Refused or reset connections reach the host and stay [`NetworkError::Unknown`].
fn is_unresolved_address(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
            ) {
                return false;
            }
        }
        let text = cause.to_string();
        if text.contains("dns error") || text.contains("lookup address") {
            return true;
        }
        source = cause.source();
    }
    false
}

impl From<reqwest_middleware::Error> for NetworkError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            reqwest_middleware::Error::Middleware(_) => Self::Unknown,
        }
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(_: serde_json::Error) -> Self {
        Self::Serialization
    }
}

/// Result type alias for network operations.
pub type ClientResult<T> = Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(NetworkError::from_status(400), NetworkError::BadRequest);
        assert_eq!(NetworkError::from_status(403), NetworkError::Forbidden);
        assert_eq!(NetworkError::from_status(409), NetworkError::Conflict);
        assert_eq!(NetworkError::from_status(500), NetworkError::ServerError);
        assert_eq!(NetworkError::from_status(503), NetworkError::ServerError);
        assert_eq!(NetworkError::from_status(599), NetworkError::ServerError);

        assert_eq!(NetworkError::from_status(404), NetworkError::Unknown);
        assert_eq!(NetworkError::from_status(429), NetworkError::Unknown);
        assert_eq!(NetworkError::from_status(413), NetworkError::Unknown);
        assert_eq!(NetworkError::from_status(302), NetworkError::Unknown);
    }

    #[test]
    fn test_cancellation_is_silent() {
        assert!(NetworkError::Cancellation.is_silent());
        assert!(NetworkError::Cancellation.message().is_empty());
        assert!(!NetworkError::ServerError.is_silent());
    }

    #[test]
    fn test_every_visible_error_has_a_message() {
        let all = [
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
        ];
        for err in all {
            assert!(!err.message().is_empty(), "{err:?} has no message");
        }
    }

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        cause: Option<Box<dyn std::error::Error + 'static>>,
    }

    impl Layer {
        fn over(message: &'static str, cause: impl std::error::Error + 'static) -> Self {
            Self { message, cause: Some(Box::new(cause)) }
        }
    }

    impl std::fmt::Display for Layer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.cause.as_deref()
        }
    }

    #[test]
    fn test_resolve_failure_is_unresolved_address() {
        let lookup = std::io::Error::other("failed to lookup address information");
        let err = Layer::over("client error (Connect)", Layer::over("dns error", lookup));
        assert!(is_unresolved_address(&err));
    }

    #[test]
    fn test_refused_connection_is_not_unresolved_address() {
        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        let err = Layer::over("client error (Connect)", Layer::over("tcp connect error", refused));
        assert!(!is_unresolved_address(&err));

        let bare = Layer { message: "client error (Connect)", cause: None };
        assert!(!is_unresolved_address(&bare));
    }

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err = serde_json::from_str::<Vec<String>>("{ nope").unwrap_err();
        assert_eq!(NetworkError::from(err), NetworkError::Serialization);
    }
}
