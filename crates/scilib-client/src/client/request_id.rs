//! Per-request correlation header.

use reqwest_middleware::{RequestBuilder, RequestInitialiser};

/// Header carrying the correlation token.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Length of a generated token.
pub const REQUEST_ID_LEN: usize = 16;

/// Generate a fresh token: 16 lowercase hex characters.
#[must_use]
pub fn generate() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(REQUEST_ID_LEN);
    id
}

/// Attaches a freshly generated `X-Request-Id` to every outgoing request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdInitialiser;

impl RequestInitialiser for RequestIdInitialiser {
    fn init(&self, req: RequestBuilder) -> RequestBuilder {
        let id = generate();
        tracing::trace!(request_id = %id, "attaching request id");
        req.header(REQUEST_ID_HEADER, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_lowercase_hex() {
        for _ in 0..100 {
            let id = generate();
            assert_eq!(id.len(), REQUEST_ID_LEN);
            assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')), "bad id {id}");
        }
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(generate(), generate());
    }
}
