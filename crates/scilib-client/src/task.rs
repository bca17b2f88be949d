//! Cancel-and-replace handling for background requests.
//!
//! Each interaction stream (search paging, one suggestion facet, scoring, detail)
//! owns a [`TaskSlot`]. Starting a new task in a slot cancels the previous one, so
//! only the most recently issued task of a stream can apply its result.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::error::{ClientResult, NetworkError};

/// Holds the cancellation token of the latest task in one interaction stream.
#[derive(Debug)]
pub struct TaskSlot {
    name: &'static str,
    current: Mutex<Option<CancellationToken>>,
}

impl TaskSlot {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, current: Mutex::new(None) }
    }

    /// Cancel the running task, if any, and return a token for its successor.
    pub fn replace(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock().replace(token.clone()) {
            if !previous.is_cancelled() {
                tracing::debug!(slot = self.name, "superseding in-flight task");
            }
            previous.cancel();
        }
        token
    }

    /// Cancel the running task, if any, without starting another.
    pub fn cancel(&self) {
        if let Some(previous) = self.lock().take() {
            previous.cancel();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Race `fut` against `token`; a cancelled token yields [`NetworkError::Cancellation`].
pub async fn run_cancellable<T, F>(token: &CancellationToken, fut: F) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(NetworkError::Cancellation),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_cancels_previous() {
        let slot = TaskSlot::new("test");
        let first = slot.replace();
        let second = slot.replace();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn test_cancel_clears_slot() {
        let slot = TaskSlot::new("test");
        let token = slot.replace();
        slot.cancel();
        assert!(token.is_cancelled());
        // nothing left to cancel
        slot.cancel();
    }

    #[tokio::test]
    async fn test_run_cancellable_returns_result() {
        let token = CancellationToken::new();
        let result = run_cancellable(&token, async { Ok::<_, NetworkError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_run_cancellable_reports_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let result: ClientResult<()> = run_cancellable(&token, std::future::pending()).await;
        assert_eq!(result, Err(NetworkError::Cancellation));
    }
}
