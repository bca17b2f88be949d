//! Observable view state plus a one-shot effect queue.
//!
//! State lives in a `watch` channel: every mutation goes through the sender, which
//! serialises updates, and subscribers always see the latest value. Effects go
//! through an unbounded `mpsc` channel and are delivered at most once.

use std::sync::{Mutex, PoisonError};

use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

/// State container shared by a view model and its background tasks.
#[derive(Debug)]
pub struct StateHolder<S, E> {
    state: watch::Sender<S>,
    effects: mpsc::UnboundedSender<E>,
    effect_rx: Mutex<Option<mpsc::UnboundedReceiver<E>>>,
}

impl<S, E> StateHolder<S, E>
where
    S: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        let (effects, effect_rx) = mpsc::unbounded_channel();
        Self { state, effects, effect_rx: Mutex::new(Some(effect_rx)) }
    }

    /// Mutate the state and notify subscribers.
    pub fn update(&self, modify: impl FnOnce(&mut S)) {
        self.state.send_modify(modify);
    }

    /// Mutate the state only if `modify` returns true; subscribers are notified only then.
    pub fn update_if(&self, modify: impl FnOnce(&mut S) -> bool) -> bool {
        self.state.send_if_modified(modify)
    }

    /// Apply a task's result unless `token` has been cancelled.
    ///
    /// The check runs under the state lock, so a superseded task can never
    /// overwrite state written by its successor.
    pub fn update_if_current(&self, token: &CancellationToken, modify: impl FnOnce(&mut S)) -> bool {
        self.state.send_if_modified(|state| {
            if token.is_cancelled() {
                return false;
            }
            modify(state);
            true
        })
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    /// State changes as a stream, starting with the current value.
    #[must_use]
    pub fn stream(&self) -> WatchStream<S> {
        WatchStream::new(self.state.subscribe())
    }

    /// Queue a one-shot effect.
    pub fn emit(&self, effect: E) {
        // Ignore if the receiver was dropped
        let _ = self.effects.send(effect);
    }

    /// Take the effect receiver. Only the first call returns `Some`.
    pub fn take_effects(&self) -> Option<mpsc::UnboundedReceiver<E>> {
        self.effect_rx.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
