//! Compute-once memo shared by concurrent callers.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use tokio::sync::Mutex;

use crate::error::Error;

/// In-flight initialization shared by every waiting caller.
type SharedInit<V> = Shared<BoxFuture<'static, Result<V, Arc<Error>>>>;

/// Memo state.
enum State<V> {
    /// No value and nothing in flight.
    Empty,
    /// An initialization is running.
    Pending(SharedInit<V>),
    /// Initialized.
    Ready(V),
}

/// Runs an async initializer at most once at a time and keeps its value.
///
/// Concurrent first callers share one in-flight future and all observe the
/// same value or the same error. A failure resets the memo so the next
/// call starts a new initialization.
pub struct SingleFlight<V> {
    state: Mutex<State<V>>,
}

impl<V> fmt::Debug for SingleFlight<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state.try_lock() {
            Ok(guard) => match *guard {
                State::Empty => "empty",
                State::Pending(_) => "pending",
                State::Ready(_) => "ready",
            },
            Err(_) => "locked",
        };
        f.debug_struct("SingleFlight").field("state", &state).finish()
    }
}

impl<V> Default for SingleFlight<V> {
    fn default() -> Self {
        Self {
            state: Mutex::new(State::Empty),
        }
    }
}

impl<V> SingleFlight<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized value, joining or starting the initialization.
    ///
    /// `init` is only called when nothing is memoized and nothing is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns the error of the initialization this call joined. Every
    /// caller that joined it receives a clone of the same `Arc`.
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<V, Arc<Error>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>> + Send + 'static,
    {
        let shared = {
            let mut state = self.state.lock().await;
            match &*state {
                State::Ready(value) => return Ok(value.clone()),
                State::Pending(shared) => shared.clone(),
                State::Empty => {
                    let shared = init().map_err(Arc::new).boxed().shared();
                    *state = State::Pending(shared.clone());
                    shared
                }
            }
        };

        let result = shared.clone().await;

        let mut state = self.state.lock().await;
        if let State::Pending(current) = &*state
            && current.ptr_eq(&shared)
        {
            *state = match &result {
                Ok(value) => State::Ready(value.clone()),
                Err(_) => State::Empty,
            };
        }
        result
    }

    /// Returns the memoized value without initializing.
    pub async fn get(&self) -> Option<V> {
        match &*self.state.lock().await {
            State::Ready(value) => Some(value.clone()),
            State::Empty | State::Pending(_) => None,
        }
    }
}
