//! Last-request-wins delivery for overlapping searches.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one request issued by a [`SearchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Tracks the most recent request so that results of superseded requests
/// are discarded instead of delivered.
///
/// Superseded work is not aborted; its outcome is simply dropped when it
/// completes.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token, superseding every earlier one.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Returns `value` only if `token` is still the latest request.
    pub fn finish<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            tracing::debug!(token = token.0, "discarding result of superseded request");
            None
        }
    }

    /// Issues a token now and runs `work`, yielding its output only if no
    /// newer request began in the meantime.
    pub fn run<'a, F>(&'a self, work: F) -> impl Future<Output = Option<F::Output>> + 'a
    where
        F: Future + 'a,
    {
        let token = self.begin();
        async move {
            let value = work.await;
            self.finish(token, value)
        }
    }
}
