//! # Request Context
//!
//! Caller-supplied deadline and cancellation for operator-facing store calls.
//! When either fires first, the pending store future is dropped and the
//! caller gets an error; nothing past that point is applied.

use crate::store::StoreError;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

/// Deadline / cancellation scope for one operator request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    /// Correlation id carried into logs.
    request_id: Uuid,
    /// Per-call deadline.
    timeout: Option<Duration>,
    /// Cancellation signal; `true` means cancelled.
    cancel: Option<watch::Receiver<bool>>,
}

impl RequestContext {
    /// No deadline, no cancellation.
    #[must_use]
    pub fn background() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timeout: None,
            cancel: None,
        }
    }

    /// Bound every store call made through this context by `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::background()
        }
    }

    /// Attach a cancellation signal.
    #[must_use]
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Correlation id of this request.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Configured deadline, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the cancellation signal has already fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Run a store call under this context.
    ///
    /// A context that is already cancelled never polls `call`.
    pub async fn run<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let timeout = self.timeout;
        let work = async move {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .map_err(|_| StoreError::DeadlineExceeded(limit))?,
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled(self.cancel.clone()) => Err(StoreError::Cancelled),
            result = work => result,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

/// Resolves once the signal reads `true`. A dropped sender never cancels.
async fn cancelled(signal: Option<watch::Receiver<bool>>) {
    let Some(mut rx) = signal else {
        return std::future::pending().await;
    };
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return std::future::pending().await;
        }
    }
}
