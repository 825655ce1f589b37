//! In-memory fetch mock.
//!
//! [`FetchMock`] is both the fetch primitive a scenario calls and the
//! registry that one-shot interceptors are pushed into. Every call consumes
//! the oldest pending interceptor.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{HttpClient, HttpError, Interceptor, MockRegistry, Request, Response};

static GLOBAL: Lazy<FetchMock> = Lazy::new(FetchMock::new);

/// Mock fetch backend with a FIFO queue of one-shot interceptors.
///
/// Clones share the same queue and call log, so a scenario can hold one
/// clone while the coordinating helper registers mocks through another.
///
/// # Example
///
/// ```ignore
/// use with_fetch_mock::adapters::FetchMock;
/// use with_fetch_mock::traits::{HttpClient, MockRegistry, Response};
///
/// let fetch = FetchMock::new();
/// fetch.once(Box::new(|_request| async { Ok(Response::new(200, "foo")) }.boxed()));
///
/// let response = fetch.get("/foo").await?;
/// assert_eq!(response.status, 200);
/// assert!(fetch.done());
/// ```
#[derive(Clone, Default)]
pub struct FetchMock {
    /// Interceptors waiting for a call, oldest first
    pending: Arc<Mutex<VecDeque<Interceptor>>>,
    /// Every request seen, in call order
    calls: Arc<Mutex<Vec<Request>>>,
    /// Client used when no interceptor is pending
    fallback: Option<Arc<dyn HttpClient>>,
}

impl FetchMock {
    /// Create an empty fetch mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide instance used by [`with_fetch_mock`](crate::with_fetch_mock).
    pub fn global() -> &'static FetchMock {
        &GLOBAL
    }

    /// Pass calls through to `client` when no interceptor is pending.
    pub fn with_fallback(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.fallback = Some(client);
        self
    }

    /// All requests received so far.
    pub fn calls(&self) -> Vec<Request> {
        lock(&self.calls).clone()
    }

    /// Number of interceptors not yet consumed.
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    /// True when every registered interceptor has been consumed.
    pub fn done(&self) -> bool {
        self.pending() == 0
    }

    /// Drop pending interceptors and forget recorded calls.
    pub fn reset(&self) {
        lock(&self.pending).clear();
        lock(&self.calls).clear();
    }

    fn next_interceptor(&self, request: &Request) -> Option<Interceptor> {
        lock(&self.calls).push(request.clone());
        lock(&self.pending).pop_front()
    }
}

impl fmt::Debug for FetchMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchMock")
            .field("pending", &self.pending())
            .field("calls", &lock(&self.calls).len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

// A panicking interceptor must not wedge every later test on the global mock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockRegistry for FetchMock {
    fn once(&self, interceptor: Interceptor) {
        let mut pending = lock(&self.pending);
        pending.push_back(interceptor);
        tracing::trace!("Registered one-shot interceptor ({} pending)", pending.len());
    }
}

#[async_trait]
impl HttpClient for FetchMock {
    async fn fetch(&self, request: Request) -> Result<Response, HttpError> {
        match self.next_interceptor(&request) {
            Some(interceptor) => {
                tracing::debug!("Intercepted {} {}", request.method, request.url);
                interceptor(request).await
            }
            None => match &self.fallback {
                Some(client) => {
                    tracing::debug!(
                        "No interceptor for {} {}, using fallback",
                        request.method,
                        request.url
                    );
                    client.fetch(request).await
                }
                None => {
                    tracing::warn!("Unmatched fetch: {} {}", request.method, request.url);
                    Err(HttpError::Unmatched {
                        method: request.method,
                        url: request.url,
                    })
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn reply_with(status: u16, body: &'static str) -> Interceptor {
        Box::new(move |_request: Request| {
            async move { Ok::<_, HttpError>(Response::new(status, body)) }.boxed()
        })
    }

    #[test]
    fn test_fetch_mock_new() {
        let fetch = FetchMock::new();
        assert!(fetch.calls().is_empty());
        assert!(fetch.done());
    }

    #[tokio::test]
    async fn test_interceptors_are_consumed_in_order() {
        let fetch = FetchMock::new();
        fetch.once(reply_with(200, "first"));
        fetch.once(reply_with(201, "second"));
        assert_eq!(fetch.pending(), 2);

        let first = fetch.get("/a").await.unwrap();
        let second = fetch.get("/b").await.unwrap();

        assert_eq!(first.text().unwrap(), "first");
        assert_eq!(second.status, 201);
        assert!(fetch.done());
    }

    #[tokio::test]
    async fn test_interceptor_receives_request() {
        let fetch = FetchMock::new();
        fetch.once(Box::new(|request: Request| {
            async move { Ok::<_, HttpError>(Response::new(200, request.body.unwrap_or_default())) }
                .boxed()
        }));

        let response = fetch.post("/echo", "ping").await.unwrap();
        assert_eq!(response.text().unwrap(), "ping");
    }

    #[tokio::test]
    async fn test_interceptor_used_only_once() {
        let fetch = FetchMock::new();
        fetch.once(reply_with(200, "only"));

        assert!(fetch.get("/foo").await.is_ok());
        let result = fetch.get("/foo").await;

        assert_eq!(
            result,
            Err(HttpError::Unmatched {
                method: "GET".to_string(),
                url: "/foo".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let fetch = FetchMock::new();
        let _ = fetch.get("/unmatched").await;
        fetch.once(reply_with(200, ""));
        let _ = fetch.post("/matched", "{}").await;

        let calls = fetch.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].url, "/unmatched");
        assert_eq!(calls[1].method, "POST");
        assert_eq!(calls[1].body, Some("{}".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_used_when_queue_empty() {
        let fallback = FetchMock::new();
        fallback.once(reply_with(202, "from fallback"));

        let fetch = FetchMock::new().with_fallback(Arc::new(fallback.clone()));
        let response = fetch.get("/anything").await.unwrap();

        assert_eq!(response.status, 202);
        assert_eq!(fetch.calls().len(), 1);
        assert_eq!(fallback.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_reset() {
        let fetch = FetchMock::new();
        fetch.once(reply_with(200, ""));
        let _ = fetch.get("/x").await;
        fetch.once(reply_with(200, ""));

        fetch.reset();

        assert!(fetch.done());
        assert!(fetch.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let fetch = FetchMock::new();
        let cloned = fetch.clone();
        fetch.once(reply_with(200, "shared"));

        let response = cloned.get("/shared").await.unwrap();

        assert_eq!(response.text().unwrap(), "shared");
        assert!(fetch.done());
        assert_eq!(fetch.calls().len(), 1);
    }

    #[test]
    fn test_debug_reports_counts() {
        let fetch = FetchMock::new();
        fetch.once(reply_with(200, ""));
        let debug = format!("{:?}", fetch);
        assert!(debug.contains("pending: 1"));
        assert!(debug.contains("fallback: false"));
    }
}
