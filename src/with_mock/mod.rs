//! Scenario coordination.
//!
//! [`WithMock::run`] registers every mock as a one-shot interceptor, invokes
//! the scenario, and resolves once the scenario and every mock have
//! succeeded. The first failure from any of them rejects the whole run
//! without waiting for the rest.
//!
//! # Example
//!
//! ```ignore
//! use with_fetch_mock::{FetchMock, HttpClient, Mock, Response, WithMock};
//!
//! let fetch = FetchMock::new();
//! let with_mock = WithMock::new(fetch.clone());
//!
//! let (status, responses) = with_mock
//!     .run(
//!         Mock::func_async(move |_| async move {
//!             let response = fetch.get("/foo").await?;
//!             Ok(response.status)
//!         }),
//!         vec![Response::new(200, "\"foo\"").into()],
//!     )
//!     .await?;
//! ```

mod config;

pub use config::{WithMockConfig, TIMEOUT_ENV_VAR};

use futures::future::{self, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::adapters::FetchMock;
use crate::error::{MockResult, WithMockError};
use crate::mock::{normalize, Mock, NormalizedMock};
use crate::traits::{HttpError, MockRegistry, Request, Response};

/// Runs a scenario against a list of one-shot response mocks.
#[derive(Clone)]
pub struct WithMock {
    registry: Arc<dyn MockRegistry>,
    config: WithMockConfig,
}

impl WithMock {
    /// Build a helper around any mock registry.
    pub fn factory(registry: Arc<dyn MockRegistry>) -> Self {
        Self {
            registry,
            config: WithMockConfig::default(),
        }
    }

    /// Build a helper that registers mocks on `fetch`.
    pub fn new(fetch: FetchMock) -> Self {
        Self::factory(Arc::new(fetch))
    }

    /// The helper bound to [`FetchMock::global`], configured from the
    /// environment.
    pub fn global() -> Self {
        Self::new(FetchMock::global().clone()).with_config(WithMockConfig::from_env())
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: WithMockConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &WithMockConfig {
        &self.config
    }

    /// Register `mocks`, invoke `scenario`, and settle them together.
    ///
    /// Mocks are registered in list order before the scenario is invoked,
    /// and the scenario function is called right away rather than on first
    /// poll. The returned future resolves with the scenario's value and the
    /// mocks' responses in list order.
    pub fn run<T, I>(
        &self,
        scenario: Mock<(), T>,
        mocks: I,
    ) -> impl Future<Output = Result<(T, Vec<Response>), WithMockError>> + Send + 'static
    where
        T: Send + 'static,
        I: IntoIterator<Item = Mock<Request, Response>>,
    {
        let catch_panics = self.config.catch_panics;
        let timeout = self.config.timeout;

        let receivers: Vec<_> = mocks
            .into_iter()
            .map(|mock| normalize(mock, catch_panics))
            .enumerate()
            .map(|(index, mock)| self.setup_mock(index, mock))
            .collect();

        let unsettled = Arc::new(AtomicUsize::new(receivers.len()));
        tracing::debug!("Registered {} mock(s), invoking scenario", receivers.len());

        let mocks_settled = settle_all(receivers, unsettled.clone());
        let scenario_fut = normalize(scenario, catch_panics)(());
        let scenario_settled =
            async move { scenario_fut.await.map_err(WithMockError::Scenario) };
        let combined = future::try_join(scenario_settled, mocks_settled);

        async move {
            let outcome = match timeout {
                Some(limit) => match tokio::time::timeout(limit, combined).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(WithMockError::Timeout {
                        elapsed: limit,
                        pending_mocks: unsettled.load(Ordering::SeqCst),
                    }),
                },
                None => combined.await,
            };

            match &outcome {
                Ok((_, responses)) => {
                    tracing::debug!("Scenario and {} mock(s) settled", responses.len())
                }
                Err(err) => tracing::debug!("Run failed ({}): {}", err.origin(), err),
            }
            outcome
        }
    }

    /// Register one interceptor and hand back the channel its outcome
    /// arrives on.
    ///
    /// The intercepted call sees the same outcome: a copy of the response,
    /// or `MockRejected` carrying the failure's message.
    fn setup_mock(
        &self,
        index: usize,
        mock: NormalizedMock<Request, Response>,
    ) -> oneshot::Receiver<MockResult<Response>> {
        let (tx, rx) = oneshot::channel();

        self.registry.once(Box::new(move |request: Request| {
            async move {
                tracing::debug!("Mock #{} answering {} {}", index, request.method, request.url);
                let result = mock(request).await;
                let reply = match &result {
                    Ok(response) => Ok(response.clone()),
                    Err(err) => Err(HttpError::MockRejected(err.to_string())),
                };
                // The run may already be gone after an earlier failure.
                let _ = tx.send(result);
                reply
            }
            .boxed()
        }));

        rx
    }
}

impl std::fmt::Debug for WithMock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithMock")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Wait for every mock, in whatever order they settle.
///
/// Returns on the first failure; responses are placed back in mock order.
async fn settle_all(
    receivers: Vec<oneshot::Receiver<MockResult<Response>>>,
    unsettled: Arc<AtomicUsize>,
) -> Result<Vec<Response>, WithMockError> {
    let mut responses: Vec<Option<Response>> = vec![None; receivers.len()];
    let mut settlements: FuturesUnordered<_> = receivers
        .into_iter()
        .enumerate()
        .map(|(index, rx)| settle_mock(index, rx, unsettled.clone()))
        .collect();

    while let Some((index, outcome)) = settlements.next().await {
        responses[index] = Some(outcome?);
    }

    Ok(responses.into_iter().flatten().collect())
}

async fn settle_mock(
    index: usize,
    rx: oneshot::Receiver<MockResult<Response>>,
    unsettled: Arc<AtomicUsize>,
) -> (usize, Result<Response, WithMockError>) {
    let outcome = match rx.await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(source)) => Err(WithMockError::Mock { index, source }),
        Err(_) => Err(WithMockError::MockDropped { index }),
    };
    unsettled.fetch_sub(1, Ordering::SeqCst);
    tracing::trace!("Mock #{} settled (ok: {})", index, outcome.is_ok());
    (index, outcome)
}

/// Run `scenario` against `mocks` using [`WithMock::global`].
///
/// Scenarios reach the mocks through [`FetchMock::global`].
pub fn with_fetch_mock<T, I>(
    scenario: Mock<(), T>,
    mocks: I,
) -> impl Future<Output = Result<(T, Vec<Response>), WithMockError>> + Send + 'static
where
    T: Send + 'static,
    I: IntoIterator<Item = Mock<Request, Response>>,
{
    WithMock::global().run(scenario, mocks)
}
