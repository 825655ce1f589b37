//! Run configuration.

use std::time::Duration;

/// Environment variable holding a run timeout in milliseconds.
pub const TIMEOUT_ENV_VAR: &str = "WITH_FETCH_MOCK_TIMEOUT_MS";

/// Configuration for a [`WithMock`](super::WithMock) helper.
///
/// Use the builder pattern to customize behavior.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use with_fetch_mock::WithMockConfig;
///
/// let config = WithMockConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_catch_panics(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithMockConfig {
    /// Fail the run if it has not settled after this long (default: wait forever)
    pub timeout: Option<Duration>,
    /// Turn panics in the scenario or mocks into errors (default: true)
    pub catch_panics: bool,
}

impl Default for WithMockConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            catch_panics: true,
        }
    }
}

impl WithMockConfig {
    /// Create a new WithMockConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the run timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set whether panics are caught.
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    /// Create config from the environment.
    ///
    /// `WITH_FETCH_MOCK_TIMEOUT_MS` sets the timeout; unparsable or zero
    /// values are ignored.
    pub fn from_env() -> Self {
        let timeout = std::env::var(TIMEOUT_ENV_VAR)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        match timeout {
            Some(timeout) => Self::default().with_timeout(timeout),
            None => {
                tracing::trace!("{} not set, runs wait indefinitely", TIMEOUT_ENV_VAR);
                Self::default()
            }
        }
    }
}
