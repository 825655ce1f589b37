//! The error a scenario run rejects with.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::BoxError;

/// Which participant of a run a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The scenario function.
    Scenario,
    /// The mock at this position in the mock list.
    Mock(usize),
    /// The run as a whole (e.g. a timeout).
    Run,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Scenario => write!(f, "scenario"),
            Origin::Mock(index) => write!(f, "mock #{}", index),
            Origin::Run => write!(f, "run"),
        }
    }
}

/// First failure observed while settling a scenario and its mocks.
#[derive(Debug, Error)]
pub enum WithMockError {
    /// The scenario returned an error, panicked, or its future failed.
    #[error("scenario failed: {0}")]
    Scenario(#[source] BoxError),

    /// A mock returned an error, panicked, or its future failed.
    #[error("mock #{index} failed: {source}")]
    Mock {
        index: usize,
        #[source]
        source: BoxError,
    },

    /// A registered interceptor was discarded before it settled.
    #[error("mock #{index} was dropped before it settled")]
    MockDropped { index: usize },

    /// The configured run timeout elapsed.
    #[error("run timed out after {elapsed:?} with {pending_mocks} mock(s) unsettled")]
    Timeout {
        elapsed: Duration,
        pending_mocks: usize,
    },
}

impl WithMockError {
    /// Where the failure came from.
    pub fn origin(&self) -> Origin {
        match self {
            WithMockError::Scenario(_) => Origin::Scenario,
            WithMockError::Mock { index, .. } | WithMockError::MockDropped { index } => {
                Origin::Mock(*index)
            }
            WithMockError::Timeout { .. } => Origin::Run,
        }
    }

    /// The error raised by the scenario or mock, if there is one.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            WithMockError::Scenario(source) | WithMockError::Mock { source, .. } => {
                Some(source.as_ref())
            }
            _ => None,
        }
    }

    /// Downcast the underlying error to a concrete type.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.source_error().and_then(|e| e.downcast_ref::<E>())
    }

    /// Take ownership of the underlying error.
    pub fn into_source(self) -> Option<BoxError> {
        match self {
            WithMockError::Scenario(source) | WithMockError::Mock { source, .. } => Some(source),
            _ => None,
        }
    }

    /// True when the failure was a caught panic.
    pub fn is_panic(&self) -> bool {
        self.downcast_ref::<super::PanicError>().is_some()
    }
}
