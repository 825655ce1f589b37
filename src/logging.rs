//! Tracing setup for test binaries.
//!
//! Runs emit `tracing` events as mocks are registered, intercepted and
//! settled. Call [`init_logging`] at the top of a test to see them; the
//! filter comes from `RUST_LOG` and defaults to [`DEFAULT_FILTER`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "with_fetch_mock=info";

/// Install a fmt subscriber writing through the test harness's capture.
///
/// Safe to call from every test: only the first call installs anything.
/// Returns whether this call installed the subscriber.
pub fn init_logging() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}
