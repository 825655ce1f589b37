//! Error types for scenario runs.
//!
//! - **[`BoxError`]**: what scenarios and mocks fail with. Any error type
//!   works and can be recovered by downcasting.
//! - **[`PanicError`]**: a caught panic from a scenario or mock.
//! - **[`WithMockError`]**: the first failure of a run, tagged with its
//!   [`Origin`].
//!
//! # Example
//!
//! ```ignore
//! use with_fetch_mock::error::{Origin, WithMockError};
//!
//! match with_mock.run(scenario, mocks).await {
//!     Ok((value, responses)) => println!("{} responses", responses.len()),
//!     Err(err) if err.origin() == Origin::Scenario => eprintln!("scenario: {}", err),
//!     Err(err) => eprintln!("{}", err),
//! }
//! ```

mod panic;
mod with_mock_error;

pub use panic::PanicError;
pub use with_mock_error::{Origin, WithMockError};

/// Type-erased error returned by scenarios and mocks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a single scenario or mock.
pub type MockResult<T> = Result<T, BoxError>;
