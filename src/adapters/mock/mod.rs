//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`FetchMock`] - fetch client answering calls from one-shot interceptors

pub mod fetch;

pub use fetch::FetchMock;
