//! Concrete implementations of the trait abstractions in `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - real HTTP client using reqwest, usable as the
//!   fallback for calls no mock answers
//!
//! # Mock Implementations
//!
//! - [`mock::FetchMock`] - in-memory registry and fetch client

pub mod mock;
pub mod reqwest_http;

pub use mock::FetchMock;
pub use reqwest_http::ReqwestHttpClient;
