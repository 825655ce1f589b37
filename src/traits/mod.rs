//! Trait abstractions for the collaborators around a scenario run.
//!
//! # Traits
//!
//! - [`HttpClient`] - the fetch primitive scenarios call
//! - [`MockRegistry`] - registration of one-time interceptors

pub mod http;
pub mod registry;

pub use http::{Headers, HttpClient, HttpError, Request, Response};
pub use registry::{Interceptor, MockRegistry};
