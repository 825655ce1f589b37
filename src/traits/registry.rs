//! Mock registration trait abstraction.
//!
//! A registry hands out canned replies for upcoming network calls. The
//! coordination layer only ever needs one capability from it: register a
//! one-time interceptor for the next call.

use futures::future::BoxFuture;

use super::http::{HttpError, Request, Response};

/// A one-shot handler answering a single intercepted request.
pub type Interceptor =
    Box<dyn FnOnce(Request) -> BoxFuture<'static, Result<Response, HttpError>> + Send>;

/// Registers one-time interceptors for upcoming network calls.
///
/// Interceptors answer calls in registration order; each one is consumed by
/// exactly one call.
pub trait MockRegistry: Send + Sync {
    /// Register an interceptor for the next unanswered network call.
    fn once(&self, interceptor: Interceptor);
}
