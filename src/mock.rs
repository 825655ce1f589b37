//! Mock shapes and their normalization.
//!
//! A mock (or the scenario itself) can be given as a plain value, a future,
//! or a function that answers synchronously or with a future. [`normalize`]
//! turns every shape into the same thing: a one-shot callback that returns a
//! boxed future. Errors and panics raised while calling a function never
//! escape synchronously; they come back as a failed future instead.

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{BoxError, MockResult, PanicError};
use crate::traits::{Request, Response};

/// What a function mock hands back when it is called.
pub enum Reply<T> {
    /// An outcome that is already known.
    Ready(MockResult<T>),
    /// An outcome that settles later.
    Pending(BoxFuture<'static, MockResult<T>>),
}

impl<T> Reply<T> {
    /// A successful, immediate reply.
    pub fn ok(value: T) -> Self {
        Reply::Ready(Ok(value))
    }

    /// A failed, immediate reply.
    pub fn err(error: impl Into<BoxError>) -> Self {
        Reply::Ready(Err(error.into()))
    }

    /// A reply that settles with `fut`.
    pub fn later<F>(fut: F) -> Self
    where
        F: Future<Output = MockResult<T>> + Send + 'static,
    {
        Reply::Pending(fut.boxed())
    }
}

impl<T> fmt::Debug for Reply<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ready(Ok(_)) => write!(f, "Reply::Ready(Ok)"),
            Reply::Ready(Err(e)) => write!(f, "Reply::Ready(Err({}))", e),
            Reply::Pending(_) => write!(f, "Reply::Pending"),
        }
    }
}

/// A scenario or mock in one of its accepted shapes.
///
/// `A` is what the callback is invoked with: `()` for a scenario, the
/// intercepted [`Request`] for a response mock.
///
/// # Example
///
/// ```ignore
/// use with_fetch_mock::{Mock, Request, Response};
///
/// let plain: Mock<_, Response> = Mock::value(Response::new(200, "foo"));
/// let computed = Mock::func(|request: Request| Ok(Response::new(200, request.url)));
/// let deferred = Mock::future(async { Ok(Response::new(204, "")) });
/// let chained = Mock::func_async(|_| async { Ok(Response::new(200, "later")) });
/// ```
pub enum Mock<A, T> {
    /// Resolve with this value.
    Value(T),
    /// Settle with this future.
    Future(BoxFuture<'static, MockResult<T>>),
    /// Call this function once and settle with its reply.
    Function(Box<dyn FnOnce(A) -> Reply<T> + Send>),
}

impl<A, T> Mock<A, T>
where
    A: 'static,
    T: Send + 'static,
{
    /// A mock that resolves with `value`.
    pub fn value(value: T) -> Self {
        Mock::Value(value)
    }

    /// A mock that is already failed with `error`.
    pub fn error(error: impl Into<BoxError>) -> Self {
        Mock::Future(future::ready(Err(error.into())).boxed())
    }

    /// A mock that settles with `fut`.
    pub fn future<F>(fut: F) -> Self
    where
        F: Future<Output = MockResult<T>> + Send + 'static,
    {
        Mock::Future(fut.boxed())
    }

    /// A mock computed synchronously from its argument.
    pub fn func<F>(f: F) -> Self
    where
        F: FnOnce(A) -> MockResult<T> + Send + 'static,
    {
        Mock::Function(Box::new(move |args| Reply::Ready(f(args))))
    }

    /// A mock whose function returns a future.
    pub fn func_async<F, Fut>(f: F) -> Self
    where
        F: FnOnce(A) -> Fut + Send + 'static,
        Fut: Future<Output = MockResult<T>> + Send + 'static,
    {
        Mock::Function(Box::new(move |args| Reply::Pending(f(args).boxed())))
    }

    /// A mock whose function decides per call whether to answer now or later.
    pub fn reply<F>(f: F) -> Self
    where
        F: FnOnce(A) -> Reply<T> + Send + 'static,
    {
        Mock::Function(Box::new(f))
    }
}

impl From<Response> for Mock<Request, Response> {
    fn from(response: Response) -> Self {
        Mock::Value(response)
    }
}

impl<A, T> fmt::Debug for Mock<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mock::Value(_) => write!(f, "Mock::Value"),
            Mock::Future(_) => write!(f, "Mock::Future"),
            Mock::Function(_) => write!(f, "Mock::Function"),
        }
    }
}

/// A mock reduced to "call once, get a future".
pub type NormalizedMock<A, T> = Box<dyn FnOnce(A) -> BoxFuture<'static, MockResult<T>> + Send>;

/// Normalize any [`Mock`] shape into a [`NormalizedMock`].
///
/// With `catch_panics` set, a panic while calling a function mock or while
/// polling any returned future is turned into a [`PanicError`] failure.
pub fn normalize<A, T>(mock: Mock<A, T>, catch_panics: bool) -> NormalizedMock<A, T>
where
    A: Send + 'static,
    T: Send + 'static,
{
    match mock {
        Mock::Value(value) => Box::new(move |_| future::ready(Ok(value)).boxed()),
        Mock::Future(fut) => Box::new(move |_| guard(fut, catch_panics)),
        Mock::Function(f) => Box::new(move |args| {
            let reply = if catch_panics {
                panic::catch_unwind(AssertUnwindSafe(move || f(args)))
                    .unwrap_or_else(|payload| Reply::err(PanicError::from_payload(payload)))
            } else {
                f(args)
            };

            match reply {
                Reply::Ready(result) => future::ready(result).boxed(),
                Reply::Pending(fut) => guard(fut, catch_panics),
            }
        }),
    }
}

fn guard<T>(
    fut: BoxFuture<'static, MockResult<T>>,
    catch_panics: bool,
) -> BoxFuture<'static, MockResult<T>>
where
    T: Send + 'static,
{
    if !catch_panics {
        return fut;
    }

    AssertUnwindSafe(fut)
        .catch_unwind()
        .map(|outcome| {
            outcome.unwrap_or_else(|payload| {
                Err(Box::new(PanicError::from_payload(payload)) as BoxError)
            })
        })
        .boxed()
}
