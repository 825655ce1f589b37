//! with-fetch-mock - run a test scenario against one-shot fetch mocks
//!
//! A scenario is run together with a fixed list of response mocks. Each mock
//! answers exactly one network call. The run resolves only once the scenario
//! and every mock have succeeded, and rejects with the first failure.
//!
//! ```ignore
//! use with_fetch_mock::prelude::*;
//!
//! #[tokio::test]
//! async fn loads_foo() {
//!     let fetch = FetchMock::new();
//!     let client = fetch.clone();
//!
//!     WithMock::new(fetch)
//!         .run(
//!             Mock::func_async(move |_| async move {
//!                 let response = client.get("/foo").await?;
//!                 assert_eq!(response.text()?, "\"foo\"");
//!                 Ok(())
//!             }),
//!             vec![Response::new(200, "\"foo\"").into()],
//!         )
//!         .await
//!         .unwrap();
//! }
//! ```

pub mod adapters;
pub mod error;
pub mod logging;
pub mod mock;
pub mod prelude;
pub mod traits;
pub mod with_mock;

pub use adapters::{FetchMock, ReqwestHttpClient};
pub use error::{BoxError, MockResult, Origin, PanicError, WithMockError};
pub use mock::{normalize, Mock, NormalizedMock, Reply};
pub use traits::{HttpClient, HttpError, MockRegistry, Request, Response};
pub use with_mock::{with_fetch_mock, WithMock, WithMockConfig};
