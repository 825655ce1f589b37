//! Shared fixtures for integration tests.

#![allow(dead_code)]

use thiserror::Error;
use with_fetch_mock::{FetchMock, HttpClient, Mock, Response, WithMock};

/// Error raised by scenarios and mocks under test.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TestError(pub &'static str);

/// A fresh fetch mock and a helper registering on it.
pub fn setup() -> (FetchMock, WithMock) {
    let fetch = FetchMock::new();
    let with_mock = WithMock::new(fetch.clone());
    (fetch, with_mock)
}

/// A canned `"foo"` JSON string response.
pub fn foo_response() -> Response {
    Response::new(200, "\"foo\"")
}

/// A scenario that fetches `url` once and resolves with the response.
pub fn fetch_once(client: FetchMock, url: &'static str) -> Mock<(), Response> {
    Mock::func_async(move |_| async move { Ok(client.get(url).await?) })
}
