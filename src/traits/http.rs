//! HTTP client trait abstraction.
//!
//! Scenarios talk to the network through [`HttpClient`], which lets the
//! in-memory [`FetchMock`](crate::adapters::FetchMock) answer their calls
//! with one-shot mocks.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// An outgoing HTTP request as seen by an interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body, if any
    pub body: Option<String>,
}

impl Request {
    /// Create a request with an arbitrary method.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Create a POST request with a body.
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::new("POST", url)
        }
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// HTTP response wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// No interceptor was registered for the call and no fallback is set
    #[error("No mock registered for {method} {url}")]
    Unmatched { method: String, url: String },
    /// The mock answering this call failed
    #[error("Mock rejected: {0}")]
    MockRejected(String),
    /// The mock answering this call went away before replying
    #[error("Mock dropped before replying")]
    MockDropped,
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// The network-fetch primitive used by scenarios.
///
/// # Example
///
/// ```ignore
/// use with_fetch_mock::traits::{HttpClient, HttpError};
///
/// async fn load_name<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.get("/user/name").await?;
///     response.text().map_err(|e| HttpError::Other(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a request.
    async fn fetch(&self, request: Request) -> Result<Response, HttpError>;

    /// Perform a GET request.
    async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.fetch(Request::get(url)).await
    }

    /// Perform a POST request.
    async fn post(&self, url: &str, body: &str) -> Result<Response, HttpError> {
        self.fetch(Request::post(url, body)).await
    }
}
