//! Reqwest-based HTTP client adapter.
//!
//! Lets a [`FetchMock`](super::FetchMock) pass calls that no mock answers
//! through to a real server.

use async_trait::async_trait;

use crate::traits::{Headers, HttpClient, HttpError, Request, Response};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use with_fetch_mock::adapters::{FetchMock, ReqwestHttpClient};
///
/// let fetch = FetchMock::new().with_fallback(Arc::new(ReqwestHttpClient::new()));
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Translate a [`Request`] into a reqwest request builder.
    fn build(&self, request: Request) -> Result<reqwest::RequestBuilder, HttpError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| HttpError::Other(format!("Invalid method {}: {}", request.method, e)))?;

        let mut builder = self.client.request(method, request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        Ok(builder)
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn fetch(&self, request: Request) -> Result<Response, HttpError> {
        let builder = self.build(request)?;
        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_custom_client_timeout_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let custom = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let client = ReqwestHttpClient::with_client(custom);
        let result = client.get(&format!("{}/slow", server.uri())).await;

        assert!(matches!(result, Err(HttpError::Timeout(_))));
    }

    #[test]
    fn test_convert_headers() {
        let mut header_map = reqwest::header::HeaderMap::new();
        header_map.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );

        let headers = ReqwestHttpClient::convert_headers(&header_map);
        assert_eq!(
            headers.get("content-type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_build_rejects_bad_method() {
        let client = ReqwestHttpClient::new();
        let result = client.build(Request::new("GE T", "http://example.com"));
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_get_against_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo"))
            .and(header("x-test", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"foo\""))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new();
        let response = client
            .fetch(Request::get(format!("{}/foo", server.uri())).with_header("x-test", "1"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text().unwrap(), "\"foo\"");
    }

    #[tokio::test]
    async fn test_post_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(body_string("{\"id\":1}"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new();
        let response = client
            .post(&format!("{}/items", server.uri()), "{\"id\":1}")
            .await
            .unwrap();

        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn test_get_invalid_url() {
        let client = ReqwestHttpClient::new();
        let result = client.get("not-a-valid-url").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_connection_refused() {
        let client = ReqwestHttpClient::new();
        let result = client.get("http://127.0.0.1:59999/test").await;
        assert!(matches!(
            result,
            Err(HttpError::ConnectionFailed(_) | HttpError::Other(_))
        ));
    }
}
