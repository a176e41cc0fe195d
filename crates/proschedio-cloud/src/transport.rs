//! HTTP transport seam
//!
//! The core only needs something that turns an [`HttpRequest`] into an
//! [`HttpResponse`]. [`ReqwestTransport`] is the production implementation.

use crate::error::{CloudError, ProviderError, Result, sanitize_for_log};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

const USER_AGENT: &str = concat!("proschedio/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// GET and DELETE never carry a body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request body; always paired with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// A fully composed request, frozen by [`RequestBuilder::execute`](crate::RequestBuilder::execute).
#[derive(Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Body>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_slice(&b.bytes).ok())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("query", &self.query)
            .field("body_len", &self.body.as_ref().map(|b| b.bytes.len()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Response payload as received. The core never reshapes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Empty,
    Json(Value),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub data: ResponseData,
    /// Lower-cased names; repeated headers joined with `", "`.
    pub headers: BTreeMap<String, String>,
}

impl HttpResponse {
    pub fn new(status: u16, data: ResponseData) -> Self {
        Self {
            status,
            data,
            headers: BTreeMap::new(),
        }
    }

    pub fn json(status: u16, value: Value) -> Self {
        Self::new(status, ResponseData::Json(value))
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, ResponseData::Empty)
    }

    /// Classify a raw body: JSON when it parses, bytes otherwise.
    pub fn from_bytes(status: u16, headers: BTreeMap<String, String>, bytes: Vec<u8>) -> Self {
        let data = if bytes.iter().all(u8::is_ascii_whitespace) {
            ResponseData::Empty
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => ResponseData::Json(value),
                Err(_) => ResponseData::Raw(bytes),
            }
        };
        Self {
            status,
            data,
            headers,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json_value(&self) -> Option<&Value> {
        match &self.data {
            ResponseData::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self.data {
            ResponseData::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Body rendered as text, for error details.
    pub fn body_text(&self) -> String {
        match &self.data {
            ResponseData::Empty => String::new(),
            ResponseData::Json(v) => v.to_string(),
            ResponseData::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Fail with a [`ProviderError`] unless the status is in `expected`.
    pub fn expect_status(&self, expected: &[u16]) -> Result<&Self> {
        if expected.contains(&self.status) {
            return Ok(self);
        }
        Err(self.provider_error().into())
    }

    pub fn provider_error(&self) -> ProviderError {
        let body = self.body_text();
        tracing::debug!(
            "Provider error: {} - {}",
            self.status,
            sanitize_for_log(&body)
        );
        ProviderError::new(self.status, body)
    }
}

/// The request-execution capability.
///
/// Implementations return every response they receive, whatever its status;
/// only a missing response is an error.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpTransport`] over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CloudError::transport("failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            query,
            body,
            timeout,
        } = request;

        let mut builder = self.client.request(method.into(), &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        // `header` appends, so duplicates survive in insertion order
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            // An explicit Content-Type header replaces the body's own
            let explicit = headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
            if !explicit {
                builder = builder.header(reqwest::header::CONTENT_TYPE, body.content_type);
            }
            builder = builder.body(body.bytes);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CloudError::transport(format!("{} {} failed", method, url), e))?;

        let status = response.status().as_u16();
        let mut response_headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            response_headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CloudError::transport("failed to read response body", e))?;

        Ok(HttpResponse::from_bytes(
            status,
            response_headers,
            bytes.to_vec(),
        ))
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockTransport;

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    /// Scripted transport: replays queued responses and records requests.
    ///
    /// Once the queue is drained, the last response keeps being replayed;
    /// with nothing queued at all, `execute` fails with a transport error.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<HttpResponse>>,
        last: Mutex<Option<HttpResponse>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, response: HttpResponse) -> &Self {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(response);
            self
        }

        pub fn push_json(&self, status: u16, value: Value) -> &Self {
            self.push(HttpResponse::json(status, value))
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);

            let next = self
                .responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            match next {
                Some(response) => {
                    *last = Some(response.clone());
                    Ok(response)
                }
                None => last.clone().ok_or_else(|| CloudError::Transport {
                    message: "mock transport has no scripted response".to_string(),
                    source: None,
                }),
            }
        }
    }
}
