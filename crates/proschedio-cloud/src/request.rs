//! Request builder
//!
//! Fluent composition of method, headers, query and body over a
//! [`UrlTemplate`]. The builder never retries and never interprets the
//! status it gets back.

use crate::error::{CloudError, Result};
use crate::payload::Payload;
use crate::registry::ProviderRegistry;
use crate::template::UrlTemplate;
use crate::transport::{Body, HttpRequest, HttpResponse, HttpTransport, Method};
use std::sync::Arc;
use std::time::Duration;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Stringification rule for query values: booleans become `"true"`/`"false"`,
/// integers their decimal form, strings pass through unchanged.
pub trait QueryValue {
    fn to_query_value(&self) -> String;
}

impl QueryValue for bool {
    fn to_query_value(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }
}

macro_rules! integer_query_value {
    ($($ty:ty),*) => {
        $(impl QueryValue for $ty {
            fn to_query_value(&self) -> String {
                self.to_string()
            }
        })*
    };
}

integer_query_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl QueryValue for str {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> String {
        self.clone()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> String {
        (**self).to_query_value()
    }
}

/// Composes one request. Setters may be called in any order.
pub struct RequestBuilder {
    transport: Arc<dyn HttpTransport>,
    registry: ProviderRegistry,
    template: UrlTemplate,
    method: Method,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Body>,
    timeout: Option<Duration>,
    error: Option<CloudError>,
}

impl RequestBuilder {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        registry: ProviderRegistry,
        template: UrlTemplate,
    ) -> Self {
        Self {
            transport,
            registry,
            template,
            method: Method::Get,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
            error: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Bind a path placeholder. Errors surface at [`execute`](Self::execute).
    pub fn assign(mut self, name: &str, value: impl Into<String>) -> Self {
        if self.error.is_none() {
            match self.template.assign(name, value) {
                Ok(template) => self.template = template,
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// [`assign`](Self::assign) for an id-bearing placeholder. An empty or
    /// blank value is a validation error and nothing is sent.
    pub fn assign_id(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            self.error
                .get_or_insert_with(|| CloudError::validation(format!("{} must not be empty", name)));
            return self;
        }
        self.assign(name, value)
    }

    /// Append a header. Duplicates are kept in insertion order.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a query pair. Duplicates are kept in insertion order.
    pub fn query<V: QueryValue + ?Sized>(mut self, name: impl Into<String>, value: &V) -> Self {
        self.query.push((name.into(), value.to_query_value()));
        self
    }

    /// Append a query pair only when `value` is set.
    pub fn query_opt<V: QueryValue>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(name, &v),
            None => self,
        }
    }

    pub fn body(mut self, bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        self.body = Some(Body {
            bytes: bytes.into(),
            content_type: content_type.into(),
        });
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body(bytes, JSON_CONTENT_TYPE),
            Err(e) => {
                self.error.get_or_insert(CloudError::Json(e));
                self
            }
        }
    }

    /// Validate `payload`, then send it as the JSON body.
    pub fn payload<P: Payload>(mut self, payload: &P) -> Self {
        match payload.to_json() {
            Ok(value) => self.json(&value),
            Err(e) => {
                self.error.get_or_insert(e);
                self
            }
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Freeze the request without sending it.
    pub fn build(self) -> Result<HttpRequest> {
        self.freeze().map(|(request, _)| request)
    }

    fn freeze(self) -> Result<(HttpRequest, Arc<dyn HttpTransport>)> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if self.body.is_some() && !self.method.allows_body() {
            return Err(CloudError::usage(format!(
                "{} requests cannot carry a body",
                self.method
            )));
        }
        if self.body.as_ref().is_some_and(|b| b.content_type.is_empty()) {
            return Err(CloudError::usage("request body has no content type"));
        }

        let url = self.template.resolve(&self.registry)?;
        let request = HttpRequest {
            method: self.method,
            url,
            headers: self.headers,
            query: self.query,
            body: self.body,
            timeout: self.timeout,
        };
        Ok((request, self.transport))
    }

    /// Send the request and return whatever status comes back.
    pub async fn execute(self) -> Result<HttpResponse> {
        let (request, transport) = self.freeze()?;
        let method = request.method;
        let url = request.url.clone();

        tracing::debug!("{} {}", method, url);
        let response = transport.execute(request).await?;
        tracing::debug!("{} {} -> {}", method, url, response.status);

        Ok(response)
    }
}
