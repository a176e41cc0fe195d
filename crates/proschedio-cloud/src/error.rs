//! Cloud provider error types

use thiserror::Error;

/// Maximum number of body bytes kept in log lines.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Errors surfaced by every layer of the library.
#[derive(Error, Debug)]
pub enum CloudError {
    /// Missing provider registration, missing credential, unknown provider or kind.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation attempted in the wrong state, or an API used incorrectly.
    #[error("Usage error: {0}")]
    Usage(String),

    /// A caller-supplied value failed a precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced a response.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The vendor answered with a status outside the expected set.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The vendor answered with success but the body could not be interpreted.
    ///
    /// `resource_id` holds whatever id could be salvaged so the caller can
    /// reconcile a resource that may exist remotely.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        message: String,
        resource_id: Option<String>,
    },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fieldless view of [`CloudError`] for matching on the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Usage,
    Validation,
    Transport,
    Provider,
    MalformedResponse,
    Timeout,
    Cancelled,
    Json,
}

impl CloudError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn malformed(message: impl Into<String>, resource_id: Option<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            resource_id,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CloudError::Config(_) => ErrorKind::Config,
            CloudError::Usage(_) => ErrorKind::Usage,
            CloudError::Validation(_) => ErrorKind::Validation,
            CloudError::Transport { .. } => ErrorKind::Transport,
            CloudError::Provider(_) => ErrorKind::Provider,
            CloudError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            CloudError::Timeout(_) => ErrorKind::Timeout,
            CloudError::Cancelled => ErrorKind::Cancelled,
            CloudError::Json(_) => ErrorKind::Json,
        }
    }

    /// The vendor failure, if this is one.
    pub fn as_provider_error(&self) -> Option<&ProviderError> {
        match self {
            CloudError::Provider(e) => Some(e),
            _ => None,
        }
    }
}

/// A non-success answer from a vendor API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Provider returned HTTP {status}{}", .vendor_code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct ProviderError {
    pub status: u16,
    /// Short machine-readable code taken from the body, when present.
    pub vendor_code: Option<String>,
    /// The raw body as received.
    pub details: String,
    pub resource_id: Option<String>,
}

impl ProviderError {
    pub fn new(status: u16, details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            status,
            vendor_code: vendor_code_from_body(&details),
            details,
            resource_id: None,
        }
    }

    pub fn for_resource(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Vendors put a short code under `error` or `code`; either a string or an
/// object with a `code`/`message` field.
fn vendor_code_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let candidate = value.get("error").or_else(|| value.get("code"))?;
    match candidate {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Object(map) => map
            .get("code")
            .or_else(|| map.get("message"))
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        _ => None,
    }
}

/// Truncate a response body and drop non-printable bytes before logging it.
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_code_from_string_error() {
        let err = ProviderError::new(429, r#"{"error":"rate_limited"}"#);
        assert_eq!(err.vendor_code.as_deref(), Some("rate_limited"));
        assert_eq!(err.details, r#"{"error":"rate_limited"}"#);
        assert_eq!(err.to_string(), "Provider returned HTTP 429 (rate_limited)");
    }

    #[test]
    fn test_vendor_code_from_nested_error() {
        let err = ProviderError::new(400, r#"{"error":{"code":"bad_plan","message":"x"}}"#);
        assert_eq!(err.vendor_code.as_deref(), Some("bad_plan"));
    }

    #[test]
    fn test_vendor_code_absent_for_plain_body() {
        let err = ProviderError::new(502, "Bad Gateway");
        assert!(err.vendor_code.is_none());
        assert_eq!(err.to_string(), "Provider returned HTTP 502");
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(CloudError::config("x").kind(), ErrorKind::Config);
        assert_eq!(CloudError::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(
            CloudError::from(ProviderError::new(500, "")).kind(),
            ErrorKind::Provider
        );
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "a".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"a".repeat(200)));
        assert!(sanitized.contains("500 bytes total"));
        assert_eq!(sanitize_for_log("ok\n\tbody"), "okbody");
    }
}
