//! Provider configuration
//!
//! Settings are plain serde structures so callers can keep them in YAML or
//! JSON. Reading files is left to the caller.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Per-request timeout applied when a provider config is silent.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Opaque API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Accepts a non-empty token without whitespace or control characters.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(CloudError::config("credential is empty"));
        }
        if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CloudError::config(
                "credential contains whitespace or control characters",
            ));
        }
        Ok(Self(token))
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Settings for one provider.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,

    /// Overrides the driver's default base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Vendor-specific options.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Resolve the credential: the explicit value first, `env_var` only when
    /// the config is silent.
    pub fn resolve_credential(&self, env_var: &str) -> Result<Credential> {
        if let Some(token) = &self.credential {
            return Credential::new(token.clone());
        }

        match std::env::var(env_var) {
            Ok(token) => {
                tracing::debug!("Using credential from {}", env_var);
                Credential::new(token)
            }
            Err(_) => Err(CloudError::config(format!(
                "no credential configured and {} is not set",
                env_var
            ))),
        }
    }

    pub fn get_extra<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.extra
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Settings for every provider, keyed by provider name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl CloudConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| CloudError::config(format!("invalid YAML configuration: {}", e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| CloudError::config(format!("invalid JSON configuration: {}", e)))
    }

    pub fn with_provider(mut self, name: impl Into<String>, config: ProviderConfig) -> Self {
        self.providers.insert(name.into(), config);
        self
    }

    /// The provider's settings, or defaults when it has none.
    pub fn provider(&self, name: &str) -> ProviderConfig {
        self.providers.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_credential_validation() {
        assert!(Credential::new("abc123").is_ok());
        assert_eq!(Credential::new("").unwrap_err().kind(), ErrorKind::Config);
        assert_eq!(
            Credential::new("abc 123").unwrap_err().kind(),
            ErrorKind::Config
        );
        assert_eq!(Credential::new("abc").unwrap().bearer(), "Bearer abc");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("s3cret").unwrap();
        assert!(!format!("{:?}", credential).contains("s3cret"));

        let config = ProviderConfig::new().with_credential("s3cret");
        assert!(!format!("{:?}", config).contains("s3cret"));
    }

    #[test]
    fn test_explicit_credential_wins() {
        let config = ProviderConfig::new().with_credential("explicit");
        let credential = config
            .resolve_credential("PROSCHEDIO_TEST_UNSET_VARIABLE")
            .unwrap();
        assert_eq!(credential.expose(), "explicit");
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let err = ProviderConfig::new()
            .resolve_credential("PROSCHEDIO_TEST_UNSET_VARIABLE")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_timeout_default_and_override() {
        assert_eq!(ProviderConfig::new().request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        let config = ProviderConfig::new().with_timeout(Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_yaml_config() {
        let config = CloudConfig::from_yaml_str(
            r#"
providers:
  vultr:
    credential: abc
    timeout_secs: 10
    region_default: ewr
"#,
        )
        .unwrap();

        let vultr = config.provider("vultr");
        assert_eq!(vultr.credential.as_deref(), Some("abc"));
        assert_eq!(vultr.timeout_secs, Some(10));
        assert_eq!(vultr.get_extra::<String>("region_default").as_deref(), Some("ewr"));
        assert_eq!(config.provider("other"), ProviderConfig::default());
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = CloudConfig::from_json_str("{\"providers\": 3}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
