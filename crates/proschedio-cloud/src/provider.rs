//! Provider driver traits

use crate::config::ProviderConfig;
use crate::error::{CloudError, Result};
use crate::registry::ProviderRegistry;
use crate::resource::{ResourceBackend, ResourceKind};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A connected provider: hands out one backend per supported kind.
///
/// All providers (Vultr, ...) implement this trait so the manager can
/// dispatch without knowing vendor details.
#[async_trait]
pub trait ProviderDriver: Send + Sync {
    /// Returns the provider name (e.g., "vultr")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    fn supported_kinds(&self) -> Vec<ResourceKind>;

    fn supports(&self, kind: ResourceKind) -> bool {
        self.supported_kinds().contains(&kind)
    }

    /// Backend for `kind`, or a configuration error when unsupported.
    fn backend(&self, kind: ResourceKind) -> Result<Arc<dyn ResourceBackend>>;

    /// Check the credential against the vendor.
    async fn check_auth(&self) -> Result<AuthStatus>;
}

/// Everything a factory needs to connect a driver.
#[derive(Clone)]
pub struct DriverContext {
    pub registry: ProviderRegistry,
    pub transport: Arc<dyn HttpTransport>,
    pub config: ProviderConfig,
}

/// Builds drivers for one provider name.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    fn name(&self) -> &str;

    /// Used when the configuration carries no `base_url`.
    fn default_base_url(&self) -> &str;

    async fn connect(&self, context: DriverContext) -> Result<Arc<dyn ProviderDriver>>;
}

/// Error for a kind the driver has no backend for.
pub fn unsupported_kind(provider: &str, kind: ResourceKind) -> CloudError {
    CloudError::config(format!(
        "provider '{}' does not support {} resources",
        provider, kind
    ))
}

/// Authentication status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Account/user information if available
    pub account_info: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}
