//! Vultr provider implementation

use crate::api;
use crate::catalog::{DEFAULT_BASE_URL, PROVIDER, catalog};
use crate::handlers::VultrBackend;
use async_trait::async_trait;
use proschedio_cloud::{
    ApiClient, AuthStatus, DriverContext, DriverFactory, ProviderDriver, ResourceBackend,
    ResourceKind, Result,
};
use serde_json::Value;
use std::sync::Arc;

/// Environment variable read when the configuration carries no credential.
pub const VULTR_API_KEY_ENV: &str = "VULTR_API_KEY";

/// Connected Vultr driver
pub struct VultrProvider {
    client: ApiClient,
}

impl VultrProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The client, for calling endpoint adapters directly.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl ProviderDriver for VultrProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn display_name(&self) -> &str {
        "Vultr"
    }

    fn supported_kinds(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL.to_vec()
    }

    fn backend(&self, kind: ResourceKind) -> Result<Arc<dyn ResourceBackend>> {
        Ok(Arc::new(VultrBackend::new(self.client.clone(), kind)))
    }

    async fn check_auth(&self) -> Result<AuthStatus> {
        let response = api::account::get(&self.client).await?;
        if response.status != 200 {
            return Ok(AuthStatus::failed(response.provider_error().to_string()));
        }

        let account = response.json_value().and_then(|body| body.get("account"));
        let field = |name: &str| {
            account
                .and_then(|a| a.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };
        let info = field("email").or_else(|| field("name")).unwrap_or("Unknown");
        Ok(AuthStatus::ok(info))
    }
}

/// Builds [`VultrProvider`]s for the resource manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct VultrFactory;

impl VultrFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DriverFactory for VultrFactory {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn default_base_url(&self) -> &str {
        DEFAULT_BASE_URL
    }

    async fn connect(&self, context: DriverContext) -> Result<Arc<dyn ProviderDriver>> {
        let credential = context.config.resolve_credential(VULTR_API_KEY_ENV)?;
        let client = ApiClient::new(
            context.registry,
            Arc::new(catalog()?),
            context.transport,
            credential,
            context.config.request_timeout(),
        );
        tracing::debug!("Connected Vultr driver");
        Ok(Arc::new(VultrProvider::new(client)))
    }
}
