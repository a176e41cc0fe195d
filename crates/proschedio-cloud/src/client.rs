//! Provider API client
//!
//! Bundles what every endpoint adapter needs: the catalog, the registry that
//! resolves base URLs, the transport and the credential.

use crate::catalog::EndpointCatalog;
use crate::config::Credential;
use crate::error::Result;
use crate::registry::ProviderRegistry;
use crate::request::RequestBuilder;
use crate::transport::{HttpTransport, Method};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    registry: ProviderRegistry,
    catalog: Arc<EndpointCatalog>,
    transport: Arc<dyn HttpTransport>,
    credential: Credential,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(
        registry: ProviderRegistry,
        catalog: Arc<EndpointCatalog>,
        transport: Arc<dyn HttpTransport>,
        credential: Credential,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            catalog,
            transport,
            credential,
            timeout,
        }
    }

    pub fn provider(&self) -> &str {
        self.catalog.provider()
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a request against the catalog entry `key`, authorized and with
    /// the client's timeout.
    pub fn request(&self, method: Method, key: &str) -> Result<RequestBuilder> {
        let template = self.catalog.get(key)?.clone();
        Ok(RequestBuilder::new(
            Arc::clone(&self.transport),
            self.registry.clone(),
            template,
        )
        .method(method)
        .header("Authorization", self.credential.bearer())
        .timeout(self.timeout))
    }

    pub fn get(&self, key: &str) -> Result<RequestBuilder> {
        self.request(Method::Get, key)
    }

    pub fn post(&self, key: &str) -> Result<RequestBuilder> {
        self.request(Method::Post, key)
    }

    pub fn put(&self, key: &str) -> Result<RequestBuilder> {
        self.request(Method::Put, key)
    }

    pub fn patch(&self, key: &str) -> Result<RequestBuilder> {
        self.request(Method::Patch, key)
    }

    pub fn delete(&self, key: &str) -> Result<RequestBuilder> {
        self.request(Method::Delete, key)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("provider", &self.provider())
            .field("endpoints", &self.catalog.len())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
