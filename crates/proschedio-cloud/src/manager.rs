//! Resource manager
//!
//! The library's entry point: dispatches `(provider, kind)` to the matching
//! driver, connecting each driver once on first use.

use crate::config::{CloudConfig, ProviderConfig};
use crate::error::{CloudError, Result};
use crate::provider::{AuthStatus, DriverContext, DriverFactory, ProviderDriver};
use crate::registry::ProviderRegistry;
use crate::resource::{Resource, ResourceConfig, ResourceKind, ensure_id};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

type DriverCell = Arc<OnceCell<Arc<dyn ProviderDriver>>>;

pub struct ResourceManager {
    registry: ProviderRegistry,
    transport: Arc<dyn HttpTransport>,
    config: CloudConfig,
    factories: BTreeMap<String, Arc<dyn DriverFactory>>,
    drivers: Mutex<HashMap<String, DriverCell>>,
}

#[derive(Default)]
pub struct ResourceManagerBuilder {
    registry: Option<ProviderRegistry>,
    transport: Option<Arc<dyn HttpTransport>>,
    config: CloudConfig,
    factories: Vec<Arc<dyn DriverFactory>>,
}

impl ResourceManagerBuilder {
    pub fn factory(mut self, factory: Arc<dyn DriverFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn config(mut self, config: CloudConfig) -> Self {
        self.config = config;
        self
    }

    /// Settings for a single provider, replacing any loaded from `config`.
    pub fn provider_config(mut self, name: impl Into<String>, config: ProviderConfig) -> Self {
        self.config.providers.insert(name.into(), config);
        self
    }

    /// Share a registry with other components.
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<ResourceManager> {
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        let mut factories = BTreeMap::new();
        for factory in self.factories {
            let name = factory.name().to_string();
            if factories.insert(name.clone(), factory).is_some() {
                return Err(CloudError::config(format!(
                    "provider '{}' registered twice",
                    name
                )));
            }
        }

        Ok(ResourceManager {
            registry: self.registry.unwrap_or_default(),
            transport,
            config: self.config,
            factories,
            drivers: Mutex::new(HashMap::new()),
        })
    }
}

impl ResourceManager {
    pub fn builder() -> ResourceManagerBuilder {
        ResourceManagerBuilder::default()
    }

    /// Provider names this manager can dispatch to.
    pub fn providers(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The connected driver for `provider`. Concurrent first calls connect
    /// exactly once.
    pub async fn driver(&self, provider: &str) -> Result<Arc<dyn ProviderDriver>> {
        let factory = self
            .factories
            .get(provider)
            .ok_or_else(|| CloudError::config(format!("unknown provider '{}'", provider)))?;

        let cell = {
            let mut drivers = self.drivers.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(drivers.entry(provider.to_string()).or_default())
        };

        let driver = cell
            .get_or_try_init(|| self.connect(factory.as_ref()))
            .await?;
        Ok(Arc::clone(driver))
    }

    async fn connect(&self, factory: &dyn DriverFactory) -> Result<Arc<dyn ProviderDriver>> {
        let name = factory.name();
        let config = self.config.provider(name);

        match &config.base_url {
            Some(base_url) => self.registry.register(name, base_url.as_str())?,
            None if !self.registry.contains(name) => {
                self.registry.register(name, factory.default_base_url())?
            }
            None => {}
        }

        let context = DriverContext {
            registry: self.registry.clone(),
            transport: Arc::clone(&self.transport),
            config,
        };
        let driver = factory.connect(context).await?;
        tracing::info!("Connected provider {}", driver.display_name());
        Ok(driver)
    }

    pub async fn supported_kinds(&self, provider: &str) -> Result<Vec<ResourceKind>> {
        Ok(self.driver(provider).await?.supported_kinds())
    }

    pub async fn check_auth(&self, provider: &str) -> Result<AuthStatus> {
        self.driver(provider).await?.check_auth().await
    }

    /// An UNBOUND handle. No vendor call is made.
    pub async fn handle(
        &self,
        provider: &str,
        kind: ResourceKind,
        config: ResourceConfig,
    ) -> Result<Resource> {
        let backend = self.driver(provider).await?.backend(kind)?;
        Ok(Resource::new(provider, config, backend))
    }

    /// Create a resource and return its ACTIVE handle.
    pub async fn create_resource(
        &self,
        provider: &str,
        kind: ResourceKind,
        config: ResourceConfig,
    ) -> Result<Resource> {
        let mut resource = self.handle(provider, kind, config).await?;
        resource.create().await?;
        Ok(resource)
    }

    /// Fetch an existing resource; `None` when the vendor reports not-found.
    pub async fn get_resource(
        &self,
        provider: &str,
        kind: ResourceKind,
        id: &str,
    ) -> Result<Option<Resource>> {
        ensure_id(id)?;
        let backend = self.driver(provider).await?.backend(kind)?;
        let mut resource = Resource::bound(provider, id, backend)?;
        Ok(resource.get().await?.then_some(resource))
    }

    pub async fn delete_resource(&self, provider: &str, kind: ResourceKind, id: &str) -> Result<()> {
        ensure_id(id)?;
        let backend = self.driver(provider).await?.backend(kind)?;
        Resource::bound(provider, id, backend)?.delete().await
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("providers", &self.providers())
            .field("registry", &self.registry.list())
            .finish_non_exhaustive()
    }
}
