//! Proschedio
//!
//! One async API to create, inspect, update and delete cloud resources,
//! whatever the vendor behind them.
//!
//! # Supported Providers
//!
//! - **Vultr**: instances, block storage, DNS, load balancers, managed
//!   databases, Kubernetes, VPCs, firewall groups, reserved IPs, SSH keys,
//!   snapshots, startup scripts
//!
//! ```no_run
//! use proschedio::{Proschedio, ResourceConfig, ResourceKind, WaitOptions};
//!
//! # async fn run() -> proschedio::Result<()> {
//! let manager = Proschedio::from_yaml_str("providers:\n  vultr:\n    timeout_secs: 60\n")?;
//! let config = ResourceConfig::new()
//!     .param("region", "ewr")
//!     .param("plan", "vc2-1c-1gb")
//!     .param("os_id", 2284)
//!     .wait(WaitOptions::default());
//! let server = manager
//!     .create_resource("vultr", ResourceKind::Instance, config)
//!     .await?;
//! println!("{} is up at {}", server.label(), server.primary_address());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub use proschedio_cloud as cloud;
pub use proschedio_cloud_vultr as vultr;

pub use proschedio_cloud::{
    Attribute, AuthStatus, CancellationToken, CloudConfig, CloudError, DriverFactory, ErrorKind,
    HandleState, ListOptions, NormalizedAttributes, Page, ProviderConfig, ProviderError,
    Resource, ResourceConfig, ResourceKind, ResourceManager, ResourceManagerBuilder, Result,
    UNKNOWN, WaitOptions, WaitOutcome,
};

/// Factories for every provider shipped with this crate.
pub fn builtin_providers() -> Vec<Arc<dyn DriverFactory>> {
    vec![Arc::new(vultr::VultrFactory::new())]
}

/// Entry point: resource managers with the built-in providers registered.
pub struct Proschedio;

impl Proschedio {
    /// A manager builder preloaded with [`builtin_providers`]. Add further
    /// factories, a config or a transport before `build`.
    pub fn builder() -> ResourceManagerBuilder {
        builtin_providers()
            .into_iter()
            .fold(ResourceManager::builder(), |builder, factory| {
                builder.factory(factory)
            })
    }

    /// A manager for `config` over the default transport.
    pub fn with_config(config: CloudConfig) -> Result<ResourceManager> {
        let manager = Self::builder().config(config).build()?;
        tracing::debug!("Proschedio ready with providers {:?}", manager.providers());
        Ok(manager)
    }

    /// A manager for a YAML provider config (see [`CloudConfig`]).
    pub fn from_yaml_str(content: &str) -> Result<ResourceManager> {
        Self::with_config(CloudConfig::from_yaml_str(content)?)
    }
}
