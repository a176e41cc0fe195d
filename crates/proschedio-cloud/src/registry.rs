//! Provider registry
//!
//! Maps provider names to their base URLs. Built once during start-up and
//! passed down explicitly; clones share the same table.

use crate::error::{CloudError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared name → base URL table.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Arc<RwLock<BTreeMap<String, Arc<str>>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at `base_url`.
    ///
    /// Re-registering identical inputs is a no-op; a different URL under an
    /// existing name is a configuration error.
    pub fn register(&self, name: impl Into<String>, base_url: impl Into<String>) -> Result<()> {
        let name = name.into();
        let base_url = base_url.into();

        if name.is_empty() {
            return Err(CloudError::config("provider name must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CloudError::config(format!(
                "base url for provider '{}' must be http(s): {}",
                name, base_url
            )));
        }

        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match providers.get(&name) {
            Some(existing) if **existing == *base_url => Ok(()),
            Some(existing) => Err(CloudError::config(format!(
                "provider '{}' is already registered at {} (refusing {})",
                name, existing, base_url
            ))),
            None => {
                tracing::debug!("Registering provider {} at {}", name, base_url);
                providers.insert(name, Arc::from(base_url));
                Ok(())
            }
        }
    }

    /// Registered provider names, sorted.
    pub fn list(&self) -> Vec<String> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn base_url_of(&self, name: &str) -> Result<String> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|url| url.to_string())
            .ok_or_else(|| CloudError::config(format!("provider '{}' is not registered", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::thread;

    #[test]
    fn test_register_is_idempotent() {
        let registry = ProviderRegistry::new();
        registry.register("vultr", "https://api.vultr.com/v2").unwrap();
        registry.register("vultr", "https://api.vultr.com/v2").unwrap();

        assert_eq!(registry.list(), vec!["vultr".to_string()]);
        assert_eq!(
            registry.base_url_of("vultr").unwrap(),
            "https://api.vultr.com/v2"
        );
    }

    #[test]
    fn test_register_conflict() {
        let registry = ProviderRegistry::new();
        registry.register("vultr", "https://api.vultr.com/v2").unwrap();

        let err = registry
            .register("vultr", "https://other.test/v2")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(
            registry.base_url_of("vultr").unwrap(),
            "https://api.vultr.com/v2"
        );
    }

    #[test]
    fn test_unknown_provider() {
        let registry = ProviderRegistry::new();
        assert!(!registry.contains("nope"));
        assert_eq!(
            registry.base_url_of("nope").unwrap_err().kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let registry = ProviderRegistry::new();
        assert!(registry.register("", "https://x.test").is_err());
        assert!(registry.register("x", "ftp://x.test").is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let registry = ProviderRegistry::new();
        let clone = registry.clone();
        clone.register("a", "https://a.test").unwrap();
        assert!(registry.contains("a"));
    }

    #[test]
    fn test_concurrent_registration_and_lookup() {
        let registry = ProviderRegistry::new();
        registry.register("p0", "https://p0.test").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for j in 0..50 {
                        let name = format!("p{}", (i + j) % 4);
                        let url = format!("https://{}.test", name);
                        registry.register(name.clone(), url.clone()).unwrap();
                        assert_eq!(registry.base_url_of(&name).unwrap(), url);
                        assert_eq!(registry.base_url_of("p0").unwrap(), "https://p0.test");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.list().len(), 4);
    }
}
