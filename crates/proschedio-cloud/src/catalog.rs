//! Endpoint catalog
//!
//! A closed set of named [`UrlTemplate`]s for one provider. Adapters look
//! endpoints up by key only; the vendor paths live in one table.

use crate::error::{CloudError, Result};
use crate::template::UrlTemplate;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    provider: String,
    endpoints: BTreeMap<&'static str, UrlTemplate>,
}

impl EndpointCatalog {
    pub fn builder(provider: impl Into<String>) -> EndpointCatalogBuilder {
        EndpointCatalogBuilder {
            provider: provider.into(),
            endpoints: BTreeMap::new(),
            error: None,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn get(&self, key: &str) -> Result<&UrlTemplate> {
        self.endpoints.get(key).ok_or_else(|| {
            CloudError::config(format!(
                "provider '{}' has no endpoint named '{}'",
                self.provider, key
            ))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.endpoints.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Collects entries and reports the first bad one at [`build`](Self::build).
pub struct EndpointCatalogBuilder {
    provider: String,
    endpoints: BTreeMap<&'static str, UrlTemplate>,
    error: Option<CloudError>,
}

impl EndpointCatalogBuilder {
    pub fn endpoint(mut self, key: &'static str, pattern: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.endpoints.contains_key(key) {
            self.error = Some(CloudError::config(format!(
                "endpoint '{}' registered twice for provider '{}'",
                key, self.provider
            )));
            return self;
        }
        match UrlTemplate::new(self.provider.clone(), pattern) {
            Ok(template) => {
                self.endpoints.insert(key, template);
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    pub fn build(self) -> Result<EndpointCatalog> {
        if let Some(e) = self.error {
            return Err(e);
        }
        Ok(EndpointCatalog {
            provider: self.provider,
            endpoints: self.endpoints,
        })
    }
}
