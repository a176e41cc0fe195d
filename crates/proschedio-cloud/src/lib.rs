//! Proschedio Cloud
//!
//! Provider-neutral core of Proschedio: request composition over endpoint
//! templates, the provider registry, resource handles with their lifecycle
//! state machine, and the manager that dispatches to provider drivers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                ResourceManager                  │
//! │   create_resource / get_resource / delete ...   │
//! └─────────────────┬───────────────────────────────┘
//!                   │ (provider, kind)
//! ┌─────────────────▼───────────────────────────────┐
//! │        ProviderDriver  →  ResourceBackend       │
//! │  ┌──────────────┐  ┌──────────────────────┐     │
//! │  │  Resource    │  │  Waiter (polling)    │     │
//! │  └──────────────┘  └──────────────────────┘     │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │ ApiClient → RequestBuilder → UrlTemplate        │
//! │        ↓                        ↓               │
//! │  HttpTransport            ProviderRegistry      │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod pagination;
pub mod payload;
pub mod provider;
pub mod registry;
pub mod request;
pub mod resource;
pub mod template;
pub mod transport;
pub mod waiter;

#[cfg(test)]
mod testing;

// Re-exports
pub use catalog::{EndpointCatalog, EndpointCatalogBuilder};
pub use client::ApiClient;
pub use config::{CloudConfig, Credential, DEFAULT_REQUEST_TIMEOUT, ProviderConfig};
pub use error::{CloudError, ErrorKind, ProviderError, Result};
pub use manager::{ResourceManager, ResourceManagerBuilder};
pub use pagination::{ListOptions, Page};
pub use payload::{Payload, ensure_range, from_params};
pub use provider::{AuthStatus, DriverContext, DriverFactory, ProviderDriver, unsupported_kind};
pub use registry::ProviderRegistry;
pub use request::{QueryValue, RequestBuilder};
pub use resource::{
    Attribute, HandleState, NormalizedAttributes, Properties, Resource, ResourceBackend,
    ResourceConfig, ResourceKind, UNKNOWN, VendorObject, ensure_id,
};
pub use template::UrlTemplate;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, ResponseData};
pub use waiter::{WaitOptions, WaitOutcome};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

pub use tokio_util::sync::CancellationToken;
