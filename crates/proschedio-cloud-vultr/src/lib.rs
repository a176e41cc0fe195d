//! Vultr provider for Proschedio
//!
//! Vultr API v2 support:
//! - Endpoint catalog covering compute, storage, networking, DNS, managed
//!   databases and Kubernetes
//! - Typed request bodies ([`dto`]) with vendor-side validation rules
//! - Endpoint adapters ([`api`]) returning responses verbatim
//! - [`VultrBackend`], the per-kind resource semantics
//!
//! Register [`VultrFactory`] with a `ResourceManager` to make `"vultr"`
//! available by name.

pub mod api;
pub mod catalog;
pub mod dto;
mod handlers;
mod provider;

pub use catalog::{DEFAULT_BASE_URL, PROVIDER, catalog};
pub use handlers::VultrBackend;
pub use provider::{VULTR_API_KEY_ENV, VultrFactory, VultrProvider};
