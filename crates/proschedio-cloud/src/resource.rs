//! Resource handles
//!
//! A [`Resource`] is the caller-facing handle for one resource on one
//! provider. It owns the `UNBOUND → ACTIVE → TERMINAL` state machine and the
//! normalized attribute view; the vendor work is delegated to a
//! [`ResourceBackend`] supplied by the provider driver.

use crate::error::{CloudError, ProviderError, Result};
use crate::waiter::{self, WaitOptions, WaitOutcome};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Value returned by normalized accessors when the vendor has no such field.
pub const UNKNOWN: &str = "unknown";

/// Vendor fields of a resource, as last seen.
pub type Properties = Map<String, Value>;

/// Every resource kind the library knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Instance,
    BlockStorage,
    DnsDomain,
    LoadBalancer,
    Database,
    KubernetesCluster,
    Vpc,
    FirewallGroup,
    ReservedIp,
    SshKey,
    Snapshot,
    StartupScript,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 12] = [
        ResourceKind::Instance,
        ResourceKind::BlockStorage,
        ResourceKind::DnsDomain,
        ResourceKind::LoadBalancer,
        ResourceKind::Database,
        ResourceKind::KubernetesCluster,
        ResourceKind::Vpc,
        ResourceKind::FirewallGroup,
        ResourceKind::ReservedIp,
        ResourceKind::SshKey,
        ResourceKind::Snapshot,
        ResourceKind::StartupScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Instance => "instance",
            ResourceKind::BlockStorage => "block-storage",
            ResourceKind::DnsDomain => "dns-domain",
            ResourceKind::LoadBalancer => "load-balancer",
            ResourceKind::Database => "database",
            ResourceKind::KubernetesCluster => "kubernetes-cluster",
            ResourceKind::Vpc => "vpc",
            ResourceKind::FirewallGroup => "firewall-group",
            ResourceKind::ReservedIp => "reserved-ip",
            ResourceKind::SshKey => "ssh-key",
            ResourceKind::Snapshot => "snapshot",
            ResourceKind::StartupScript => "startup-script",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CloudError::config(format!("unknown resource kind '{}'", s)))
    }
}

/// Normalized attributes every handle exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Status,
    Region,
    PrimaryAddress,
    Hostname,
    Label,
    Plan,
    CreatedAt,
    Tags,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Status,
        Attribute::Region,
        Attribute::PrimaryAddress,
        Attribute::Hostname,
        Attribute::Label,
        Attribute::Plan,
        Attribute::CreatedAt,
        Attribute::Tags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Status => "status",
            Attribute::Region => "region",
            Attribute::PrimaryAddress => "primary_address",
            Attribute::Hostname => "hostname",
            Attribute::Label => "label",
            Attribute::Plan => "plan",
            Attribute::CreatedAt => "created_at",
            Attribute::Tags => "tags",
        }
    }
}

/// All normalized attributes at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAttributes {
    pub status: String,
    pub region: String,
    pub primary_address: String,
    pub hostname: String,
    pub label: String,
    pub plan: String,
    pub created_at: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Configured, not yet created.
    Unbound,
    /// Bound to a vendor resource id.
    Active,
    /// Deleted, or found gone; no further operations.
    Terminal,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleState::Unbound => write!(f, "unbound"),
            HandleState::Active => write!(f, "active"),
            HandleState::Terminal => write!(f, "terminal"),
        }
    }
}

/// A resource as returned by a vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorObject {
    /// The resource's own fields, with any envelope removed.
    pub properties: Properties,
    /// The full response body.
    pub raw: Value,
}

impl VendorObject {
    pub fn new(properties: Properties, raw: Value) -> Self {
        Self { properties, raw }
    }
}

/// Creation parameters for a handle.
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    params: Map<String, Value>,
    wait: Option<WaitOptions>,
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(params) => Ok(Self { params, wait: None }),
            other => Err(CloudError::validation(format!(
                "resource config must be a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Wait for the kind's readiness predicate after `create`.
    pub fn wait(mut self, options: WaitOptions) -> Self {
        self.wait = Some(options);
        self
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn wait_options(&self) -> Option<&WaitOptions> {
        self.wait.as_ref()
    }
}

/// Vendor side of one resource kind.
///
/// Implementations interpret statuses: they return `Ok(None)` from `fetch`
/// on a not-found answer and raise [`CloudError::Provider`] for anything
/// else outside their expected set.
#[async_trait]
pub trait ResourceBackend: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Property holding the vendor id.
    fn id_field(&self) -> &'static str {
        "id"
    }

    /// Dot-separated property path for a normalized attribute.
    fn attribute_key(&self, attribute: Attribute) -> Option<&'static str>;

    /// Readiness predicate used by [`Resource::wait_until_ready`].
    fn is_ready(&self, properties: &Properties) -> bool {
        let _ = properties;
        true
    }

    async fn create(&self, params: &Map<String, Value>) -> Result<VendorObject>;

    async fn fetch(&self, id: &str) -> Result<Option<VendorObject>>;

    /// `Ok(None)` when the vendor acknowledged without returning the object.
    async fn update(&self, id: &str, patch: &Map<String, Value>) -> Result<Option<VendorObject>>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Refuse empty ids before they reach a URL.
pub fn ensure_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CloudError::validation("resource id must not be empty"));
    }
    Ok(())
}

/// Caller-facing handle for one resource.
///
/// Cancelling `create` (dropping its future) may leave the resource existing
/// on the vendor side; nothing is rolled back.
pub struct Resource {
    provider: String,
    kind: ResourceKind,
    id: Option<String>,
    config: ResourceConfig,
    properties: Properties,
    raw: Option<Value>,
    state: HandleState,
    backend: Arc<dyn ResourceBackend>,
}

impl Resource {
    /// An UNBOUND handle that `create` will provision.
    pub fn new(
        provider: impl Into<String>,
        config: ResourceConfig,
        backend: Arc<dyn ResourceBackend>,
    ) -> Self {
        Self {
            provider: provider.into(),
            kind: backend.kind(),
            id: None,
            config,
            properties: Properties::new(),
            raw: None,
            state: HandleState::Unbound,
            backend,
        }
    }

    /// An ACTIVE handle for an existing resource. Nothing is fetched.
    pub fn bound(
        provider: impl Into<String>,
        id: impl Into<String>,
        backend: Arc<dyn ResourceBackend>,
    ) -> Result<Self> {
        let id = id.into();
        ensure_id(&id)?;
        let mut resource = Self::new(provider, ResourceConfig::default(), backend);
        resource.id = Some(id);
        resource.state = HandleState::Active;
        Ok(resource)
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The vendor's last full response for this resource.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.state == HandleState::Active && self.backend.is_ready(&self.properties)
    }

    fn require(&self, state: HandleState, operation: &str) -> Result<()> {
        if self.state == state {
            return Ok(());
        }
        Err(CloudError::usage(format!(
            "cannot {} {} on provider '{}': handle is {}",
            operation, self.kind, self.provider, self.state
        )))
    }

    fn active_id(&self, operation: &str) -> Result<String> {
        self.require(HandleState::Active, operation)?;
        self.id
            .clone()
            .ok_or_else(|| CloudError::usage(format!("{} handle has no id", self.kind)))
    }

    fn absorb(&mut self, object: VendorObject) {
        self.properties = object.properties;
        self.raw = Some(object.raw);
    }

    fn retire(&mut self) {
        self.id = None;
        self.properties.clear();
        self.raw = None;
        self.state = HandleState::Terminal;
    }

    /// Provision the resource, then wait for readiness if the config asks.
    pub async fn create(&mut self) -> Result<()> {
        self.require(HandleState::Unbound, "create")?;

        let object = self.backend.create(self.config.params()).await?;
        let id = object
            .properties
            .get(self.backend.id_field())
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let Some(id) = id else {
            tracing::warn!(
                "{} created on {} but the response carried no '{}'",
                self.kind,
                self.provider,
                self.backend.id_field()
            );
            return Err(CloudError::malformed(
                format!(
                    "create response for {} has no '{}' field",
                    self.kind,
                    self.backend.id_field()
                ),
                None,
            ));
        };

        tracing::info!("Created {} {} on {}", self.kind, id, self.provider);
        self.id = Some(id);
        self.absorb(object);
        self.state = HandleState::Active;

        if let Some(options) = self.config.wait_options().cloned() {
            self.wait_until_ready(&options).await?;
        }
        Ok(())
    }

    /// Refresh from the vendor. Returns `false` (and retires the handle) when
    /// the resource no longer exists.
    pub async fn get(&mut self) -> Result<bool> {
        let id = self.active_id("get")?;

        match self.backend.fetch(&id).await? {
            Some(object) => {
                self.absorb(object);
                Ok(true)
            }
            None => {
                tracing::debug!("{} {} is gone on {}", self.kind, id, self.provider);
                self.retire();
                Ok(false)
            }
        }
    }

    /// Apply `patch` and refresh properties.
    pub async fn update(&mut self, patch: &Map<String, Value>) -> Result<()> {
        let id = self.active_id("update")?;

        match self.backend.update(&id, patch).await? {
            Some(object) => self.absorb(object),
            None => {
                if !self.get().await? {
                    return Err(ProviderError::new(404, "resource disappeared after update")
                        .for_resource(id)
                        .into());
                }
            }
        }
        tracing::info!("Updated {} {} on {}", self.kind, id, self.provider);
        Ok(())
    }

    pub async fn delete(&mut self) -> Result<()> {
        let id = self.active_id("delete")?;

        self.backend.delete(&id).await?;
        tracing::info!("Deleted {} {} on {}", self.kind, id, self.provider);
        self.retire();
        Ok(())
    }

    /// Poll until the kind's readiness predicate holds.
    pub async fn wait_until_ready(&mut self, options: &WaitOptions) -> Result<WaitOutcome> {
        let backend = Arc::clone(&self.backend);
        waiter::wait_for(self, options, move |properties| backend.is_ready(properties)).await
    }

    /// Poll until `predicate` holds.
    pub async fn wait_until<F>(&mut self, options: &WaitOptions, predicate: F) -> Result<WaitOutcome>
    where
        F: Fn(&Properties) -> bool + Send,
    {
        waiter::wait_for(self, options, predicate).await
    }

    fn lookup(&self, attribute: Attribute) -> Option<&Value> {
        let key = self.backend.attribute_key(attribute)?;
        let mut parts = key.split('.');
        let first = parts.next()?;
        parts.try_fold(self.properties.get(first)?, |current, part| {
            current.get(part)
        })
    }

    /// A normalized attribute rendered as text, or [`UNKNOWN`].
    pub fn attribute(&self, attribute: Attribute) -> String {
        match self.lookup(attribute) {
            None | Some(Value::Null) => UNKNOWN.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(value_text)
                .collect::<Vec<_>>()
                .join(","),
            Some(other) => other.to_string(),
        }
    }

    pub fn status(&self) -> String {
        self.attribute(Attribute::Status)
    }

    pub fn region(&self) -> String {
        self.attribute(Attribute::Region)
    }

    pub fn primary_address(&self) -> String {
        self.attribute(Attribute::PrimaryAddress)
    }

    pub fn hostname(&self) -> String {
        self.attribute(Attribute::Hostname)
    }

    pub fn label(&self) -> String {
        self.attribute(Attribute::Label)
    }

    pub fn plan(&self) -> String {
        self.attribute(Attribute::Plan)
    }

    pub fn created_at(&self) -> String {
        self.attribute(Attribute::CreatedAt)
    }

    /// `created_at` parsed as RFC 3339.
    pub fn created_at_time(&self) -> Option<DateTime<FixedOffset>> {
        self.lookup(Attribute::CreatedAt)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }

    pub fn tags(&self) -> Vec<String> {
        match self.lookup(Attribute::Tags) {
            Some(Value::Array(items)) => items.iter().map(value_text).collect(),
            Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn attributes(&self) -> NormalizedAttributes {
        NormalizedAttributes {
            status: self.status(),
            region: self.region(),
            primary_address: self.primary_address(),
            hostname: self.hostname(),
            label: self.label(),
            plan: self.plan(),
            created_at: self.created_at(),
            tags: self.tags(),
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("provider", &self.provider)
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("state", &self.state)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
