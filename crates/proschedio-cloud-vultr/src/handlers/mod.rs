//! Resource backends
//!
//! [`VultrBackend`] gives the core's handle state machine its Vultr
//! semantics: which adapter to call per kind, which statuses count as
//! success, and where the resource sits in the response envelope.

mod attributes;

use crate::api;
use crate::dto::{
    BlockCreate, BlockUpdate, ClusterCreate, ClusterUpdate, DatabaseCreate, DatabaseUpdate,
    DomainCreate, DomainUpdate, FirewallGroupCreate, FirewallGroupUpdate, InstanceCreate,
    InstanceUpdate, LoadBalancerCreate, LoadBalancerUpdate, ReservedIpCreate, ReservedIpUpdate,
    SnapshotCreate, SnapshotCreateFromUrl, SnapshotUpdate, SshKeyCreate, SshKeyUpdate,
    StartupScriptCreate, StartupScriptUpdate, VpcCreate, VpcUpdate,
};
use async_trait::async_trait;
use proschedio_cloud::{
    ApiClient, Attribute, CloudError, HttpResponse, Properties, ResourceBackend, ResourceKind,
    Result, VendorObject, ensure_id, from_params,
};
use serde_json::{Map, Value};

const CREATE_STATUSES: &[u16] = &[200, 201, 202];
const FETCH_STATUSES: &[u16] = &[200];
const UPDATE_STATUSES: &[u16] = &[200, 202, 204];
const DELETE_STATUSES: &[u16] = &[200, 204];

/// Key wrapping the resource in Vultr's single-object responses.
fn envelope_key(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Instance => "instance",
        ResourceKind::BlockStorage => "block",
        ResourceKind::DnsDomain => "domain",
        ResourceKind::LoadBalancer => "load_balancer",
        ResourceKind::Database => "database",
        ResourceKind::KubernetesCluster => "vke_cluster",
        ResourceKind::Vpc => "vpc",
        ResourceKind::FirewallGroup => "firewall_group",
        ResourceKind::ReservedIp => "reserved_ip",
        ResourceKind::SshKey => "ssh_key",
        ResourceKind::Snapshot => "snapshot",
        ResourceKind::StartupScript => "startup_script",
    }
}

/// One Vultr resource kind behind the uniform backend contract.
#[derive(Clone)]
pub struct VultrBackend {
    client: ApiClient,
    kind: ResourceKind,
}

impl VultrBackend {
    pub fn new(client: ApiClient, kind: ResourceKind) -> Self {
        Self { client, kind }
    }

    /// The resource object inside `response`, if the body has one.
    fn object_in(&self, response: HttpResponse) -> Option<VendorObject> {
        let raw = response.into_json()?;
        let properties = raw.get(envelope_key(self.kind))?.as_object()?.clone();
        Some(VendorObject::new(properties, raw))
    }

    /// Best-effort id from a body that could not be unwrapped.
    fn salvage_id(&self, response: &HttpResponse) -> Option<String> {
        let raw = response.json_value()?;
        let id_field = self.id_field();
        raw.get(envelope_key(self.kind))
            .and_then(|inner| inner.get(id_field))
            .or_else(|| raw.get(id_field))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    async fn send_create(&self, params: &Map<String, Value>) -> Result<HttpResponse> {
        let client = &self.client;
        match self.kind {
            ResourceKind::Instance => {
                api::instances::create(client, &from_params::<InstanceCreate>(params)?).await
            }
            ResourceKind::BlockStorage => {
                api::blocks::create(client, &from_params::<BlockCreate>(params)?).await
            }
            ResourceKind::DnsDomain => {
                api::dns::create(client, &from_params::<DomainCreate>(params)?).await
            }
            ResourceKind::LoadBalancer => {
                api::load_balancers::create(client, &from_params::<LoadBalancerCreate>(params)?)
                    .await
            }
            ResourceKind::Database => {
                api::databases::create(client, &from_params::<DatabaseCreate>(params)?).await
            }
            ResourceKind::KubernetesCluster => {
                api::kubernetes::create(client, &from_params::<ClusterCreate>(params)?).await
            }
            ResourceKind::Vpc => api::vpcs::create(client, &from_params::<VpcCreate>(params)?).await,
            ResourceKind::FirewallGroup => {
                api::firewalls::create(client, &from_params::<FirewallGroupCreate>(params)?).await
            }
            ResourceKind::ReservedIp => {
                api::reserved_ips::create(client, &from_params::<ReservedIpCreate>(params)?).await
            }
            ResourceKind::SshKey => {
                api::ssh_keys::create(client, &from_params::<SshKeyCreate>(params)?).await
            }
            // A `url` parameter selects the import endpoint.
            ResourceKind::Snapshot if params.contains_key("url") => {
                api::snapshots::create_from_url(
                    client,
                    &from_params::<SnapshotCreateFromUrl>(params)?,
                )
                .await
            }
            ResourceKind::Snapshot => {
                api::snapshots::create(client, &from_params::<SnapshotCreate>(params)?).await
            }
            ResourceKind::StartupScript => {
                api::startup_scripts::create(client, &from_params::<StartupScriptCreate>(params)?)
                    .await
            }
        }
    }

    async fn send_get(&self, id: &str) -> Result<HttpResponse> {
        let client = &self.client;
        match self.kind {
            ResourceKind::Instance => api::instances::get(client, id).await,
            ResourceKind::BlockStorage => api::blocks::get(client, id).await,
            ResourceKind::DnsDomain => api::dns::get(client, id).await,
            ResourceKind::LoadBalancer => api::load_balancers::get(client, id).await,
            ResourceKind::Database => api::databases::get(client, id).await,
            ResourceKind::KubernetesCluster => api::kubernetes::get(client, id).await,
            ResourceKind::Vpc => api::vpcs::get(client, id).await,
            ResourceKind::FirewallGroup => api::firewalls::get(client, id).await,
            ResourceKind::ReservedIp => api::reserved_ips::get(client, id).await,
            ResourceKind::SshKey => api::ssh_keys::get(client, id).await,
            ResourceKind::Snapshot => api::snapshots::get(client, id).await,
            ResourceKind::StartupScript => api::startup_scripts::get(client, id).await,
        }
    }

    async fn send_update(&self, id: &str, patch: &Map<String, Value>) -> Result<HttpResponse> {
        let client = &self.client;
        match self.kind {
            ResourceKind::Instance => {
                api::instances::update(client, id, &from_params::<InstanceUpdate>(patch)?).await
            }
            ResourceKind::BlockStorage => {
                api::blocks::update(client, id, &from_params::<BlockUpdate>(patch)?).await
            }
            ResourceKind::DnsDomain => {
                api::dns::update(client, id, &from_params::<DomainUpdate>(patch)?).await
            }
            ResourceKind::LoadBalancer => {
                let body = from_params::<LoadBalancerUpdate>(patch)?;
                api::load_balancers::update(client, id, &body).await
            }
            ResourceKind::Database => {
                api::databases::update(client, id, &from_params::<DatabaseUpdate>(patch)?).await
            }
            ResourceKind::KubernetesCluster => {
                api::kubernetes::update(client, id, &from_params::<ClusterUpdate>(patch)?).await
            }
            ResourceKind::Vpc => {
                api::vpcs::update(client, id, &from_params::<VpcUpdate>(patch)?).await
            }
            ResourceKind::FirewallGroup => {
                let body = from_params::<FirewallGroupUpdate>(patch)?;
                api::firewalls::update(client, id, &body).await
            }
            ResourceKind::ReservedIp => {
                let body = from_params::<ReservedIpUpdate>(patch)?;
                api::reserved_ips::update(client, id, &body).await
            }
            ResourceKind::SshKey => {
                api::ssh_keys::update(client, id, &from_params::<SshKeyUpdate>(patch)?).await
            }
            ResourceKind::Snapshot => {
                api::snapshots::update(client, id, &from_params::<SnapshotUpdate>(patch)?).await
            }
            ResourceKind::StartupScript => {
                let body = from_params::<StartupScriptUpdate>(patch)?;
                api::startup_scripts::update(client, id, &body).await
            }
        }
    }

    async fn send_delete(&self, id: &str) -> Result<HttpResponse> {
        let client = &self.client;
        match self.kind {
            ResourceKind::Instance => api::instances::delete(client, id).await,
            ResourceKind::BlockStorage => api::blocks::delete(client, id).await,
            ResourceKind::DnsDomain => api::dns::delete(client, id).await,
            ResourceKind::LoadBalancer => api::load_balancers::delete(client, id).await,
            ResourceKind::Database => api::databases::delete(client, id).await,
            ResourceKind::KubernetesCluster => api::kubernetes::delete(client, id).await,
            ResourceKind::Vpc => api::vpcs::delete(client, id).await,
            ResourceKind::FirewallGroup => api::firewalls::delete(client, id).await,
            ResourceKind::ReservedIp => api::reserved_ips::delete(client, id).await,
            ResourceKind::SshKey => api::ssh_keys::delete(client, id).await,
            ResourceKind::Snapshot => api::snapshots::delete(client, id).await,
            ResourceKind::StartupScript => api::startup_scripts::delete(client, id).await,
        }
    }
}

#[async_trait]
impl ResourceBackend for VultrBackend {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn id_field(&self) -> &'static str {
        match self.kind {
            ResourceKind::DnsDomain => "domain",
            _ => "id",
        }
    }

    fn attribute_key(&self, attribute: Attribute) -> Option<&'static str> {
        attributes::attribute_key(self.kind, attribute)
    }

    fn is_ready(&self, properties: &Properties) -> bool {
        attributes::is_ready(self.kind, properties)
    }

    async fn create(&self, params: &Map<String, Value>) -> Result<VendorObject> {
        let response = self.send_create(params).await?;
        if !CREATE_STATUSES.contains(&response.status) {
            return Err(response.provider_error().into());
        }

        let salvaged = self.salvage_id(&response);
        let status = response.status;
        self.object_in(response).ok_or_else(|| {
            CloudError::malformed(
                format!(
                    "create {} returned {} without a '{}' object",
                    self.kind,
                    status,
                    envelope_key(self.kind)
                ),
                salvaged,
            )
        })
    }

    async fn fetch(&self, id: &str) -> Result<Option<VendorObject>> {
        ensure_id(id)?;
        let response = self.send_get(id).await?;
        if response.status == 404 {
            return Ok(None);
        }
        if !FETCH_STATUSES.contains(&response.status) {
            return Err(response.provider_error().for_resource(id).into());
        }

        match self.object_in(response) {
            Some(object) => Ok(Some(object)),
            None => Err(CloudError::malformed(
                format!("{} {} response has no '{}' object", self.kind, id, envelope_key(self.kind)),
                Some(id.to_string()),
            )),
        }
    }

    async fn update(&self, id: &str, patch: &Map<String, Value>) -> Result<Option<VendorObject>> {
        ensure_id(id)?;
        let response = self.send_update(id, patch).await?;
        if !UPDATE_STATUSES.contains(&response.status) {
            return Err(response.provider_error().for_resource(id).into());
        }
        // Most Vultr updates answer 204; the handle refetches.
        Ok(self.object_in(response))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        ensure_id(id)?;
        let response = self.send_delete(id).await?;
        if !DELETE_STATUSES.contains(&response.status) {
            return Err(response.provider_error().for_resource(id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_BASE_URL, PROVIDER, catalog};
    use proschedio_cloud::{
        Credential, ErrorKind, HandleState, Method, MockTransport, ProviderRegistry, Resource,
        ResourceConfig,
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn backend(kind: ResourceKind) -> (Arc<MockTransport>, Arc<VultrBackend>) {
        let registry = ProviderRegistry::new();
        registry.register(PROVIDER, DEFAULT_BASE_URL).unwrap();
        let transport = Arc::new(MockTransport::new());
        let client = ApiClient::new(
            registry,
            Arc::new(catalog().unwrap()),
            transport.clone(),
            Credential::new("test-key").unwrap(),
            Duration::from_secs(5),
        );
        (transport, Arc::new(VultrBackend::new(client, kind)))
    }

    fn instance_config() -> ResourceConfig {
        ResourceConfig::new()
            .param("region", "ewr")
            .param("plan", "vc2-1c-1gb")
            .param("os_id", 2284)
    }

    #[tokio::test]
    async fn test_create_unwraps_envelope() {
        let (transport, backend) = backend(ResourceKind::Instance);
        transport.push_json(
            202,
            json!({"instance": {"id": "i-1", "status": "pending", "region": "ewr", "main_ip": "0.0.0.0"}}),
        );

        let mut resource = Resource::new(PROVIDER, instance_config(), backend);
        resource.create().await.unwrap();

        assert_eq!(resource.id(), Some("i-1"));
        assert_eq!(resource.status(), "pending");
        assert_eq!(resource.primary_address(), "0.0.0.0");
        assert_eq!(resource.hostname(), "unknown");

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://api.vultr.com/v2/instances");
        assert_eq!(requests[0].header("Authorization"), Some("Bearer test-key"));
        assert_eq!(
            requests[0].json_body(),
            Some(json!({"region": "ewr", "plan": "vc2-1c-1gb", "os_id": 2284}))
        );
    }

    #[tokio::test]
    async fn test_invalid_params_fail_before_io() {
        let (transport, backend) = backend(ResourceKind::Instance);
        let config = ResourceConfig::new().param("region", "ewr").param("plan", "p");

        let mut resource = Resource::new(PROVIDER, config, backend);
        let err = resource.create().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(resource.state(), HandleState::Unbound);
    }

    #[tokio::test]
    async fn test_unexpected_create_status_is_provider_error() {
        let (transport, backend) = backend(ResourceKind::Instance);
        transport.push_json(400, json!({"error": "Invalid plan", "status": 400}));

        let mut resource = Resource::new(PROVIDER, instance_config(), backend);
        let err = resource.create().await.unwrap_err();

        let provider = err.as_provider_error().unwrap();
        assert_eq!(provider.status, 400);
        assert_eq!(provider.vendor_code.as_deref(), Some("Invalid plan"));
        assert_eq!(resource.state(), HandleState::Unbound);
    }

    #[tokio::test]
    async fn test_success_without_envelope_salvages_id() {
        let (transport, backend) = backend(ResourceKind::Instance);
        transport.push_json(202, json!({"id": "i-9"}));

        let err = backend.create(instance_config().params()).await.unwrap_err();

        match err {
            CloudError::MalformedResponse { resource_id, .. } => {
                assert_eq!(resource_id.as_deref(), Some("i-9"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_none() {
        let (transport, backend) = backend(ResourceKind::BlockStorage);
        transport.push_json(404, json!({"error": "Block storage not found", "status": 404}));

        assert!(backend.fetch("b-1").await.unwrap().is_none());
        assert_eq!(transport.requests()[0].url, "https://api.vultr.com/v2/blocks/b-1");
    }

    #[tokio::test]
    async fn test_fetch_server_error_names_resource() {
        let (transport, backend) = backend(ResourceKind::Vpc);
        transport.push_json(500, json!({"error": "boom"}));

        let err = backend.fetch("v-1").await.unwrap_err();
        let provider = err.as_provider_error().unwrap();
        assert_eq!(provider.status, 500);
        assert_eq!(provider.resource_id.as_deref(), Some("v-1"));
    }

    #[tokio::test]
    async fn test_update_no_content_refetches() {
        let (transport, backend) = backend(ResourceKind::BlockStorage);
        transport.push_json(200, json!({"block": {"id": "b-1", "label": "old"}}));
        transport.push(HttpResponse::empty(204));
        transport.push_json(200, json!({"block": {"id": "b-1", "label": "new"}}));

        let mut resource = Resource::bound(PROVIDER, "b-1", backend).unwrap();
        resource.get().await.unwrap();
        let patch = json!({"label": "new"});
        resource.update(patch.as_object().unwrap()).await.unwrap();

        assert_eq!(resource.label(), "new");
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].method, Method::Patch);
        assert_eq!(requests[1].json_body(), Some(json!({"label": "new"})));
    }

    #[tokio::test]
    async fn test_update_then_refetch_not_found() {
        let (transport, backend) = backend(ResourceKind::Vpc);
        transport.push(HttpResponse::empty(204));
        transport.push_json(404, json!({"error": "VPC not found", "status": 404}));

        let mut resource = Resource::bound(PROVIDER, "v-1", backend).unwrap();
        let patch = json!({"description": "renamed"});
        let err = resource.update(patch.as_object().unwrap()).await.unwrap_err();

        assert_eq!(err.as_provider_error().map(|e| e.status), Some(404));
        assert_eq!(resource.state(), HandleState::Terminal);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_domain_is_keyed_by_name() {
        let (transport, backend) = backend(ResourceKind::DnsDomain);
        transport.push_json(
            201,
            json!({"domain": {"domain": "example.com", "date_created": "2024-01-02T03:04:05+00:00", "dns_sec": "disabled"}}),
        );
        transport.push(HttpResponse::empty(204));

        let config = ResourceConfig::new().param("domain", "example.com");
        let mut resource = Resource::new(PROVIDER, config, backend);
        resource.create().await.unwrap();
        assert_eq!(resource.id(), Some("example.com"));
        assert!(resource.created_at_time().is_some());

        resource.delete().await.unwrap();
        let requests = transport.requests();
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].url, "https://api.vultr.com/v2/domains/example.com");
    }

    #[tokio::test]
    async fn test_snapshot_from_url_uses_import_endpoint() {
        let (transport, backend) = backend(ResourceKind::Snapshot);
        transport.push_json(202, json!({"snapshot": {"id": "s-1", "status": "pending"}}));

        let params = json!({"url": "https://example.com/disk.raw", "description": "imported"});
        backend.create(params.as_object().unwrap()).await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://api.vultr.com/v2/snapshots/create-from-url"
        );
    }

    #[tokio::test]
    async fn test_blank_id_is_refused_before_io() {
        let (transport, backend) = backend(ResourceKind::Instance);
        transport.push(HttpResponse::empty(204));

        let err = backend.delete("").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = backend.fetch(" ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let patch = json!({"label": "web"});
        let err = backend.update("", patch.as_object().unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_handle_active() {
        let (transport, backend) = backend(ResourceKind::SshKey);
        transport.push_json(403, json!({"error": "Unauthorized"}));

        let mut resource = Resource::bound(PROVIDER, "k-1", backend).unwrap();
        let err = resource.delete().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Provider);
        assert_eq!(resource.state(), HandleState::Active);
        assert_eq!(resource.id(), Some("k-1"));
    }
}
