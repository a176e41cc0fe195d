//! Compute instances

use crate::catalog::endpoints::{
    INSTANCE, INSTANCE_HALT, INSTANCE_IPV4, INSTANCE_REBOOT, INSTANCE_REINSTALL, INSTANCE_START,
    INSTANCES,
};
use crate::dto::{InstanceCreate, InstanceFilters, InstanceReinstall, InstanceUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "instance-id";

pub async fn list(
    client: &ApiClient,
    options: &ListOptions,
    filters: &InstanceFilters,
) -> Result<HttpResponse> {
    let request = options.apply(client.get(INSTANCES)?)?;
    filters.apply(request).execute().await
}

pub async fn create(client: &ApiClient, body: &InstanceCreate) -> Result<HttpResponse> {
    client.post(INSTANCES)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, instance_id: &str) -> Result<HttpResponse> {
    client.get(INSTANCE)?.assign_id(ID, instance_id).execute().await
}

pub async fn update(
    client: &ApiClient,
    instance_id: &str,
    body: &InstanceUpdate,
) -> Result<HttpResponse> {
    client
        .patch(INSTANCE)?
        .assign_id(ID, instance_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, instance_id: &str) -> Result<HttpResponse> {
    client.delete(INSTANCE)?.assign_id(ID, instance_id).execute().await
}

pub async fn start(client: &ApiClient, instance_id: &str) -> Result<HttpResponse> {
    client.post(INSTANCE_START)?.assign_id(ID, instance_id).execute().await
}

pub async fn halt(client: &ApiClient, instance_id: &str) -> Result<HttpResponse> {
    client.post(INSTANCE_HALT)?.assign_id(ID, instance_id).execute().await
}

pub async fn reboot(client: &ApiClient, instance_id: &str) -> Result<HttpResponse> {
    client.post(INSTANCE_REBOOT)?.assign_id(ID, instance_id).execute().await
}

pub async fn reinstall(
    client: &ApiClient,
    instance_id: &str,
    body: &InstanceReinstall,
) -> Result<HttpResponse> {
    client
        .post(INSTANCE_REINSTALL)?
        .assign_id(ID, instance_id)
        .payload(body)
        .execute()
        .await
}

/// `public_network` limits the list to public addresses.
pub async fn list_ipv4(
    client: &ApiClient,
    instance_id: &str,
    options: &ListOptions,
    public_network: Option<bool>,
) -> Result<HttpResponse> {
    options
        .apply(client.get(INSTANCE_IPV4)?.assign_id(ID, instance_id))?
        .query_opt("public_network", public_network)
        .execute()
        .await
}
