//! Kubernetes clusters and node pools

use crate::catalog::endpoints::{
    KUBERNETES_CLUSTER, KUBERNETES_CLUSTERS, KUBERNETES_CONFIG, KUBERNETES_VERSIONS, NODE_POOL,
    NODE_POOLS,
};
use crate::dto::{ClusterCreate, ClusterUpdate, NodePoolCreate, NodePoolUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "vke-id";
const POOL_ID: &str = "nodepool-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(KUBERNETES_CLUSTERS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &ClusterCreate) -> Result<HttpResponse> {
    client.post(KUBERNETES_CLUSTERS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, cluster_id: &str) -> Result<HttpResponse> {
    client
        .get(KUBERNETES_CLUSTER)?
        .assign_id(ID, cluster_id)
        .execute()
        .await
}

pub async fn update(
    client: &ApiClient,
    cluster_id: &str,
    body: &ClusterUpdate,
) -> Result<HttpResponse> {
    client
        .put(KUBERNETES_CLUSTER)?
        .assign_id(ID, cluster_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, cluster_id: &str) -> Result<HttpResponse> {
    client
        .delete(KUBERNETES_CLUSTER)?
        .assign_id(ID, cluster_id)
        .execute()
        .await
}

/// Base64-encoded kubeconfig under `kube_config`.
pub async fn kubeconfig(client: &ApiClient, cluster_id: &str) -> Result<HttpResponse> {
    client
        .get(KUBERNETES_CONFIG)?
        .assign_id(ID, cluster_id)
        .execute()
        .await
}

pub async fn list_versions(client: &ApiClient) -> Result<HttpResponse> {
    client.get(KUBERNETES_VERSIONS)?.execute().await
}

pub async fn list_node_pools(
    client: &ApiClient,
    cluster_id: &str,
    options: &ListOptions,
) -> Result<HttpResponse> {
    options
        .apply(client.get(NODE_POOLS)?.assign_id(ID, cluster_id))?
        .execute()
        .await
}

pub async fn create_node_pool(
    client: &ApiClient,
    cluster_id: &str,
    body: &NodePoolCreate,
) -> Result<HttpResponse> {
    client
        .post(NODE_POOLS)?
        .assign_id(ID, cluster_id)
        .payload(body)
        .execute()
        .await
}

pub async fn get_node_pool(
    client: &ApiClient,
    cluster_id: &str,
    pool_id: &str,
) -> Result<HttpResponse> {
    client
        .get(NODE_POOL)?
        .assign_id(ID, cluster_id)
        .assign_id(POOL_ID, pool_id)
        .execute()
        .await
}

pub async fn update_node_pool(
    client: &ApiClient,
    cluster_id: &str,
    pool_id: &str,
    body: &NodePoolUpdate,
) -> Result<HttpResponse> {
    client
        .patch(NODE_POOL)?
        .assign_id(ID, cluster_id)
        .assign_id(POOL_ID, pool_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete_node_pool(
    client: &ApiClient,
    cluster_id: &str,
    pool_id: &str,
) -> Result<HttpResponse> {
    client
        .delete(NODE_POOL)?
        .assign_id(ID, cluster_id)
        .assign_id(POOL_ID, pool_id)
        .execute()
        .await
}
