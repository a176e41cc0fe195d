//! Snapshots

use crate::catalog::endpoints::{SNAPSHOT, SNAPSHOT_FROM_URL, SNAPSHOTS};
use crate::dto::{SnapshotCreate, SnapshotCreateFromUrl, SnapshotUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "snapshot-id";

pub async fn list(
    client: &ApiClient,
    options: &ListOptions,
    description: Option<&str>,
) -> Result<HttpResponse> {
    options
        .apply(client.get(SNAPSHOTS)?)?
        .query_opt("description", description)
        .execute()
        .await
}

pub async fn create(client: &ApiClient, body: &SnapshotCreate) -> Result<HttpResponse> {
    client.post(SNAPSHOTS)?.payload(body).execute().await
}

pub async fn create_from_url(
    client: &ApiClient,
    body: &SnapshotCreateFromUrl,
) -> Result<HttpResponse> {
    client.post(SNAPSHOT_FROM_URL)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, snapshot_id: &str) -> Result<HttpResponse> {
    client.get(SNAPSHOT)?.assign_id(ID, snapshot_id).execute().await
}

pub async fn update(
    client: &ApiClient,
    snapshot_id: &str,
    body: &SnapshotUpdate,
) -> Result<HttpResponse> {
    client
        .put(SNAPSHOT)?
        .assign_id(ID, snapshot_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, snapshot_id: &str) -> Result<HttpResponse> {
    client.delete(SNAPSHOT)?.assign_id(ID, snapshot_id).execute().await
}
