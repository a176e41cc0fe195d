//! Managed databases

use crate::catalog::endpoints::{DATABASE, DATABASE_PLANS, DATABASES};
use crate::dto::{DatabaseCreate, DatabasePlanFilters, DatabaseUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "database-id";

/// `label`, `tag` and `region` filter the list.
pub async fn list(
    client: &ApiClient,
    options: &ListOptions,
    label: Option<&str>,
    tag: Option<&str>,
    region: Option<&str>,
) -> Result<HttpResponse> {
    options
        .apply(client.get(DATABASES)?)?
        .query_opt("label", label)
        .query_opt("tag", tag)
        .query_opt("region", region)
        .execute()
        .await
}

pub async fn create(client: &ApiClient, body: &DatabaseCreate) -> Result<HttpResponse> {
    client.post(DATABASES)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, database_id: &str) -> Result<HttpResponse> {
    client.get(DATABASE)?.assign_id(ID, database_id).execute().await
}

pub async fn update(
    client: &ApiClient,
    database_id: &str,
    body: &DatabaseUpdate,
) -> Result<HttpResponse> {
    client
        .put(DATABASE)?
        .assign_id(ID, database_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, database_id: &str) -> Result<HttpResponse> {
    client.delete(DATABASE)?.assign_id(ID, database_id).execute().await
}

pub async fn list_plans(client: &ApiClient, filters: &DatabasePlanFilters) -> Result<HttpResponse> {
    filters.apply(client.get(DATABASE_PLANS)?).execute().await
}
