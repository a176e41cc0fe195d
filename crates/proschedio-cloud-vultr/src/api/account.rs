//! Account and reference data

use crate::catalog::endpoints::{ACCOUNT, OS, PLANS, REGIONS};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

pub async fn get(client: &ApiClient) -> Result<HttpResponse> {
    client.get(ACCOUNT)?.execute().await
}

pub async fn list_regions(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(REGIONS)?)?.execute().await
}

/// `plan_type` narrows by family (`"vc2"`, `"vhf"`, ...); `os` by OS id.
pub async fn list_plans(
    client: &ApiClient,
    options: &ListOptions,
    plan_type: Option<&str>,
    os: Option<&str>,
) -> Result<HttpResponse> {
    options
        .apply(client.get(PLANS)?)?
        .query_opt("type", plan_type)
        .query_opt("os", os)
        .execute()
        .await
}

pub async fn list_os(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(OS)?)?.execute().await
}
