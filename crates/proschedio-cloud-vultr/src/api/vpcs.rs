//! VPC networks

use crate::catalog::endpoints::{VPC, VPCS};
use crate::dto::{VpcCreate, VpcUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "vpc-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(VPCS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &VpcCreate) -> Result<HttpResponse> {
    client.post(VPCS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, vpc_id: &str) -> Result<HttpResponse> {
    client.get(VPC)?.assign_id(ID, vpc_id).execute().await
}

pub async fn update(client: &ApiClient, vpc_id: &str, body: &VpcUpdate) -> Result<HttpResponse> {
    client.put(VPC)?.assign_id(ID, vpc_id).payload(body).execute().await
}

pub async fn delete(client: &ApiClient, vpc_id: &str) -> Result<HttpResponse> {
    client.delete(VPC)?.assign_id(ID, vpc_id).execute().await
}
