//! Block storage

use crate::catalog::endpoints::{BLOCK, BLOCK_ATTACH, BLOCK_DETACH, BLOCKS};
use crate::dto::{BlockAttach, BlockCreate, BlockDetach, BlockUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "block-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(BLOCKS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &BlockCreate) -> Result<HttpResponse> {
    client.post(BLOCKS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, block_id: &str) -> Result<HttpResponse> {
    client.get(BLOCK)?.assign_id(ID, block_id).execute().await
}

pub async fn update(client: &ApiClient, block_id: &str, body: &BlockUpdate) -> Result<HttpResponse> {
    client
        .patch(BLOCK)?
        .assign_id(ID, block_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, block_id: &str) -> Result<HttpResponse> {
    client.delete(BLOCK)?.assign_id(ID, block_id).execute().await
}

pub async fn attach(client: &ApiClient, block_id: &str, body: &BlockAttach) -> Result<HttpResponse> {
    client
        .post(BLOCK_ATTACH)?
        .assign_id(ID, block_id)
        .payload(body)
        .execute()
        .await
}

pub async fn detach(client: &ApiClient, block_id: &str, body: &BlockDetach) -> Result<HttpResponse> {
    client
        .post(BLOCK_DETACH)?
        .assign_id(ID, block_id)
        .payload(body)
        .execute()
        .await
}
