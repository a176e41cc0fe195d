//! SSH keys

use crate::catalog::endpoints::{SSH_KEY, SSH_KEYS};
use crate::dto::{SshKeyCreate, SshKeyUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "ssh-key-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(SSH_KEYS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &SshKeyCreate) -> Result<HttpResponse> {
    client.post(SSH_KEYS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, ssh_key_id: &str) -> Result<HttpResponse> {
    client.get(SSH_KEY)?.assign_id(ID, ssh_key_id).execute().await
}

pub async fn update(
    client: &ApiClient,
    ssh_key_id: &str,
    body: &SshKeyUpdate,
) -> Result<HttpResponse> {
    client
        .patch(SSH_KEY)?
        .assign_id(ID, ssh_key_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, ssh_key_id: &str) -> Result<HttpResponse> {
    client.delete(SSH_KEY)?.assign_id(ID, ssh_key_id).execute().await
}
