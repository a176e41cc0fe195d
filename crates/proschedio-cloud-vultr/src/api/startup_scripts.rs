//! Startup scripts

use crate::catalog::endpoints::{STARTUP_SCRIPT, STARTUP_SCRIPTS};
use crate::dto::{StartupScriptCreate, StartupScriptUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "startup-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(STARTUP_SCRIPTS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &StartupScriptCreate) -> Result<HttpResponse> {
    client.post(STARTUP_SCRIPTS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, script_id: &str) -> Result<HttpResponse> {
    client.get(STARTUP_SCRIPT)?.assign_id(ID, script_id).execute().await
}

pub async fn update(
    client: &ApiClient,
    script_id: &str,
    body: &StartupScriptUpdate,
) -> Result<HttpResponse> {
    client
        .patch(STARTUP_SCRIPT)?
        .assign_id(ID, script_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, script_id: &str) -> Result<HttpResponse> {
    client.delete(STARTUP_SCRIPT)?.assign_id(ID, script_id).execute().await
}
