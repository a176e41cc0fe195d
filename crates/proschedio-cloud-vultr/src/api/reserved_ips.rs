//! Reserved IPs

use crate::catalog::endpoints::{
    RESERVED_IP, RESERVED_IP_ATTACH, RESERVED_IP_CONVERT, RESERVED_IP_DETACH, RESERVED_IPS,
};
use crate::dto::{ReservedIpAttach, ReservedIpConvert, ReservedIpCreate, ReservedIpUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "reserved-ip";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(RESERVED_IPS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &ReservedIpCreate) -> Result<HttpResponse> {
    client.post(RESERVED_IPS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, reserved_ip: &str) -> Result<HttpResponse> {
    client.get(RESERVED_IP)?.assign_id(ID, reserved_ip).execute().await
}

pub async fn update(
    client: &ApiClient,
    reserved_ip: &str,
    body: &ReservedIpUpdate,
) -> Result<HttpResponse> {
    client
        .patch(RESERVED_IP)?
        .assign_id(ID, reserved_ip)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, reserved_ip: &str) -> Result<HttpResponse> {
    client.delete(RESERVED_IP)?.assign_id(ID, reserved_ip).execute().await
}

pub async fn attach(
    client: &ApiClient,
    reserved_ip: &str,
    body: &ReservedIpAttach,
) -> Result<HttpResponse> {
    client
        .post(RESERVED_IP_ATTACH)?
        .assign_id(ID, reserved_ip)
        .payload(body)
        .execute()
        .await
}

pub async fn detach(client: &ApiClient, reserved_ip: &str) -> Result<HttpResponse> {
    client
        .post(RESERVED_IP_DETACH)?
        .assign_id(ID, reserved_ip)
        .execute()
        .await
}

pub async fn convert(client: &ApiClient, body: &ReservedIpConvert) -> Result<HttpResponse> {
    client.post(RESERVED_IP_CONVERT)?.payload(body).execute().await
}
