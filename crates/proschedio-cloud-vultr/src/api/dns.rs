//! DNS domains and records

use crate::catalog::endpoints::{
    DOMAIN, DOMAIN_DNSSEC, DOMAIN_RECORD, DOMAIN_RECORDS, DOMAIN_SOA, DOMAINS,
};
use crate::dto::{DomainCreate, DomainUpdate, RecordCreate, RecordUpdate, SoaUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const DOMAIN_NAME: &str = "dns-domain";
const RECORD_ID: &str = "record-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(DOMAINS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &DomainCreate) -> Result<HttpResponse> {
    client.post(DOMAINS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, domain: &str) -> Result<HttpResponse> {
    client.get(DOMAIN)?.assign_id(DOMAIN_NAME, domain).execute().await
}

pub async fn update(client: &ApiClient, domain: &str, body: &DomainUpdate) -> Result<HttpResponse> {
    client
        .put(DOMAIN)?
        .assign_id(DOMAIN_NAME, domain)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, domain: &str) -> Result<HttpResponse> {
    client.delete(DOMAIN)?.assign_id(DOMAIN_NAME, domain).execute().await
}

pub async fn get_soa(client: &ApiClient, domain: &str) -> Result<HttpResponse> {
    client.get(DOMAIN_SOA)?.assign_id(DOMAIN_NAME, domain).execute().await
}

pub async fn update_soa(client: &ApiClient, domain: &str, body: &SoaUpdate) -> Result<HttpResponse> {
    client
        .patch(DOMAIN_SOA)?
        .assign_id(DOMAIN_NAME, domain)
        .payload(body)
        .execute()
        .await
}

pub async fn get_dnssec(client: &ApiClient, domain: &str) -> Result<HttpResponse> {
    client.get(DOMAIN_DNSSEC)?.assign_id(DOMAIN_NAME, domain).execute().await
}

pub async fn list_records(
    client: &ApiClient,
    domain: &str,
    options: &ListOptions,
) -> Result<HttpResponse> {
    options
        .apply(client.get(DOMAIN_RECORDS)?.assign_id(DOMAIN_NAME, domain))?
        .execute()
        .await
}

pub async fn create_record(
    client: &ApiClient,
    domain: &str,
    body: &RecordCreate,
) -> Result<HttpResponse> {
    client
        .post(DOMAIN_RECORDS)?
        .assign_id(DOMAIN_NAME, domain)
        .payload(body)
        .execute()
        .await
}

pub async fn get_record(client: &ApiClient, domain: &str, record_id: &str) -> Result<HttpResponse> {
    client
        .get(DOMAIN_RECORD)?
        .assign_id(DOMAIN_NAME, domain)
        .assign_id(RECORD_ID, record_id)
        .execute()
        .await
}

pub async fn update_record(
    client: &ApiClient,
    domain: &str,
    record_id: &str,
    body: &RecordUpdate,
) -> Result<HttpResponse> {
    client
        .patch(DOMAIN_RECORD)?
        .assign_id(DOMAIN_NAME, domain)
        .assign_id(RECORD_ID, record_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete_record(
    client: &ApiClient,
    domain: &str,
    record_id: &str,
) -> Result<HttpResponse> {
    client
        .delete(DOMAIN_RECORD)?
        .assign_id(DOMAIN_NAME, domain)
        .assign_id(RECORD_ID, record_id)
        .execute()
        .await
}
