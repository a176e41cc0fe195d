//! Firewall groups and rules

use crate::catalog::endpoints::{FIREWALL_GROUP, FIREWALL_GROUPS, FIREWALL_RULE, FIREWALL_RULES};
use crate::dto::{FirewallGroupCreate, FirewallGroupUpdate, FirewallRuleCreate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "firewall-group-id";
const RULE_ID: &str = "firewall-rule-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(FIREWALL_GROUPS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &FirewallGroupCreate) -> Result<HttpResponse> {
    client.post(FIREWALL_GROUPS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, group_id: &str) -> Result<HttpResponse> {
    client.get(FIREWALL_GROUP)?.assign_id(ID, group_id).execute().await
}

pub async fn update(
    client: &ApiClient,
    group_id: &str,
    body: &FirewallGroupUpdate,
) -> Result<HttpResponse> {
    client
        .put(FIREWALL_GROUP)?
        .assign_id(ID, group_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, group_id: &str) -> Result<HttpResponse> {
    client.delete(FIREWALL_GROUP)?.assign_id(ID, group_id).execute().await
}

pub async fn list_rules(
    client: &ApiClient,
    group_id: &str,
    options: &ListOptions,
) -> Result<HttpResponse> {
    options
        .apply(client.get(FIREWALL_RULES)?.assign_id(ID, group_id))?
        .execute()
        .await
}

pub async fn create_rule(
    client: &ApiClient,
    group_id: &str,
    body: &FirewallRuleCreate,
) -> Result<HttpResponse> {
    client
        .post(FIREWALL_RULES)?
        .assign_id(ID, group_id)
        .payload(body)
        .execute()
        .await
}

pub async fn get_rule(client: &ApiClient, group_id: &str, rule_id: &str) -> Result<HttpResponse> {
    client
        .get(FIREWALL_RULE)?
        .assign_id(ID, group_id)
        .assign_id(RULE_ID, rule_id)
        .execute()
        .await
}

pub async fn delete_rule(
    client: &ApiClient,
    group_id: &str,
    rule_id: &str,
) -> Result<HttpResponse> {
    client
        .delete(FIREWALL_RULE)?
        .assign_id(ID, group_id)
        .assign_id(RULE_ID, rule_id)
        .execute()
        .await
}
