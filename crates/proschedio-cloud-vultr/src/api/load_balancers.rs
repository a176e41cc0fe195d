//! Load balancers, their forwarding rules and firewall rules

use crate::catalog::endpoints::{
    LB_FIREWALL_RULE, LB_FIREWALL_RULES, LB_FORWARDING_RULE, LB_FORWARDING_RULES, LOAD_BALANCER,
    LOAD_BALANCERS,
};
use crate::dto::{ForwardingRule, LoadBalancerCreate, LoadBalancerUpdate};
use proschedio_cloud::{ApiClient, HttpResponse, ListOptions, Result};

const ID: &str = "load-balancer-id";

pub async fn list(client: &ApiClient, options: &ListOptions) -> Result<HttpResponse> {
    options.apply(client.get(LOAD_BALANCERS)?)?.execute().await
}

pub async fn create(client: &ApiClient, body: &LoadBalancerCreate) -> Result<HttpResponse> {
    client.post(LOAD_BALANCERS)?.payload(body).execute().await
}

pub async fn get(client: &ApiClient, load_balancer_id: &str) -> Result<HttpResponse> {
    client
        .get(LOAD_BALANCER)?
        .assign_id(ID, load_balancer_id)
        .execute()
        .await
}

pub async fn update(
    client: &ApiClient,
    load_balancer_id: &str,
    body: &LoadBalancerUpdate,
) -> Result<HttpResponse> {
    client
        .patch(LOAD_BALANCER)?
        .assign_id(ID, load_balancer_id)
        .payload(body)
        .execute()
        .await
}

pub async fn delete(client: &ApiClient, load_balancer_id: &str) -> Result<HttpResponse> {
    client
        .delete(LOAD_BALANCER)?
        .assign_id(ID, load_balancer_id)
        .execute()
        .await
}

pub async fn list_forwarding_rules(
    client: &ApiClient,
    load_balancer_id: &str,
    options: &ListOptions,
) -> Result<HttpResponse> {
    options
        .apply(client.get(LB_FORWARDING_RULES)?.assign_id(ID, load_balancer_id))?
        .execute()
        .await
}

pub async fn create_forwarding_rule(
    client: &ApiClient,
    load_balancer_id: &str,
    body: &ForwardingRule,
) -> Result<HttpResponse> {
    client
        .post(LB_FORWARDING_RULES)?
        .assign_id(ID, load_balancer_id)
        .payload(body)
        .execute()
        .await
}

pub async fn get_forwarding_rule(
    client: &ApiClient,
    load_balancer_id: &str,
    rule_id: &str,
) -> Result<HttpResponse> {
    client
        .get(LB_FORWARDING_RULE)?
        .assign_id(ID, load_balancer_id)
        .assign_id("forwarding-rule-id", rule_id)
        .execute()
        .await
}

pub async fn delete_forwarding_rule(
    client: &ApiClient,
    load_balancer_id: &str,
    rule_id: &str,
) -> Result<HttpResponse> {
    client
        .delete(LB_FORWARDING_RULE)?
        .assign_id(ID, load_balancer_id)
        .assign_id("forwarding-rule-id", rule_id)
        .execute()
        .await
}

pub async fn list_firewall_rules(
    client: &ApiClient,
    load_balancer_id: &str,
    options: &ListOptions,
) -> Result<HttpResponse> {
    options
        .apply(client.get(LB_FIREWALL_RULES)?.assign_id(ID, load_balancer_id))?
        .execute()
        .await
}

pub async fn get_firewall_rule(
    client: &ApiClient,
    load_balancer_id: &str,
    rule_id: &str,
) -> Result<HttpResponse> {
    client
        .get(LB_FIREWALL_RULE)?
        .assign_id(ID, load_balancer_id)
        .assign_id("firewall-rule-id", rule_id)
        .execute()
        .await
}
