//! Endpoint adapters over HTTP
//!
//! Adapters return whatever the vendor answered; these tests pin the method,
//! path, query and body each one puts on the wire.

use proschedio_cloud::{
    ApiClient, Credential, ErrorKind, ListOptions, Page, ProviderRegistry, ReqwestTransport,
};
use proschedio_cloud_vultr::api::{dns, firewalls, instances, kubernetes, load_balancers, reserved_ips};
use proschedio_cloud_vultr::dto::{
    ForwardingRule, InstanceFilters, InstanceReinstall, ReservedIpConvert,
};
use proschedio_cloud_vultr::{PROVIDER, catalog};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    let registry = ProviderRegistry::new();
    registry
        .register(PROVIDER, format!("{}/v2", server.uri()))
        .unwrap();
    ApiClient::new(
        registry,
        Arc::new(catalog().unwrap()),
        Arc::new(ReqwestTransport::new().unwrap()),
        Credential::new("test-key").unwrap(),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_list_instances_with_filters_and_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/instances"))
        .and(query_param("per_page", "2"))
        .and(query_param("cursor", "abc"))
        .and(query_param("region", "ewr"))
        .and(query_param("tag", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instances": [{"id": "i-1"}, {"id": "i-2"}],
            "meta": {"total": 5, "links": {"next": "def", "prev": ""}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ListOptions::new().per_page(2).cursor("abc");
    let filters = InstanceFilters::new().region("ewr").tag("web");
    let response = instances::list(&client(&server), &options, &filters)
        .await
        .unwrap();
    let page = Page::from_response(&response, "instances").unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, Some(5));
    assert_eq!(page.prev, None);
    assert_eq!(
        page.next_options(&options),
        Some(ListOptions::new().per_page(2).cursor("def"))
    );
}

#[tokio::test]
async fn test_out_of_range_page_size_sends_nothing() {
    let server = MockServer::start().await;

    let options = ListOptions::new().per_page(501);
    let err = instances::list(&client(&server), &options, &InstanceFilters::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_error_status_is_returned_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/instances/i-1/reboot"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let response = instances::reboot(&client(&server), "i-1").await.unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body_text(), "upstream exploded");
}

#[tokio::test]
async fn test_reinstall_sends_hostname() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/instances/i-1/reinstall"))
        .and(body_json(json!({"hostname": "web-1"})))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"instance": {"id": "i-1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = InstanceReinstall::new().hostname("web-1");
    let response = instances::reinstall(&client(&server), "i-1", &body)
        .await
        .unwrap();

    assert_eq!(response.status, 202);
}

#[tokio::test]
async fn test_public_ipv4_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/instances/i-1/ipv4"))
        .and(query_param("public_network", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ipv4s": [{"ip": "192.0.2.10"}],
            "meta": {"total": 1, "links": {"next": "", "prev": ""}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = instances::list_ipv4(&client(&server), "i-1", &ListOptions::new(), Some(true))
        .await
        .unwrap();
    let page = Page::from_response(&response, "ipv4s").unwrap();

    assert!(!page.has_next());
}

#[tokio::test]
async fn test_forwarding_rule_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/load-balancers/lb-1/forwarding-rules"))
        .and(body_json(json!({
            "frontend_protocol": "https",
            "frontend_port": 443,
            "backend_protocol": "http",
            "backend_port": 8080
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "forwarding_rule": {"id": "fr-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rule = ForwardingRule::new("https", 443, "http", 8080);
    let response = load_balancers::create_forwarding_rule(&client(&server), "lb-1", &rule)
        .await
        .unwrap();

    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_kubeconfig_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/kubernetes/clusters/vke-1/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"kube_config": "YXBpVmVyc2lvbjogdjE="})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = kubernetes::kubeconfig(&client(&server), "vke-1").await.unwrap();

    assert_eq!(
        response.json_value().and_then(|v| v["kube_config"].as_str()),
        Some("YXBpVmVyc2lvbjogdjE=")
    );
}

#[tokio::test]
async fn test_reserved_ip_convert_and_detach() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/reserved-ips/convert"))
        .and(body_json(json!({"ip_address": "192.0.2.10", "label": "keep"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"reserved_ip": {"id": "rip-1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/reserved-ips/rip-1/detach"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let body = ReservedIpConvert::new("192.0.2.10").label("keep");
    assert_eq!(reserved_ips::convert(&client, &body).await.unwrap().status, 201);
    assert_eq!(reserved_ips::detach(&client, "rip-1").await.unwrap().status, 204);
}

#[tokio::test]
async fn test_blank_sub_resource_ids_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = dns::delete_record(&client, "example.com", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = kubernetes::delete_node_pool(&client, "vke-1", " ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = firewalls::delete_rule(&client, "", "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
