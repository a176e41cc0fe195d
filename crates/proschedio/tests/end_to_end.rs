//! A full instance lifecycle through the public entry point

use proschedio::{
    CancellationToken, ErrorKind, HandleState, Proschedio, ResourceConfig, ResourceKind,
    WaitOptions,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn yaml_for(server: &MockServer) -> String {
    format!(
        "providers:\n  vultr:\n    credential: yaml-key\n    base_url: {}/v2\n    timeout_secs: 5\n",
        server.uri()
    )
}

fn instance(status: &str, server_status: &str) -> serde_json::Value {
    json!({
        "instance": {
            "id": "i-42",
            "status": status,
            "server_status": server_status,
            "region": "ewr",
            "plan": "vc2-1c-1gb",
            "label": "web",
            "main_ip": "192.0.2.42",
            "date_created": "2025-03-01T12:00:00+00:00",
            "tags": ["web", "prod"]
        }
    })
}

#[tokio::test]
async fn test_instance_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/instances"))
        .and(bearer_token("yaml-key"))
        .respond_with(ResponseTemplate::new(202).set_body_json(instance("pending", "none")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/instances/i-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance("pending", "none")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/instances/i-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance("active", "ok")))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/instances/i-42"))
        .and(body_json(json!({"label": "web"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(instance("active", "ok")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/instances/i-42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let manager = Proschedio::from_yaml_str(&yaml_for(&server)).unwrap();
    let config = ResourceConfig::new()
        .param("region", "ewr")
        .param("plan", "vc2-1c-1gb")
        .param("os_id", 2284)
        .param("label", "web")
        .wait(WaitOptions::new(Duration::from_secs(5), Duration::from_millis(10)));

    let mut server_handle = manager
        .create_resource("vultr", ResourceKind::Instance, config)
        .await
        .unwrap();

    assert!(server_handle.is_ready());
    let attributes = server_handle.attributes();
    assert_eq!(attributes.status, "active");
    assert_eq!(attributes.primary_address, "192.0.2.42");
    assert_eq!(attributes.tags, vec!["web".to_string(), "prod".to_string()]);
    assert!(server_handle.created_at_time().is_some());

    let patch = json!({"label": "web"});
    server_handle.update(patch.as_object().unwrap()).await.unwrap();
    server_handle.delete().await.unwrap();

    assert_eq!(server_handle.state(), HandleState::Terminal);
}

#[tokio::test]
async fn test_cancelled_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/instances/i-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance("pending", "none")))
        .mount(&server)
        .await;

    let manager = Proschedio::from_yaml_str(&yaml_for(&server)).unwrap();
    let mut handle = manager
        .get_resource("vultr", ResourceKind::Instance, "i-42")
        .await
        .unwrap()
        .expect("instance should exist");

    let token = CancellationToken::new();
    token.cancel();
    let options = WaitOptions::new(Duration::from_secs(5), Duration::from_millis(10))
        .with_cancel(token);
    let err = handle.wait_until_ready(&options).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 1);
}
