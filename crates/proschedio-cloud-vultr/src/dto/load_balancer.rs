use super::{ensure_not_empty, ensure_one_of};
use proschedio_cloud::{Payload, Result, ensure_range, payload_setters};
use serde::{Deserialize, Serialize};

const PROTOCOLS: &[&str] = &["http", "https", "tcp"];
const ALGORITHMS: &[&str] = &["roundrobin", "leastconn"];

/// One frontend-to-backend port mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForwardingRule {
    pub frontend_protocol: String,
    pub frontend_port: u16,
    pub backend_protocol: String,
    pub backend_port: u16,
}

impl ForwardingRule {
    pub fn new(
        frontend_protocol: impl Into<String>,
        frontend_port: u16,
        backend_protocol: impl Into<String>,
        backend_port: u16,
    ) -> Self {
        Self {
            frontend_protocol: frontend_protocol.into(),
            frontend_port,
            backend_protocol: backend_protocol.into(),
            backend_port,
        }
    }
}

impl Payload for ForwardingRule {
    fn validate(&self) -> Result<()> {
        ensure_one_of("frontend_protocol", &self.frontend_protocol, PROTOCOLS)?;
        ensure_one_of("backend_protocol", &self.backend_protocol, PROTOCOLS)?;
        ensure_range("frontend_port", self.frontend_port, 1..=65_535)?;
        ensure_range("backend_port", self.backend_port, 1..=65_535)
    }
}

/// Inbound rule on a load balancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadBalancerFirewallRule {
    pub port: u16,
    /// CIDR, or `"cloudflare"`.
    pub source: String,
    /// `"v4"` or `"v6"`.
    pub ip_type: String,
}

impl LoadBalancerFirewallRule {
    pub fn new(port: u16, source: impl Into<String>, ip_type: impl Into<String>) -> Self {
        Self {
            port,
            source: source.into(),
            ip_type: ip_type.into(),
        }
    }
}

impl Payload for LoadBalancerFirewallRule {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("source", &self.source)?;
        ensure_one_of("ip_type", &self.ip_type, &["v4", "v6"])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy_threshold: Option<u32>,
}

impl HealthCheck {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(HealthCheck {
    protocol: String,
    port: u16,
    path: String,
    check_interval: u32,
    response_timeout: u32,
    unhealthy_threshold: u32,
    healthy_threshold: u32,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StickySession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

/// Body of `POST /load-balancers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadBalancerCreate {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balancing_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_redirect: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http2: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding_rules: Option<Vec<ForwardingRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky_session: Option<StickySession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_rules: Option<Vec<LoadBalancerFirewallRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
}

impl LoadBalancerCreate {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    fn check_rules(&self) -> Result<()> {
        if let Some(algorithm) = &self.balancing_algorithm {
            ensure_one_of("balancing_algorithm", algorithm, ALGORITHMS)?;
        }
        if let Some(nodes) = self.nodes {
            ensure_odd_nodes(nodes)?;
        }
        for rule in self.forwarding_rules.iter().flatten() {
            rule.validate()?;
        }
        for rule in self.firewall_rules.iter().flatten() {
            rule.validate()?;
        }
        Ok(())
    }
}

/// Vultr runs 1 to 99 nodes, always an odd count.
fn ensure_odd_nodes(nodes: u32) -> Result<()> {
    ensure_range("nodes", nodes, 1..=99)?;
    if nodes % 2 == 0 {
        return Err(proschedio_cloud::CloudError::validation(format!(
            "nodes must be odd (got {})",
            nodes
        )));
    }
    Ok(())
}

payload_setters!(LoadBalancerCreate {
    balancing_algorithm: String,
    ssl_redirect: bool,
    http2: bool,
    proxy_protocol: bool,
    nodes: u32,
    health_check: HealthCheck,
    forwarding_rules: Vec<ForwardingRule>,
    sticky_session: StickySession,
    firewall_rules: Vec<LoadBalancerFirewallRule>,
    instances: Vec<String>,
    label: String,
    vpc: String,
});

impl Payload for LoadBalancerCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("region", &self.region)?;
        self.check_rules()
    }
}

/// Body of `PATCH /load-balancers/{load-balancer-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadBalancerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balancing_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_redirect: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http2: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding_rules: Option<Vec<ForwardingRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky_session: Option<StickySession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_rules: Option<Vec<LoadBalancerFirewallRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
}

impl LoadBalancerUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(LoadBalancerUpdate {
    balancing_algorithm: String,
    ssl_redirect: bool,
    http2: bool,
    proxy_protocol: bool,
    nodes: u32,
    health_check: HealthCheck,
    forwarding_rules: Vec<ForwardingRule>,
    sticky_session: StickySession,
    firewall_rules: Vec<LoadBalancerFirewallRule>,
    instances: Vec<String>,
    label: String,
    vpc: String,
});

impl Payload for LoadBalancerUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(algorithm) = &self.balancing_algorithm {
            ensure_one_of("balancing_algorithm", algorithm, ALGORITHMS)?;
        }
        if let Some(nodes) = self.nodes {
            ensure_odd_nodes(nodes)?;
        }
        for rule in self.forwarding_rules.iter().flatten() {
            rule.validate()?;
        }
        for rule in self.firewall_rules.iter().flatten() {
            rule.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proschedio_cloud::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_nested_rules_serialize() {
        let body = LoadBalancerCreate::new("ewr")
            .forwarding_rules(vec![ForwardingRule::new("http", 80, "http", 8080)])
            .health_check(HealthCheck::new().protocol("http").port(8080u16).path("/healthz"))
            .to_json()
            .unwrap();

        assert_eq!(
            body,
            json!({
                "region": "ewr",
                "forwarding_rules": [{
                    "frontend_protocol": "http", "frontend_port": 80,
                    "backend_protocol": "http", "backend_port": 8080
                }],
                "health_check": {"protocol": "http", "port": 8080, "path": "/healthz"}
            })
        );
    }

    #[test]
    fn test_invalid_rule_is_rejected() {
        let err = LoadBalancerCreate::new("ewr")
            .forwarding_rules(vec![ForwardingRule::new("udp", 53, "udp", 53)])
            .to_json()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_even_node_count_is_rejected() {
        let err = LoadBalancerUpdate::new().nodes(2u32).to_json().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(LoadBalancerUpdate::new().nodes(3u32).to_json().is_ok());
    }
}
