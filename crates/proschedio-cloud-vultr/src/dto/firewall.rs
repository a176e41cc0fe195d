use super::{ensure_not_empty, ensure_one_of};
use proschedio_cloud::{Payload, Result, ensure_range, payload_setters};
use serde::{Deserialize, Serialize};

const PROTOCOLS: &[&str] = &["ICMP", "TCP", "UDP", "GRE", "ESP", "AH"];

/// Body of `POST /firewalls`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirewallGroupCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FirewallGroupCreate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(FirewallGroupCreate { description: String });

impl Payload for FirewallGroupCreate {}

/// Body of `PUT /firewalls/{firewall-group-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirewallGroupUpdate {
    pub description: String,
}

impl FirewallGroupUpdate {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl Payload for FirewallGroupUpdate {}

/// Body of `POST /firewalls/{firewall-group-id}/rules`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirewallRuleCreate {
    /// `"v4"` or `"v6"`.
    pub ip_type: String,
    pub protocol: String,
    pub subnet: String,
    pub subnet_size: u8,
    /// A port or `"low:high"` range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// `"cloudflare"` or a load balancer id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FirewallRuleCreate {
    pub fn new(
        ip_type: impl Into<String>,
        protocol: impl Into<String>,
        subnet: impl Into<String>,
        subnet_size: u8,
    ) -> Self {
        Self {
            ip_type: ip_type.into(),
            protocol: protocol.into(),
            subnet: subnet.into(),
            subnet_size,
            ..Default::default()
        }
    }
}

payload_setters!(FirewallRuleCreate {
    port: String,
    source: String,
    notes: String,
});

impl Payload for FirewallRuleCreate {
    fn validate(&self) -> Result<()> {
        ensure_one_of("ip_type", &self.ip_type, &["v4", "v6"])?;
        ensure_one_of("protocol", &self.protocol, PROTOCOLS)?;
        ensure_not_empty("subnet", &self.subnet)?;
        let max = if self.ip_type == "v4" { 32 } else { 128 };
        ensure_range("subnet_size", self.subnet_size, 0..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proschedio_cloud::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_rule_body() {
        let body = FirewallRuleCreate::new("v4", "TCP", "0.0.0.0", 0)
            .port("22")
            .to_json()
            .unwrap();
        assert_eq!(
            body,
            json!({"ip_type": "v4", "protocol": "TCP", "subnet": "0.0.0.0", "subnet_size": 0, "port": "22"})
        );
    }

    #[test]
    fn test_subnet_size_depends_on_family() {
        assert!(FirewallRuleCreate::new("v6", "TCP", "::", 64).to_json().is_ok());
        assert_eq!(
            FirewallRuleCreate::new("v4", "TCP", "10.0.0.0", 64)
                .to_json()
                .unwrap_err()
                .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            FirewallRuleCreate::new("v4", "tcp", "10.0.0.0", 8)
                .to_json()
                .unwrap_err()
                .kind(),
            ErrorKind::Validation
        );
    }
}
