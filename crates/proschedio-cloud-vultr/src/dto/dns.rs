use super::{ensure_not_empty, ensure_one_of};
use proschedio_cloud::{Payload, Result, ensure_range, payload_setters};
use serde::{Deserialize, Serialize};

const DNSSEC_STATES: &[&str] = &["enabled", "disabled"];
const RECORD_TYPES: &[&str] = &["A", "AAAA", "CNAME", "NS", "MX", "SRV", "TXT", "CAA", "SSHFP"];

/// Body of `POST /domains`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainCreate {
    pub domain: String,
    /// Default A record target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_sec: Option<String>,
}

impl DomainCreate {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }
}

payload_setters!(DomainCreate {
    ip: String,
    dns_sec: String,
});

impl Payload for DomainCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("domain", &self.domain)?;
        if let Some(dns_sec) = &self.dns_sec {
            ensure_one_of("dns_sec", dns_sec, DNSSEC_STATES)?;
        }
        Ok(())
    }
}

/// Body of `PUT /domains/{dns-domain}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_sec: Option<String>,
}

impl DomainUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(DomainUpdate { dns_sec: String });

impl Payload for DomainUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(dns_sec) = &self.dns_sec {
            ensure_one_of("dns_sec", dns_sec, DNSSEC_STATES)?;
        }
        Ok(())
    }
}

/// Body of `PATCH /domains/{dns-domain}/soa`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsprimary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SoaUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(SoaUpdate {
    nsprimary: String,
    email: String,
});

impl Payload for SoaUpdate {}

/// Body of `POST /domains/{dns-domain}/records`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl RecordCreate {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            data: data.into(),
            ttl: None,
            priority: None,
        }
    }
}

payload_setters!(RecordCreate {
    ttl: u32,
    priority: u32,
});

impl Payload for RecordCreate {
    fn validate(&self) -> Result<()> {
        ensure_one_of("type", &self.record_type, RECORD_TYPES)?;
        ensure_not_empty("data", &self.data)?;
        if let Some(priority) = self.priority {
            ensure_range("priority", priority, 0..=65_535)?;
        }
        Ok(())
    }
}

/// Body of `PATCH /domains/{dns-domain}/records/{record-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(RecordUpdate {
    name: String,
    data: String,
    ttl: u32,
    priority: u32,
});

impl Payload for RecordUpdate {}

#[cfg(test)]
mod tests {
    use super::*;
    use proschedio_cloud::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_record_type_is_renamed() {
        let body = RecordCreate::new("www", "A", "192.0.2.10")
            .ttl(300u32)
            .to_json()
            .unwrap();
        assert_eq!(
            body,
            json!({"name": "www", "type": "A", "data": "192.0.2.10", "ttl": 300})
        );
    }

    #[test]
    fn test_unknown_record_type() {
        let err = RecordCreate::new("www", "PTRX", "x").to_json().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_dnssec_values() {
        assert!(DomainCreate::new("example.com").dns_sec("enabled").to_json().is_ok());
        assert_eq!(
            DomainUpdate::new().dns_sec("on").to_json().unwrap_err().kind(),
            ErrorKind::Validation
        );
    }
}
