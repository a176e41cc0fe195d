use super::{ensure_not_empty, ensure_one_of};
use proschedio_cloud::{Payload, Result, payload_setters};
use serde::{Deserialize, Serialize};

/// Body of `POST /reserved-ips`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReservedIpCreate {
    pub region: String,
    /// `"v4"` or `"v6"`.
    pub ip_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ReservedIpCreate {
    pub fn new(region: impl Into<String>, ip_type: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ip_type: ip_type.into(),
            label: None,
        }
    }
}

payload_setters!(ReservedIpCreate { label: String });

impl Payload for ReservedIpCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("region", &self.region)?;
        ensure_one_of("ip_type", &self.ip_type, &["v4", "v6"])
    }
}

/// Body of `PATCH /reserved-ips/{reserved-ip}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReservedIpUpdate {
    pub label: String,
}

impl ReservedIpUpdate {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Payload for ReservedIpUpdate {}

/// Body of `POST /reserved-ips/{reserved-ip}/attach`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReservedIpAttach {
    pub instance_id: String,
}

impl ReservedIpAttach {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
        }
    }
}

impl Payload for ReservedIpAttach {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("instance_id", &self.instance_id)
    }
}

/// Body of `POST /reserved-ips/convert`: turn an instance's address into a
/// reserved IP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReservedIpConvert {
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ReservedIpConvert {
    pub fn new(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            label: None,
        }
    }
}

payload_setters!(ReservedIpConvert { label: String });

impl Payload for ReservedIpConvert {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("ip_address", &self.ip_address)
    }
}
