use super::{base64_text, ensure_not_empty};
use proschedio_cloud::{CloudError, Payload, RequestBuilder, Result, payload_setters};
use serde::{Deserialize, Serialize};

/// Body of `POST /instances`.
///
/// Exactly one boot source must be set: `os_id`, `iso_id`, `snapshot_id`,
/// `app_id` or `image_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceCreate {
    pub region: String,
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipxe_chain_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_ipv6: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_public_ipv4: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_vpc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_vpc2: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_vpc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_vpc2: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_private_network: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_private_network: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sshkey_id: Option<Vec<String>>,
    /// `"enabled"` or `"disabled"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backups: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddos_protection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_ipv4: Option<String>,
    /// Plain text; sent base64-encoded.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "base64_text::serialize"
    )]
    pub user_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_scheme: Option<String>,
}

impl InstanceCreate {
    pub fn new(region: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            plan: plan.into(),
            ..Default::default()
        }
    }

    fn boot_sources(&self) -> Vec<&'static str> {
        [
            ("os_id", self.os_id.is_some()),
            ("iso_id", self.iso_id.is_some()),
            ("snapshot_id", self.snapshot_id.is_some()),
            ("app_id", self.app_id.is_some()),
            ("image_id", self.image_id.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

payload_setters!(InstanceCreate {
    os_id: u32,
    iso_id: String,
    snapshot_id: String,
    app_id: u32,
    image_id: String,
    ipxe_chain_url: String,
    script_id: String,
    enable_ipv6: bool,
    disable_public_ipv4: bool,
    attach_vpc: Vec<String>,
    #[deprecated(note = "use `attach_vpc`")]
    attach_vpc2: Vec<String>,
    enable_vpc: bool,
    #[deprecated(note = "use `enable_vpc`")]
    enable_vpc2: bool,
    #[deprecated(note = "use `attach_vpc`")]
    attach_private_network: Vec<String>,
    #[deprecated(note = "use `enable_vpc`")]
    enable_private_network: bool,
    label: String,
    sshkey_id: Vec<String>,
    backups: String,
    ddos_protection: bool,
    activation_email: bool,
    hostname: String,
    #[deprecated(note = "use `tags`")]
    tag: String,
    tags: Vec<String>,
    firewall_group_id: String,
    reserved_ipv4: String,
    user_data: String,
    user_scheme: String,
});

impl Payload for InstanceCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("region", &self.region)?;
        ensure_not_empty("plan", &self.plan)?;
        let sources = self.boot_sources();
        if sources.len() != 1 {
            return Err(CloudError::validation(format!(
                "instance needs exactly one of os_id, iso_id, snapshot_id, app_id, image_id (got {})",
                if sources.is_empty() {
                    "none".to_string()
                } else {
                    sources.join(", ")
                }
            )));
        }
        if let Some(backups) = &self.backups {
            super::ensure_one_of("backups", backups, &["enabled", "disabled"])?;
        }
        Ok(())
    }
}

/// Body of `PATCH /instances/{instance-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backups: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_ipv6: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddos_protection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_vpc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detach_vpc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_vpc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_vpc2: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_vpc2: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_private_network: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_private_network: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "base64_text::serialize"
    )]
    pub user_data: Option<String>,
}

impl InstanceUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(InstanceUpdate {
    plan: String,
    label: String,
    os_id: u32,
    app_id: u32,
    image_id: String,
    backups: String,
    firewall_group_id: String,
    enable_ipv6: bool,
    ddos_protection: bool,
    attach_vpc: Vec<String>,
    detach_vpc: Vec<String>,
    enable_vpc: bool,
    #[deprecated(note = "use `attach_vpc`")]
    attach_vpc2: Vec<String>,
    #[deprecated(note = "use `enable_vpc`")]
    enable_vpc2: bool,
    #[deprecated(note = "use `attach_vpc`")]
    attach_private_network: Vec<String>,
    #[deprecated(note = "use `enable_vpc`")]
    enable_private_network: bool,
    #[deprecated(note = "use `tags`")]
    tag: String,
    tags: Vec<String>,
    user_data: String,
});

impl Payload for InstanceUpdate {
    fn validate(&self) -> Result<()> {
        let images = [
            self.os_id.is_some(),
            self.app_id.is_some(),
            self.image_id.is_some(),
        ];
        if images.iter().filter(|set| **set).count() > 1 {
            return Err(CloudError::validation(
                "only one of os_id, app_id, image_id may be changed at a time",
            ));
        }
        if let Some(backups) = &self.backups {
            super::ensure_one_of("backups", backups, &["enabled", "disabled"])?;
        }
        Ok(())
    }
}

/// Body of `POST /instances/{instance-id}/reinstall`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceReinstall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl InstanceReinstall {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(InstanceReinstall { hostname: String });

impl Payload for InstanceReinstall {}

/// Query filters for `GET /instances`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceFilters {
    pub tag: Option<String>,
    pub label: Option<String>,
    pub main_ip: Option<String>,
    pub region: Option<String>,
}

impl InstanceFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn main_ip(mut self, main_ip: impl Into<String>) -> Self {
        self.main_ip = Some(main_ip.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .query_opt("tag", self.tag.as_deref())
            .query_opt("label", self.label.as_deref())
            .query_opt("main_ip", self.main_ip.as_deref())
            .query_opt("region", self.region.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proschedio_cloud::{ErrorKind, from_params};
    use serde_json::json;

    #[test]
    fn test_minimal_create_body() {
        let body = InstanceCreate::new("ewr", "vc2-1c-1gb").os_id(2284u32).to_json().unwrap();
        assert_eq!(body, json!({"region": "ewr", "plan": "vc2-1c-1gb", "os_id": 2284}));
    }

    #[test]
    fn test_boot_source_is_required_and_exclusive() {
        let none = InstanceCreate::new("ewr", "vc2-1c-1gb").to_json().unwrap_err();
        assert_eq!(none.kind(), ErrorKind::Validation);

        let two = InstanceCreate::new("ewr", "vc2-1c-1gb")
            .os_id(2284u32)
            .snapshot_id("snap-1")
            .to_json()
            .unwrap_err();
        assert_eq!(two.kind(), ErrorKind::Validation);
        assert!(two.to_string().contains("os_id, snapshot_id"));
    }

    #[test]
    fn test_user_data_is_base64_on_the_wire() {
        let body = InstanceCreate::new("ewr", "vc2-1c-1gb")
            .app_id(42u32)
            .user_data("#cloud-config\n")
            .to_json()
            .unwrap();
        assert_eq!(body["user_data"], "I2Nsb3VkLWNvbmZpZwo=");
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_fields_serialize() {
        let body = InstanceCreate::new("ewr", "vc2-1c-1gb")
            .os_id(2284u32)
            .tag("legacy")
            .enable_private_network(true)
            .attach_vpc2(vec!["vpc2-1".to_string()])
            .to_json()
            .unwrap();
        assert_eq!(body["tag"], "legacy");
        assert_eq!(body["enable_private_network"], true);
        assert_eq!(body["attach_vpc2"], json!(["vpc2-1"]));
    }

    #[test]
    fn test_from_params_rejects_unknown_keys() {
        let params = json!({"region": "ewr", "plan": "p", "os_id": 1, "flavour": "x"});
        let err = from_params::<InstanceCreate>(params.as_object().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_update_sends_only_set_fields() {
        let body = InstanceUpdate::new().label("web-2").to_json().unwrap();
        assert_eq!(body, json!({"label": "web-2"}));

        let err = InstanceUpdate::new().os_id(1u32).app_id(2u32).to_json().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
