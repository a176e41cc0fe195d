use super::ensure_not_empty;
use proschedio_cloud::{Payload, Result, payload_setters};
use serde::{Deserialize, Serialize};

/// Body of `POST /ssh-keys`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshKeyCreate {
    pub name: String,
    pub ssh_key: String,
}

impl SshKeyCreate {
    pub fn new(name: impl Into<String>, ssh_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ssh_key: ssh_key.into(),
        }
    }
}

impl Payload for SshKeyCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("name", &self.name)?;
        ensure_not_empty("ssh_key", &self.ssh_key)
    }
}

/// Body of `PATCH /ssh-keys/{ssh-key-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshKeyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
}

impl SshKeyUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(SshKeyUpdate {
    name: String,
    ssh_key: String,
});

impl Payload for SshKeyUpdate {}
