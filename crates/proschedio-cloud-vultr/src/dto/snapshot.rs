use super::ensure_not_empty;
use proschedio_cloud::{CloudError, Payload, Result, payload_setters};
use serde::{Deserialize, Serialize};

/// Body of `POST /snapshots`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotCreate {
    pub instance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SnapshotCreate {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            description: None,
        }
    }
}

payload_setters!(SnapshotCreate { description: String });

impl Payload for SnapshotCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("instance_id", &self.instance_id)
    }
}

/// Body of `POST /snapshots/create-from-url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotCreateFromUrl {
    /// A publicly reachable raw disk image.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SnapshotCreateFromUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }
}

payload_setters!(SnapshotCreateFromUrl { description: String });

impl Payload for SnapshotCreateFromUrl {
    fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(CloudError::validation(format!(
                "url must be http(s) (got '{}')",
                self.url
            )));
        }
        Ok(())
    }
}

/// Body of `PUT /snapshots/{snapshot-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotUpdate {
    pub description: String,
}

impl SnapshotUpdate {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl Payload for SnapshotUpdate {}
