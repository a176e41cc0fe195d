use super::{ensure_not_empty, ensure_one_of};
use proschedio_cloud::{Payload, Result, ensure_range, payload_setters};
use serde::{Deserialize, Serialize};

/// Block sizes Vultr accepts, in GB.
pub const BLOCK_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=40_000;

/// Body of `POST /blocks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockCreate {
    pub region: String,
    pub size_gb: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// `"high_perf"` or `"storage_opt"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
}

impl BlockCreate {
    pub fn new(region: impl Into<String>, size_gb: u32) -> Self {
        Self {
            region: region.into(),
            size_gb,
            ..Default::default()
        }
    }
}

payload_setters!(BlockCreate {
    label: String,
    block_type: String,
});

impl Payload for BlockCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("region", &self.region)?;
        ensure_range("size_gb", self.size_gb, BLOCK_SIZE_RANGE)?;
        if let Some(block_type) = &self.block_type {
            ensure_one_of("block_type", block_type, &["high_perf", "storage_opt"])?;
        }
        Ok(())
    }
}

/// Body of `PATCH /blocks/{block-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<u32>,
}

impl BlockUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(BlockUpdate {
    label: String,
    size_gb: u32,
});

impl Payload for BlockUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(size_gb) = self.size_gb {
            ensure_range("size_gb", size_gb, BLOCK_SIZE_RANGE)?;
        }
        Ok(())
    }
}

/// Body of `POST /blocks/{block-id}/attach`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockAttach {
    pub instance_id: String,
    /// Attach without restarting the instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
}

impl BlockAttach {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            live: None,
        }
    }
}

payload_setters!(BlockAttach { live: bool });

impl Payload for BlockAttach {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("instance_id", &self.instance_id)
    }
}

/// Body of `POST /blocks/{block-id}/detach`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockDetach {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
}

impl BlockDetach {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(BlockDetach { live: bool });

impl Payload for BlockDetach {}
