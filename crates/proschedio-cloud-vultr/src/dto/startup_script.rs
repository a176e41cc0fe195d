use super::{base64_text, ensure_not_empty, ensure_one_of};
use proschedio_cloud::{Payload, Result, payload_setters};
use serde::{Deserialize, Serialize};

const SCRIPT_TYPES: &[&str] = &["boot", "pxe"];

/// Body of `POST /startup-scripts`. `script` is plain text; it is sent
/// base64-encoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartupScriptCreate {
    pub name: String,
    #[serde(serialize_with = "base64_text::serialize_required")]
    pub script: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,
}

impl StartupScriptCreate {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            script_type: None,
        }
    }
}

payload_setters!(StartupScriptCreate { script_type: String });

impl Payload for StartupScriptCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("name", &self.name)?;
        ensure_not_empty("script", &self.script)?;
        if let Some(script_type) = &self.script_type {
            ensure_one_of("type", script_type, SCRIPT_TYPES)?;
        }
        Ok(())
    }
}

/// Body of `PATCH /startup-scripts/{startup-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartupScriptUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "base64_text::serialize"
    )]
    pub script: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,
}

impl StartupScriptUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(StartupScriptUpdate {
    name: String,
    script: String,
    script_type: String,
});

impl Payload for StartupScriptUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(script_type) = &self.script_type {
            ensure_one_of("type", script_type, SCRIPT_TYPES)?;
        }
        Ok(())
    }
}
