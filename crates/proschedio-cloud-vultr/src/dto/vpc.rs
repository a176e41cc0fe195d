use super::ensure_not_empty;
use proschedio_cloud::{CloudError, Payload, Result, ensure_range, payload_setters};
use serde::{Deserialize, Serialize};

/// Body of `POST /vpcs`.
///
/// `v4_subnet` and `v4_subnet_mask` go together; leave both unset to let
/// Vultr pick a range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VpcCreate {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v4_subnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v4_subnet_mask: Option<u8>,
}

impl VpcCreate {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }
}

payload_setters!(VpcCreate {
    description: String,
    v4_subnet: String,
    v4_subnet_mask: u8,
});

impl Payload for VpcCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("region", &self.region)?;
        match (&self.v4_subnet, self.v4_subnet_mask) {
            (Some(_), Some(mask)) => ensure_range("v4_subnet_mask", mask, 1..=32),
            (None, None) => Ok(()),
            _ => Err(CloudError::validation(
                "v4_subnet and v4_subnet_mask must be set together",
            )),
        }
    }
}

/// Body of `PUT /vpcs/{vpc-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VpcUpdate {
    pub description: String,
}

impl VpcUpdate {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl Payload for VpcUpdate {}

#[cfg(test)]
mod tests {
    use super::*;
    use proschedio_cloud::ErrorKind;

    #[test]
    fn test_subnet_pairing() {
        assert!(VpcCreate::new("ewr").to_json().is_ok());
        assert!(
            VpcCreate::new("ewr")
                .v4_subnet("10.99.0.0")
                .v4_subnet_mask(24u8)
                .to_json()
                .is_ok()
        );
        assert_eq!(
            VpcCreate::new("ewr")
                .v4_subnet("10.99.0.0")
                .to_json()
                .unwrap_err()
                .kind(),
            ErrorKind::Validation
        );
    }
}
