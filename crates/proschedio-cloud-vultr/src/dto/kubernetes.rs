use super::ensure_not_empty;
use proschedio_cloud::{CloudError, Payload, Result, ensure_range, payload_setters};
use serde::{Deserialize, Serialize};

/// Body of `POST /kubernetes/clusters/{vke-id}/node-pools`, also embedded in
/// cluster creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodePoolCreate {
    pub node_quantity: u32,
    pub label: String,
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
}

impl NodePoolCreate {
    pub fn new(node_quantity: u32, label: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            node_quantity,
            label: label.into(),
            plan: plan.into(),
            ..Default::default()
        }
    }
}

payload_setters!(NodePoolCreate {
    tag: String,
    auto_scaler: bool,
    min_nodes: u32,
    max_nodes: u32,
});

fn check_scaling(min_nodes: Option<u32>, max_nodes: Option<u32>) -> Result<()> {
    match (min_nodes, max_nodes) {
        (Some(min), Some(max)) if min > max => Err(CloudError::validation(format!(
            "min_nodes ({}) exceeds max_nodes ({})",
            min, max
        ))),
        _ => Ok(()),
    }
}

impl Payload for NodePoolCreate {
    fn validate(&self) -> Result<()> {
        ensure_range("node_quantity", self.node_quantity, 1..=100)?;
        ensure_not_empty("label", &self.label)?;
        ensure_not_empty("plan", &self.plan)?;
        check_scaling(self.min_nodes, self.max_nodes)
    }
}

/// Body of `PATCH /kubernetes/clusters/{vke-id}/node-pools/{nodepool-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodePoolUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
}

impl NodePoolUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(NodePoolUpdate {
    node_quantity: u32,
    tag: String,
    auto_scaler: bool,
    min_nodes: u32,
    max_nodes: u32,
});

impl Payload for NodePoolUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(quantity) = self.node_quantity {
            ensure_range("node_quantity", quantity, 1..=100)?;
        }
        check_scaling(self.min_nodes, self.max_nodes)
    }
}

/// Body of `POST /kubernetes/clusters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterCreate {
    pub region: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_pools: Option<Vec<NodePoolCreate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ha_controlplanes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_firewall: Option<bool>,
}

impl ClusterCreate {
    pub fn new(region: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            version: version.into(),
            ..Default::default()
        }
    }
}

payload_setters!(ClusterCreate {
    label: String,
    node_pools: Vec<NodePoolCreate>,
    ha_controlplanes: bool,
    enable_firewall: bool,
});

impl Payload for ClusterCreate {
    fn validate(&self) -> Result<()> {
        ensure_not_empty("region", &self.region)?;
        ensure_not_empty("version", &self.version)?;
        for pool in self.node_pools.iter().flatten() {
            pool.validate()?;
        }
        Ok(())
    }
}

/// Body of `PUT /kubernetes/clusters/{vke-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ClusterUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(ClusterUpdate { label: String });

impl Payload for ClusterUpdate {}

#[cfg(test)]
mod tests {
    use super::*;
    use proschedio_cloud::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_cluster_with_pool() {
        let body = ClusterCreate::new("ewr", "v1.29.2+1")
            .label("prod")
            .node_pools(vec![NodePoolCreate::new(3, "workers", "vc2-2c-4gb")])
            .to_json()
            .unwrap();
        assert_eq!(body["node_pools"][0]["node_quantity"], 3);
        assert!(body.get("ha_controlplanes").is_none());
    }

    #[test]
    fn test_pool_bounds() {
        let err = ClusterCreate::new("ewr", "v1.29.2+1")
            .node_pools(vec![NodePoolCreate::new(0, "workers", "vc2-2c-4gb")])
            .to_json()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = NodePoolUpdate::new()
            .min_nodes(5u32)
            .max_nodes(2u32)
            .to_json()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_update_is_label_only() {
        assert_eq!(
            ClusterUpdate::new().label("renamed").to_json().unwrap(),
            json!({"label": "renamed"})
        );
    }
}
