//! Request bodies for the Vultr API
//!
//! Required fields are constructor arguments; every optional field is an
//! `Option` that stays off the wire until its setter is called.

mod block;
mod database;
mod dns;
mod firewall;
mod instance;
mod kubernetes;
mod load_balancer;
mod reserved_ip;
mod snapshot;
mod ssh_key;
mod startup_script;
mod vpc;

pub use block::{BlockAttach, BlockCreate, BlockDetach, BlockUpdate};
pub use database::{DatabaseCreate, DatabasePlanFilters, DatabaseUpdate};
pub use dns::{DomainCreate, DomainUpdate, RecordCreate, RecordUpdate, SoaUpdate};
pub use firewall::{FirewallGroupCreate, FirewallGroupUpdate, FirewallRuleCreate};
pub use instance::{InstanceCreate, InstanceFilters, InstanceReinstall, InstanceUpdate};
pub use kubernetes::{ClusterCreate, ClusterUpdate, NodePoolCreate, NodePoolUpdate};
pub use load_balancer::{
    ForwardingRule, HealthCheck, LoadBalancerCreate, LoadBalancerFirewallRule,
    LoadBalancerUpdate, StickySession,
};
pub use reserved_ip::{ReservedIpAttach, ReservedIpConvert, ReservedIpCreate, ReservedIpUpdate};
pub use snapshot::{SnapshotCreate, SnapshotCreateFromUrl, SnapshotUpdate};
pub use ssh_key::{SshKeyCreate, SshKeyUpdate};
pub use startup_script::{StartupScriptCreate, StartupScriptUpdate};
pub use vpc::{VpcCreate, VpcUpdate};

use proschedio_cloud::{CloudError, Result};

/// Plain text in memory, base64 on the wire.
pub(crate) mod base64_text {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(text) => serializer.serialize_str(&STANDARD.encode(text.as_bytes())),
            None => serializer.serialize_none(),
        }
    }

    pub fn serialize_required<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(value.as_bytes()))
    }
}

/// Fail unless `value` is one of `allowed`.
pub(crate) fn ensure_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(CloudError::validation(format!(
        "{} must be one of {} (got '{}')",
        field,
        allowed.join(", "),
        value
    )))
}

pub(crate) fn ensure_not_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CloudError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
