//! Vendor field names behind the normalized attributes, and readiness rules

use proschedio_cloud::{Attribute, Properties, ResourceKind};
use serde_json::Value;

/// Vendor field holding `attribute` for `kind`, if Vultr has one.
pub(crate) fn attribute_key(kind: ResourceKind, attribute: Attribute) -> Option<&'static str> {
    use Attribute::*;
    use ResourceKind::*;

    match (kind, attribute) {
        (_, CreatedAt) => Some("date_created"),

        (Instance, Status) => Some("status"),
        (Instance, Region) => Some("region"),
        (Instance, PrimaryAddress) => Some("main_ip"),
        (Instance, Hostname) => Some("hostname"),
        (Instance, Label) => Some("label"),
        (Instance, Plan) => Some("plan"),
        (Instance, Tags) => Some("tags"),

        (BlockStorage, Status) => Some("status"),
        (BlockStorage, Region) => Some("region"),
        (BlockStorage, Label) => Some("label"),
        (BlockStorage, Plan) => Some("block_type"),

        (DnsDomain, Label) => Some("domain"),

        (LoadBalancer, Status) => Some("status"),
        (LoadBalancer, Region) => Some("region"),
        (LoadBalancer, PrimaryAddress) => Some("ipv4"),
        (LoadBalancer, Label) => Some("label"),

        (Database, Status) => Some("status"),
        (Database, Region) => Some("region"),
        (Database, PrimaryAddress) => Some("host"),
        (Database, Hostname) => Some("host"),
        (Database, Label) => Some("label"),
        (Database, Plan) => Some("plan"),
        (Database, Tags) => Some("tag"),

        (KubernetesCluster, Status) => Some("status"),
        (KubernetesCluster, Region) => Some("region"),
        (KubernetesCluster, PrimaryAddress) => Some("ip"),
        (KubernetesCluster, Hostname) => Some("endpoint"),
        (KubernetesCluster, Label) => Some("label"),

        (Vpc, Region) => Some("region"),
        (Vpc, Label) => Some("description"),

        (FirewallGroup, Label) => Some("description"),

        (ReservedIp, Region) => Some("region"),
        (ReservedIp, PrimaryAddress) => Some("subnet"),
        (ReservedIp, Label) => Some("label"),

        (SshKey, Label) => Some("name"),

        (Snapshot, Status) => Some("status"),
        (Snapshot, Label) => Some("description"),

        (StartupScript, Label) => Some("name"),

        _ => None,
    }
}

/// Whether a freshly fetched resource of `kind` is usable.
pub(crate) fn is_ready(kind: ResourceKind, properties: &Properties) -> bool {
    let field = |name: &str| properties.get(name).and_then(Value::as_str);

    match kind {
        ResourceKind::Instance => {
            field("status") == Some("active") && field("server_status") == Some("ok")
        }
        ResourceKind::BlockStorage
        | ResourceKind::LoadBalancer
        | ResourceKind::KubernetesCluster => field("status") == Some("active"),
        ResourceKind::Database => field("status") == Some("Running"),
        ResourceKind::Snapshot => field("status") == Some("complete"),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_instance_needs_both_status_fields() {
        let kind = ResourceKind::Instance;
        let check = |value: Value| is_ready(kind, &props(value));
        assert!(!check(json!({"status": "pending", "server_status": "none"})));
        assert!(!check(json!({"status": "active", "server_status": "locked"})));
        assert!(check(json!({"status": "active", "server_status": "ok"})));
    }

    #[test]
    fn test_vendor_specific_ready_values() {
        assert!(is_ready(ResourceKind::Database, &props(json!({"status": "Running"}))));
        assert!(!is_ready(ResourceKind::Database, &props(json!({"status": "Rebuilding"}))));
        assert!(is_ready(ResourceKind::Snapshot, &props(json!({"status": "complete"}))));
        assert!(!is_ready(ResourceKind::Snapshot, &props(json!({"status": "pending"}))));
    }

    #[test]
    fn test_kinds_without_status_are_ready() {
        for kind in [ResourceKind::SshKey, ResourceKind::Vpc, ResourceKind::DnsDomain] {
            assert!(is_ready(kind, &Properties::new()));
        }
    }

    #[test]
    fn test_every_kind_maps_created_at() {
        for kind in ResourceKind::ALL {
            assert_eq!(attribute_key(kind, Attribute::CreatedAt), Some("date_created"));
        }
    }

    #[test]
    fn test_addresses() {
        let address = |kind| attribute_key(kind, Attribute::PrimaryAddress);
        assert_eq!(address(ResourceKind::Instance), Some("main_ip"));
        assert_eq!(address(ResourceKind::LoadBalancer), Some("ipv4"));
        assert_eq!(address(ResourceKind::SshKey), None);
    }
}
