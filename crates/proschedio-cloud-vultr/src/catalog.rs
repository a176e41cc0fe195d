//! Vultr v2 endpoint catalog

use proschedio_cloud::{EndpointCatalog, Result};

pub const PROVIDER: &str = "vultr";
pub const DEFAULT_BASE_URL: &str = "https://api.vultr.com/v2";

/// Catalog keys.
pub mod endpoints {
    pub const ACCOUNT: &str = "account";
    pub const REGIONS: &str = "regions";
    pub const PLANS: &str = "plans";
    pub const OS: &str = "os";

    pub const INSTANCES: &str = "instances";
    pub const INSTANCE: &str = "instance";
    pub const INSTANCE_START: &str = "instance_start";
    pub const INSTANCE_HALT: &str = "instance_halt";
    pub const INSTANCE_REBOOT: &str = "instance_reboot";
    pub const INSTANCE_REINSTALL: &str = "instance_reinstall";
    pub const INSTANCE_IPV4: &str = "instance_ipv4";

    pub const BLOCKS: &str = "blocks";
    pub const BLOCK: &str = "block";
    pub const BLOCK_ATTACH: &str = "block_attach";
    pub const BLOCK_DETACH: &str = "block_detach";

    pub const DOMAINS: &str = "domains";
    pub const DOMAIN: &str = "domain";
    pub const DOMAIN_SOA: &str = "domain_soa";
    pub const DOMAIN_DNSSEC: &str = "domain_dnssec";
    pub const DOMAIN_RECORDS: &str = "domain_records";
    pub const DOMAIN_RECORD: &str = "domain_record";

    pub const LOAD_BALANCERS: &str = "load_balancers";
    pub const LOAD_BALANCER: &str = "load_balancer";
    pub const LB_FORWARDING_RULES: &str = "lb_forwarding_rules";
    pub const LB_FORWARDING_RULE: &str = "lb_forwarding_rule";
    pub const LB_FIREWALL_RULES: &str = "lb_firewall_rules";
    pub const LB_FIREWALL_RULE: &str = "lb_firewall_rule";

    pub const DATABASES: &str = "databases";
    pub const DATABASE: &str = "database";
    pub const DATABASE_PLANS: &str = "database_plans";

    pub const KUBERNETES_CLUSTERS: &str = "kubernetes_clusters";
    pub const KUBERNETES_CLUSTER: &str = "kubernetes_cluster";
    pub const KUBERNETES_CONFIG: &str = "kubernetes_config";
    pub const KUBERNETES_VERSIONS: &str = "kubernetes_versions";
    pub const NODE_POOLS: &str = "node_pools";
    pub const NODE_POOL: &str = "node_pool";

    pub const VPCS: &str = "vpcs";
    pub const VPC: &str = "vpc";

    pub const FIREWALL_GROUPS: &str = "firewall_groups";
    pub const FIREWALL_GROUP: &str = "firewall_group";
    pub const FIREWALL_RULES: &str = "firewall_rules";
    pub const FIREWALL_RULE: &str = "firewall_rule";

    pub const RESERVED_IPS: &str = "reserved_ips";
    pub const RESERVED_IP: &str = "reserved_ip";
    pub const RESERVED_IP_ATTACH: &str = "reserved_ip_attach";
    pub const RESERVED_IP_DETACH: &str = "reserved_ip_detach";
    pub const RESERVED_IP_CONVERT: &str = "reserved_ip_convert";

    pub const SSH_KEYS: &str = "ssh_keys";
    pub const SSH_KEY: &str = "ssh_key";

    pub const SNAPSHOTS: &str = "snapshots";
    pub const SNAPSHOT: &str = "snapshot";
    pub const SNAPSHOT_FROM_URL: &str = "snapshot_from_url";

    pub const STARTUP_SCRIPTS: &str = "startup_scripts";
    pub const STARTUP_SCRIPT: &str = "startup_script";
}

/// Build the Vultr catalog.
pub fn catalog() -> Result<EndpointCatalog> {
    use endpoints::*;

    EndpointCatalog::builder(PROVIDER)
        .endpoint(ACCOUNT, "account")
        .endpoint(REGIONS, "regions")
        .endpoint(PLANS, "plans")
        .endpoint(OS, "os")
        .endpoint(INSTANCES, "instances")
        .endpoint(INSTANCE, "instances/{instance-id}")
        .endpoint(INSTANCE_START, "instances/{instance-id}/start")
        .endpoint(INSTANCE_HALT, "instances/{instance-id}/halt")
        .endpoint(INSTANCE_REBOOT, "instances/{instance-id}/reboot")
        .endpoint(INSTANCE_REINSTALL, "instances/{instance-id}/reinstall")
        .endpoint(INSTANCE_IPV4, "instances/{instance-id}/ipv4")
        .endpoint(BLOCKS, "blocks")
        .endpoint(BLOCK, "blocks/{block-id}")
        .endpoint(BLOCK_ATTACH, "blocks/{block-id}/attach")
        .endpoint(BLOCK_DETACH, "blocks/{block-id}/detach")
        .endpoint(DOMAINS, "domains")
        .endpoint(DOMAIN, "domains/{dns-domain}")
        .endpoint(DOMAIN_SOA, "domains/{dns-domain}/soa")
        .endpoint(DOMAIN_DNSSEC, "domains/{dns-domain}/dnssec")
        .endpoint(DOMAIN_RECORDS, "domains/{dns-domain}/records")
        .endpoint(DOMAIN_RECORD, "domains/{dns-domain}/records/{record-id}")
        .endpoint(LOAD_BALANCERS, "load-balancers")
        .endpoint(LOAD_BALANCER, "load-balancers/{load-balancer-id}")
        .endpoint(
            LB_FORWARDING_RULES,
            "load-balancers/{load-balancer-id}/forwarding-rules",
        )
        .endpoint(
            LB_FORWARDING_RULE,
            "load-balancers/{load-balancer-id}/forwarding-rules/{forwarding-rule-id}",
        )
        .endpoint(
            LB_FIREWALL_RULES,
            "load-balancers/{load-balancer-id}/firewall-rules",
        )
        .endpoint(
            LB_FIREWALL_RULE,
            "load-balancers/{load-balancer-id}/firewall-rules/{firewall-rule-id}",
        )
        .endpoint(DATABASES, "databases")
        .endpoint(DATABASE, "databases/{database-id}")
        .endpoint(DATABASE_PLANS, "databases/plans")
        .endpoint(KUBERNETES_CLUSTERS, "kubernetes/clusters")
        .endpoint(KUBERNETES_CLUSTER, "kubernetes/clusters/{vke-id}")
        .endpoint(KUBERNETES_CONFIG, "kubernetes/clusters/{vke-id}/config")
        .endpoint(KUBERNETES_VERSIONS, "kubernetes/versions")
        .endpoint(NODE_POOLS, "kubernetes/clusters/{vke-id}/node-pools")
        .endpoint(
            NODE_POOL,
            "kubernetes/clusters/{vke-id}/node-pools/{nodepool-id}",
        )
        .endpoint(VPCS, "vpcs")
        .endpoint(VPC, "vpcs/{vpc-id}")
        .endpoint(FIREWALL_GROUPS, "firewalls")
        .endpoint(FIREWALL_GROUP, "firewalls/{firewall-group-id}")
        .endpoint(FIREWALL_RULES, "firewalls/{firewall-group-id}/rules")
        .endpoint(
            FIREWALL_RULE,
            "firewalls/{firewall-group-id}/rules/{firewall-rule-id}",
        )
        .endpoint(RESERVED_IPS, "reserved-ips")
        .endpoint(RESERVED_IP, "reserved-ips/{reserved-ip}")
        .endpoint(RESERVED_IP_ATTACH, "reserved-ips/{reserved-ip}/attach")
        .endpoint(RESERVED_IP_DETACH, "reserved-ips/{reserved-ip}/detach")
        .endpoint(RESERVED_IP_CONVERT, "reserved-ips/convert")
        .endpoint(SSH_KEYS, "ssh-keys")
        .endpoint(SSH_KEY, "ssh-keys/{ssh-key-id}")
        .endpoint(SNAPSHOTS, "snapshots")
        .endpoint(SNAPSHOT, "snapshots/{snapshot-id}")
        .endpoint(SNAPSHOT_FROM_URL, "snapshots/create-from-url")
        .endpoint(STARTUP_SCRIPTS, "startup-scripts")
        .endpoint(STARTUP_SCRIPT, "startup-scripts/{startup-id}")
        .build()
}
