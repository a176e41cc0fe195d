//! Endpoint adapters
//!
//! One function per Vultr endpoint and verb. Each binds its placeholders,
//! attaches the body and query, and returns the response as received; no
//! status is interpreted here.

pub mod account;
pub mod blocks;
pub mod databases;
pub mod dns;
pub mod firewalls;
pub mod instances;
pub mod kubernetes;
pub mod load_balancers;
pub mod reserved_ips;
pub mod snapshots;
pub mod ssh_keys;
pub mod startup_scripts;
pub mod vpcs;
