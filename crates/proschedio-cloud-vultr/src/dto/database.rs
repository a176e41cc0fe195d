use super::{ensure_not_empty, ensure_one_of};
use proschedio_cloud::{Payload, RequestBuilder, Result, payload_setters};
use serde::{Deserialize, Serialize};

const ENGINES: &[&str] = &["mysql", "pg", "redis", "kafka"];
const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Body of `POST /databases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseCreate {
    pub database_engine: String,
    pub database_engine_version: String,
    pub region: String,
    pub plan: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_dow: Option<String>,
    /// `HH:00`, UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_ips: Option<Vec<String>>,
}

impl DatabaseCreate {
    pub fn new(
        database_engine: impl Into<String>,
        database_engine_version: impl Into<String>,
        region: impl Into<String>,
        plan: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            database_engine: database_engine.into(),
            database_engine_version: database_engine_version.into(),
            region: region.into(),
            plan: plan.into(),
            label: label.into(),
            ..Default::default()
        }
    }
}

payload_setters!(DatabaseCreate {
    tag: String,
    vpc_id: String,
    maintenance_dow: String,
    maintenance_time: String,
    trusted_ips: Vec<String>,
});

impl Payload for DatabaseCreate {
    fn validate(&self) -> Result<()> {
        ensure_one_of("database_engine", &self.database_engine, ENGINES)?;
        ensure_not_empty("database_engine_version", &self.database_engine_version)?;
        ensure_not_empty("region", &self.region)?;
        ensure_not_empty("plan", &self.plan)?;
        ensure_not_empty("label", &self.label)?;
        if let Some(dow) = &self.maintenance_dow {
            ensure_one_of("maintenance_dow", dow, WEEKDAYS)?;
        }
        Ok(())
    }
}

/// Body of `PUT /databases/{database-id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_dow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_ips: Option<Vec<String>>,
}

impl DatabaseUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}

payload_setters!(DatabaseUpdate {
    region: String,
    plan: String,
    label: String,
    tag: String,
    vpc_id: String,
    maintenance_dow: String,
    maintenance_time: String,
    cluster_time_zone: String,
    trusted_ips: Vec<String>,
});

impl Payload for DatabaseUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(dow) = &self.maintenance_dow {
            ensure_one_of("maintenance_dow", dow, WEEKDAYS)?;
        }
        Ok(())
    }
}

/// Query filters for `GET /databases/plans`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabasePlanFilters {
    pub engine: Option<String>,
    pub nodes: Option<u32>,
    pub region: Option<String>,
}

impl DatabasePlanFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn nodes(mut self, nodes: u32) -> Self {
        self.nodes = Some(nodes);
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .query_opt("engine", self.engine.as_deref())
            .query_opt("nodes", self.nodes)
            .query_opt("region", self.region.as_deref())
    }
}
