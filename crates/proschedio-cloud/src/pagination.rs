//! Cursor pagination
//!
//! List endpoints take an optional page size and an opaque cursor; responses
//! carry `meta.total` and `meta.links.{next,prev}`. Iteration is up to the
//! caller.

use crate::error::{CloudError, Result};
use crate::request::RequestBuilder;
use crate::transport::HttpResponse;
use serde_json::Value;

pub const DEFAULT_PER_PAGE: u32 = 100;
pub const MAX_PER_PAGE: u32 = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub per_page: Option<u32>,
    pub cursor: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// The page size the vendor will use.
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn validate(&self) -> Result<()> {
        match self.per_page {
            Some(per_page) if !(1..=MAX_PER_PAGE).contains(&per_page) => {
                Err(CloudError::validation(format!(
                    "per_page must be between 1 and {} (got {})",
                    MAX_PER_PAGE, per_page
                )))
            }
            _ => Ok(()),
        }
    }

    /// Validate, then add `per_page` and `cursor` to `request` when set.
    pub fn apply(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        self.validate()?;
        Ok(request
            .query_opt("per_page", self.per_page)
            .query_opt("cursor", self.cursor.clone()))
    }
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub total: Option<u64>,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl Page {
    /// Extract the array under `key` and the pagination envelope.
    pub fn from_value(value: &Value, key: &str) -> Result<Self> {
        let items = value
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                CloudError::malformed(format!("list response has no '{}' array", key), None)
            })?;

        let meta = value.get("meta");
        let total = meta.and_then(|m| m.get("total")).and_then(Value::as_u64);
        let link = |name: &str| {
            meta.and_then(|m| m.get("links"))
                .and_then(|l| l.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            items,
            total,
            next: link("next"),
            prev: link("prev"),
        })
    }

    /// Check the status is 200, then extract the page.
    pub fn from_response(response: &HttpResponse, key: &str) -> Result<Self> {
        response.expect_status(&[200])?;
        let value = response
            .json_value()
            .ok_or_else(|| CloudError::malformed("list response is not JSON", None))?;
        Self::from_value(value, key)
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Options for the following page, keeping the page size.
    pub fn next_options(&self, current: &ListOptions) -> Option<ListOptions> {
        self.next.as_ref().map(|cursor| ListOptions {
            per_page: current.per_page,
            cursor: Some(cursor.clone()),
        })
    }
}
