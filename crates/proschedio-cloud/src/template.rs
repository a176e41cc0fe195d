//! URL templates with `{placeholder}` path segments
//!
//! A [`UrlTemplate`] names the provider it belongs to and a path relative to
//! that provider's base URL. Binding a placeholder returns a new template, so
//! catalog entries can be shared across concurrent requests untouched.

use crate::error::{CloudError, Result};
use crate::registry::ProviderRegistry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Provider-relative path with named placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    provider: Arc<str>,
    pattern: Arc<str>,
    segments: Arc<[Segment]>,
    bindings: BTreeMap<String, String>,
}

impl UrlTemplate {
    /// Parse `pattern` (e.g. `instances/{instance-id}/reboot`).
    ///
    /// Unbalanced braces, empty or duplicate placeholder names are rejected.
    pub fn new(provider: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        let provider = provider.into();
        let pattern = pattern.into();
        let segments = parse_pattern(&pattern)?;

        Ok(Self {
            provider: Arc::from(provider),
            pattern: Arc::from(pattern),
            segments: Arc::from(segments),
            bindings: BTreeMap::new(),
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder names in path order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Placeholders that have not been bound yet.
    pub fn unbound(&self) -> Vec<&str> {
        self.placeholders()
            .filter(|name| !self.bindings.contains_key(*name))
            .collect()
    }

    pub fn is_resolved(&self) -> bool {
        self.unbound().is_empty()
    }

    /// Return a copy with `name` bound to `value`.
    ///
    /// Empty values are accepted here; handlers refuse them for id fields.
    pub fn assign(&self, name: &str, value: impl Into<String>) -> Result<Self> {
        if !self.placeholders().any(|p| p == name) {
            return Err(CloudError::usage(format!(
                "template '{}' has no placeholder '{{{}}}'",
                self.pattern, name
            )));
        }

        let mut next = self.clone();
        next.bindings.insert(name.to_string(), value.into());
        Ok(next)
    }

    /// The concrete path with every placeholder percent-encoded.
    pub fn resolve_path(&self) -> Result<String> {
        let unbound = self.unbound();
        if !unbound.is_empty() {
            return Err(CloudError::usage(format!(
                "template '{}' has unbound placeholders: {}",
                self.pattern,
                unbound.join(", ")
            )));
        }

        let mut path = String::with_capacity(self.pattern.len());
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder(name) => {
                    // presence checked above
                    let value = self.bindings.get(name).map(String::as_str).unwrap_or("");
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
        Ok(path)
    }

    /// `base_url + "/" + path`, with the base looked up in `registry`.
    pub fn resolve(&self, registry: &ProviderRegistry) -> Result<String> {
        let base = registry.base_url_of(&self.provider)?;
        let path = self.resolve_path()?;
        Ok(join_url(&base, &path))
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.pattern)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = pattern;

    while let Some(open) = rest.find(['{', '}']) {
        if rest.as_bytes()[open] == b'}' {
            return Err(unbalanced(pattern));
        }
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| unbalanced(pattern))?;
        let name = &after[..close];
        if name.is_empty() || name.contains('{') {
            return Err(unbalanced(pattern));
        }
        let duplicate = segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(n) if n == name));
        if duplicate {
            return Err(CloudError::usage(format!(
                "template '{}' repeats placeholder '{{{}}}'",
                pattern, name
            )));
        }
        segments.push(Segment::Placeholder(name.to_string()));
        rest = &after[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
    Ok(segments)
}

fn unbalanced(pattern: &str) -> CloudError {
    CloudError::usage(format!("malformed url template '{}'", pattern))
}
