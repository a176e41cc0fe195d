//! Scripted backend for unit tests.

use crate::error::{CloudError, Result};
use crate::provider::{AuthStatus, DriverContext, DriverFactory, ProviderDriver, unsupported_kind};
use crate::resource::{Attribute, Properties, ResourceBackend, ResourceKind, VendorObject};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Plays back queued vendor answers. The last queued fetch answer repeats.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    creates: Mutex<VecDeque<Value>>,
    fetches: Mutex<VecDeque<Option<Value>>>,
    updates: Mutex<VecDeque<Option<Value>>>,
    create_params: Mutex<Vec<Map<String, Value>>>,
    update_patches: Mutex<Vec<Map<String, Value>>>,
    calls: AtomicUsize,
}

fn object(value: Value) -> VendorObject {
    VendorObject::new(value.as_object().cloned().unwrap_or_default(), value)
}

impl ScriptedBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn on_create(&self, value: Value) {
        self.creates.lock().unwrap().push_back(value);
    }

    pub(crate) fn on_fetch(&self, value: Option<Value>) {
        self.fetches.lock().unwrap().push_back(value);
    }

    pub(crate) fn on_update(&self, value: Option<Value>) {
        self.updates.lock().unwrap().push_back(value);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_params(&self) -> Vec<Map<String, Value>> {
        self.create_params.lock().unwrap().clone()
    }

    pub(crate) fn update_patches(&self) -> Vec<Map<String, Value>> {
        self.update_patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceBackend for ScriptedBackend {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Instance
    }

    fn attribute_key(&self, attribute: Attribute) -> Option<&'static str> {
        Some(match attribute {
            Attribute::Status => "status",
            Attribute::Region => "region",
            Attribute::PrimaryAddress => "main_ip",
            Attribute::Hostname => "network.hostname",
            Attribute::Label => "label",
            Attribute::Plan => "plan",
            Attribute::CreatedAt => "date_created",
            Attribute::Tags => "tags",
        })
    }

    fn is_ready(&self, properties: &Properties) -> bool {
        properties.get("status").and_then(Value::as_str) == Some("active")
    }

    async fn create(&self, params: &Map<String, Value>) -> Result<VendorObject> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.create_params.lock().unwrap().push(params.clone());
        self.creates
            .lock()
            .unwrap()
            .pop_front()
            .map(object)
            .ok_or_else(|| CloudError::usage("no scripted create answer"))
    }

    async fn fetch(&self, _id: &str) -> Result<Option<VendorObject>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut fetches = self.fetches.lock().unwrap();
        let answer = if fetches.len() > 1 {
            fetches.pop_front()
        } else {
            fetches.front().cloned()
        };
        answer
            .map(|value| value.map(object))
            .ok_or_else(|| CloudError::usage("no scripted fetch answer"))
    }

    async fn update(&self, _id: &str, patch: &Map<String, Value>) -> Result<Option<VendorObject>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.update_patches.lock().unwrap().push(patch.clone());
        Ok(self.updates.lock().unwrap().pop_front().flatten().map(object))
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Driver factory for "vendorA" serving only instances from one backend.
pub(crate) struct ScriptedFactory {
    backend: Arc<ScriptedBackend>,
    connects: AtomicUsize,
}

impl ScriptedFactory {
    pub(crate) fn new(backend: Arc<ScriptedBackend>) -> Arc<Self> {
        Arc::new(Self {
            backend,
            connects: AtomicUsize::new(0),
        })
    }

    pub(crate) fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

struct ScriptedDriver {
    backend: Arc<ScriptedBackend>,
}

#[async_trait]
impl ProviderDriver for ScriptedDriver {
    fn name(&self) -> &str {
        "vendorA"
    }

    fn display_name(&self) -> &str {
        "Vendor A"
    }

    fn supported_kinds(&self) -> Vec<ResourceKind> {
        vec![ResourceKind::Instance]
    }

    fn backend(&self, kind: ResourceKind) -> Result<Arc<dyn ResourceBackend>> {
        match kind {
            ResourceKind::Instance => Ok(self.backend.clone()),
            other => Err(unsupported_kind(self.name(), other)),
        }
    }

    async fn check_auth(&self) -> Result<AuthStatus> {
        Ok(AuthStatus::ok("vendorA test account"))
    }
}

#[async_trait]
impl DriverFactory for ScriptedFactory {
    fn name(&self) -> &str {
        "vendorA"
    }

    fn default_base_url(&self) -> &str {
        "https://api.vendorA.test/v2"
    }

    async fn connect(&self, _context: DriverContext) -> Result<Arc<dyn ProviderDriver>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(Arc::new(ScriptedDriver {
            backend: self.backend.clone(),
        }))
    }
}
