//! Lifecycle waiting
//!
//! Fixed-interval polling of a handle until a predicate holds, bounded by a
//! timeout and an optional cancellation token.

use crate::error::{CloudError, ProviderError, Result};
use crate::resource::{HandleState, Properties, Resource};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(600);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Give up once this much time has passed.
    pub timeout: Duration,
    /// Pause before each poll.
    pub interval: Duration,
    pub cancel: Option<CancellationToken>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
            cancel: None,
        }
    }
}

impl WaitOptions {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            timeout,
            interval,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    async fn pause(&self) -> Result<()> {
        match &self.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(CloudError::Cancelled),
                _ = sleep(self.interval) => Ok(()),
            },
            None => {
                sleep(self.interval).await;
                Ok(())
            }
        }
    }
}

/// How a successful wait went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOutcome {
    pub polls: u32,
    pub elapsed: Duration,
}

/// Poll `resource` every `options.interval` until `predicate` holds.
///
/// A zero timeout polls exactly once. The resource disappearing mid-wait is
/// reported as a provider 404.
pub async fn wait_for<F>(
    resource: &mut Resource,
    options: &WaitOptions,
    predicate: F,
) -> Result<WaitOutcome>
where
    F: Fn(&Properties) -> bool + Send,
{
    if resource.state() != HandleState::Active {
        return Err(CloudError::usage(format!(
            "cannot wait on {}: handle is {}",
            resource.kind(),
            resource.state()
        )));
    }
    let id = resource.id().unwrap_or_default().to_string();
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        if options.is_cancelled() {
            return Err(CloudError::Cancelled);
        }
        options.pause().await?;

        polls += 1;
        if !resource.get().await? {
            return Err(ProviderError::new(404, "resource disappeared while waiting")
                .for_resource(id)
                .into());
        }

        if predicate(resource.properties()) {
            let elapsed = started.elapsed();
            tracing::info!(
                "{} {} ready after {} polls ({:?})",
                resource.kind(),
                id,
                polls,
                elapsed
            );
            return Ok(WaitOutcome { polls, elapsed });
        }

        tracing::debug!(
            "{} {} not ready (status: {}), poll {}",
            resource.kind(),
            id,
            resource.status(),
            polls
        );

        if started.elapsed() >= options.timeout {
            return Err(CloudError::Timeout(format!(
                "{} {} not ready after {:?} ({} polls)",
                resource.kind(),
                id,
                options.timeout,
                polls
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::resource::ResourceConfig;
    use crate::testing::ScriptedBackend;
    use serde_json::json;

    fn options(timeout_secs: u64) -> WaitOptions {
        WaitOptions::new(Duration::from_secs(timeout_secs), Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_third_poll() {
        let backend = ScriptedBackend::new();
        backend.on_fetch(Some(json!({"id": "i-1", "status": "pending"})));
        backend.on_fetch(Some(json!({"id": "i-1", "status": "pending"})));
        backend.on_fetch(Some(json!({"id": "i-1", "status": "active"})));

        let mut resource = Resource::bound("vendorA", "i-1", backend).unwrap();
        let outcome = resource.wait_until_ready(&options(10)).await.unwrap();

        assert_eq!(outcome.polls, 3);
        assert!(outcome.elapsed >= Duration::from_secs(3));
        assert_eq!(resource.status(), "active");
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let backend = ScriptedBackend::new();
        backend.on_fetch(Some(json!({"id": "i-1", "status": "pending"})));

        let mut resource = Resource::bound("vendorA", "i-1", backend.clone()).unwrap();
        let err = resource.wait_until_ready(&options(3)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_polls_once() {
        let backend = ScriptedBackend::new();
        backend.on_fetch(Some(json!({"id": "i-1", "status": "pending"})));

        let mut resource = Resource::bound("vendorA", "i-1", backend.clone()).unwrap();
        let err = resource.wait_until_ready(&options(0)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_first_poll() {
        let backend = ScriptedBackend::new();
        let token = CancellationToken::new();
        token.cancel();

        let mut resource = Resource::bound("vendorA", "i-1", backend.clone()).unwrap();
        let err = resource
            .wait_until_ready(&options(10).with_cancel(token))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_during_pause() {
        let backend = ScriptedBackend::new();
        backend.on_fetch(Some(json!({"id": "i-1", "status": "pending"})));
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(2500)).await;
            canceller.cancel();
        });

        let mut resource = Resource::bound("vendorA", "i-1", backend.clone()).unwrap();
        let err = resource
            .wait_until_ready(&options(60).with_cancel(token))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disappearing_resource_is_not_found() {
        let backend = ScriptedBackend::new();
        backend.on_fetch(None);

        let mut resource = Resource::bound("vendorA", "i-1", backend).unwrap();
        let err = resource.wait_until_ready(&options(10)).await.unwrap_err();

        let provider = err.as_provider_error().unwrap();
        assert!(provider.is_not_found());
        assert_eq!(provider.resource_id.as_deref(), Some("i-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_predicate() {
        let backend = ScriptedBackend::new();
        backend.on_fetch(Some(json!({"id": "i-1", "status": "active", "power_status": "stopped"})));
        backend.on_fetch(Some(json!({"id": "i-1", "status": "active", "power_status": "running"})));

        let mut resource = Resource::bound("vendorA", "i-1", backend).unwrap();
        let outcome = resource
            .wait_until(&options(10), |p| p.get("power_status") == Some(&json!("running")))
            .await
            .unwrap();
        assert_eq!(outcome.polls, 2);
    }

    #[tokio::test]
    async fn test_unbound_handle_cannot_wait() {
        let backend = ScriptedBackend::new();
        let mut resource = Resource::new("vendorA", ResourceConfig::new(), backend.clone());
        let err = resource.wait_until_ready(&options(10)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_waits_when_configured() {
        let backend = ScriptedBackend::new();
        backend.on_create(json!({"id": "i-1", "status": "pending"}));
        backend.on_fetch(Some(json!({"id": "i-1", "status": "active"})));

        let config = ResourceConfig::new().param("region", "r1").wait(options(10));
        let mut resource = Resource::new("vendorA", config, backend.clone());
        resource.create().await.unwrap();

        assert!(resource.is_ready());
        assert_eq!(backend.calls(), 2);
    }
}
