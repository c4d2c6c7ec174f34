// SPDX-License-Identifier: GPL-3.0-only
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::events::bus::EventBus;
use crate::manifest::traits::{ManifestError, ManifestRepository};
use crate::refresh::probe::CompatibilityProbe;

/// How a single check/refresh cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Manifest replaced and the refreshed event published
    Refreshed { version_name: String },
    /// Compatibility marker missing; nothing was attempted
    Incompatible,
    /// Refresh failed; the previous manifest stays in effect
    Failed { reason: String },
}

/// Runs probe -> refresh -> publish, with at most one cycle in flight
#[derive(Clone)]
pub struct RefreshOrchestrator {
    probe: CompatibilityProbe,
    repository: Arc<dyn ManifestRepository>,
    bus: Arc<EventBus>,
    refresh_timeout: Duration,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the cycle ends, even by panic
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RefreshOrchestrator {
    pub fn new(
        probe: CompatibilityProbe,
        repository: Arc<dyn ManifestRepository>,
        bus: Arc<EventBus>,
        refresh_timeout: Duration,
    ) -> Self {
        Self {
            probe,
            repository,
            bus,
            refresh_timeout,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start a check/refresh cycle in the background.
    ///
    /// Returns `None` when a cycle is already running; the call collapses
    /// into it rather than queueing. Must be called within a tokio runtime.
    /// The returned task is never cancelled by this type; dropping the
    /// handle detaches it.
    pub fn activate(&self) -> Option<JoinHandle<RefreshOutcome>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Refresh already in flight, activation collapsed");
            return None;
        }

        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        let this = self.clone();
        Some(tokio::spawn(async move { this.run_cycle(guard).await }))
    }

    async fn run_cycle(self, guard: InFlightGuard) -> RefreshOutcome {
        if !self.probe.check().await {
            info!(marker = %self.probe.marker(), "Compatibility marker absent, skipping refresh");
            return RefreshOutcome::Incompatible;
        }

        let result = match tokio::time::timeout(self.refresh_timeout, self.repository.refresh()).await {
            Ok(result) => result,
            Err(_) => Err(ManifestError::Timeout(self.refresh_timeout)),
        };

        // The refresh is over; let subscribers reacting to the event start a new cycle.
        drop(guard);

        match result {
            Ok(manifest) => {
                let delivered = self.bus.publish();
                info!(
                    version = %manifest.version_name,
                    delivered,
                    "Manifest refreshed"
                );
                RefreshOutcome::Refreshed {
                    version_name: manifest.version_name,
                }
            }
            Err(e) => {
                warn!(error = %e, "Manifest refresh failed, keeping last known state");
                RefreshOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use crate::manifest::models::UpdateManifest;
    use crate::test_helpers::{MemoryPropertyStore, ScriptedManifestRepository};

    const MARKER: &str = "ro.ota.manifest";

    fn compatible_probe() -> CompatibilityProbe {
        CompatibilityProbe::new(
            Arc::new(MemoryPropertyStore::from_pairs(&[(MARKER, "https://example.com/ota.json")])),
            MARKER,
        )
    }

    fn counting_bus() -> (Arc<EventBus>, Arc<AtomicUsize>) {
        let bus = Arc::new(EventBus::new());
        let events = Arc::new(AtomicUsize::new(0));
        let handler_events = Arc::clone(&events);
        bus.subscribe(move || {
            handler_events.fetch_add(1, Ordering::SeqCst);
        });
        (bus, events)
    }

    fn orchestrator(
        probe: CompatibilityProbe,
        repository: Arc<ScriptedManifestRepository>,
        bus: Arc<EventBus>,
    ) -> RefreshOrchestrator {
        RefreshOrchestrator::new(probe, repository, bus, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_successful_cycle_publishes_once() {
        let repository = Arc::new(ScriptedManifestRepository::serving(UpdateManifest::new("2.0")));
        let (bus, events) = counting_bus();
        let orchestrator = orchestrator(compatible_probe(), Arc::clone(&repository), bus);

        let outcome = orchestrator.activate().unwrap().await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Refreshed { version_name: "2.0".to_string() });
        assert_eq!(repository.refresh_calls(), 1);
        assert_eq!(events.load(Ordering::SeqCst), 1);
        assert!(!orchestrator.is_in_flight());
    }

    #[tokio::test]
    async fn test_incompatible_skips_refresh() {
        let probe = CompatibilityProbe::new(Arc::new(MemoryPropertyStore::default()), MARKER);
        let repository = Arc::new(ScriptedManifestRepository::serving(UpdateManifest::new("2.0")));
        let (bus, events) = counting_bus();
        let orchestrator = orchestrator(probe, Arc::clone(&repository), bus);

        let outcome = orchestrator.activate().unwrap().await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Incompatible);
        assert_eq!(repository.refresh_calls(), 0);
        assert_eq!(events.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_publishes_nothing() {
        let repository = Arc::new(ScriptedManifestRepository::failing());
        let (bus, events) = counting_bus();
        let orchestrator = orchestrator(compatible_probe(), Arc::clone(&repository), bus);

        let outcome = orchestrator.activate().unwrap().await.unwrap();
        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        assert_eq!(repository.refresh_calls(), 1);
        assert_eq!(events.load(Ordering::SeqCst), 0);
        assert!(!orchestrator.is_in_flight());
    }

    #[tokio::test]
    async fn test_concurrent_activations_collapse() {
        let (repository, gate) = ScriptedManifestRepository::gated(UpdateManifest::new("2.0"));
        let repository = Arc::new(repository);
        let (bus, events) = counting_bus();
        let orchestrator = orchestrator(compatible_probe(), Arc::clone(&repository), bus);

        let first = orchestrator.activate().expect("first activation runs");
        assert!(orchestrator.activate().is_none());
        assert!(orchestrator.activate().is_none());

        gate.add_permits(1);
        first.await.unwrap();

        assert_eq!(repository.refresh_calls(), 1);
        assert_eq!(events.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_activation_after_completion_runs_again() {
        let repository = Arc::new(ScriptedManifestRepository::serving(UpdateManifest::new("2.0")));
        let (bus, events) = counting_bus();
        let orchestrator = orchestrator(compatible_probe(), Arc::clone(&repository), bus);

        orchestrator.activate().unwrap().await.unwrap();
        orchestrator.activate().unwrap().await.unwrap();

        assert_eq!(repository.refresh_calls(), 2);
        assert_eq!(events.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_timeout_is_failure() {
        let (repository, _gate) = ScriptedManifestRepository::gated(UpdateManifest::new("2.0"));
        let repository = Arc::new(repository);
        let (bus, events) = counting_bus();
        let orchestrator = RefreshOrchestrator::new(
            compatible_probe(),
            Arc::clone(&repository) as Arc<dyn ManifestRepository>,
            bus,
            Duration::from_millis(50),
        );

        let outcome = orchestrator.activate().unwrap().await.unwrap();
        assert_eq!(
            outcome,
            RefreshOutcome::Failed { reason: "Manifest refresh timed out after 50ms".to_string() }
        );
        assert_eq!(events.load(Ordering::SeqCst), 0);
        assert!(!orchestrator.is_in_flight());
    }

    #[test]
    fn test_timeout_error_keeps_subsecond_precision() {
        let error = ManifestError::Timeout(Duration::from_millis(250));
        assert_eq!(error.to_string(), "Manifest refresh timed out after 250ms");
    }

    #[tokio::test]
    async fn test_result_discarded_without_subscribers() {
        let repository = Arc::new(ScriptedManifestRepository::serving(UpdateManifest::new("2.0")));
        let orchestrator = orchestrator(compatible_probe(), Arc::clone(&repository), Arc::new(EventBus::new()));

        let outcome = orchestrator.activate().unwrap().await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Refreshed { version_name: "2.0".to_string() });
        assert_eq!(repository.current_manifest().await.unwrap().version_name, "2.0");
    }
}
