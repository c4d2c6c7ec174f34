// SPDX-License-Identifier: GPL-3.0-only
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use crate::events::bus::{EventBus, SubscriptionHandle};
use crate::manifest::traits::ManifestRepository;
use crate::properties::device::DeviceInfo;
use crate::properties::traits::PropertyStore;
use crate::state::models::StatePatch;
use crate::state::traits::StateStore;
use crate::status::links::normalize_link;
use crate::status::panels::ManifestPanels;
use crate::status::reconciler::{reconcile, DisplayState};

/// Everything a host needs to render the update screen once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub display: DisplayState,
    pub panels: ManifestPanels,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub manifest_version: Option<String>,
    /// Openable donate URL, `None` when the manifest has no link
    pub donate_url: Option<String>,
    /// Openable website URL, `None` when the manifest has no link
    pub website_url: Option<String>,
}

#[derive(Debug)]
enum SessionMessage {
    ManifestRefreshed,
}

/// The rendering context of one update screen.
///
/// Bus notifications arrive on whatever task published them; the session's
/// handler only forwards them into its own channel, and re-derivation happens
/// when the owner awaits [`Session::next_change`].
pub struct Session {
    properties: Arc<dyn PropertyStore>,
    repository: Arc<dyn ManifestRepository>,
    state: Arc<dyn StateStore>,
    bus: Arc<EventBus>,
    version_property: String,
    blocked: bool,
    subscription: Option<SubscriptionHandle>,
    tx: mpsc::UnboundedSender<SessionMessage>,
    rx: mpsc::UnboundedReceiver<SessionMessage>,
}

impl Session {
    pub fn new(
        properties: Arc<dyn PropertyStore>,
        repository: Arc<dyn ManifestRepository>,
        state: Arc<dyn StateStore>,
        bus: Arc<EventBus>,
        version_property: impl Into<String>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            properties,
            repository,
            state,
            bus,
            version_property: version_property.into(),
            blocked: false,
            subscription: None,
            tx,
            rx,
        }
    }

    /// Subscribe to manifest events and render the current status.
    ///
    /// Events published while the session was stopped are lost, so the
    /// status is always re-derived here.
    pub async fn start(&mut self) -> StatusSnapshot {
        if self.subscription.is_none() {
            let tx = self.tx.clone();
            let handle = self.bus.subscribe(move || {
                let _ = tx.send(SessionMessage::ManifestRefreshed);
            });
            self.subscription = Some(handle);
            info!(topic = self.bus.topic(), "Session started");
        }

        self.render().await
    }

    /// Release the subscription and drop any undelivered notifications
    pub fn stop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.bus.unsubscribe(handle);
            info!("Session stopped");
        }
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Host-reported unmet preconditions (e.g. no connectivity)
    pub fn set_blocked(&mut self, blocked: bool) {
        if self.blocked != blocked {
            debug!(blocked, "Session blocked state changed");
        }
        self.blocked = blocked;
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Wait for the next manifest notification and re-derive the status.
    ///
    /// Notifications that piled up are coalesced into one render. Returns
    /// `None` when the session is not started.
    pub async fn next_change(&mut self) -> Option<StatusSnapshot> {
        if !self.is_active() {
            return None;
        }

        let SessionMessage::ManifestRefreshed = self.rx.recv().await?;
        let mut coalesced = 0usize;
        while self.rx.try_recv().is_ok() {
            coalesced += 1;
        }
        debug!(coalesced, "Manifest refreshed, re-deriving status");

        Some(self.render().await)
    }

    /// Derive the status from current inputs.
    ///
    /// A `NoUpdate` result records the time of this confirmation.
    pub async fn render(&self) -> StatusSnapshot {
        let manifest = self.repository.current_manifest().await;
        let panels = ManifestPanels::from_manifest(manifest.as_ref());
        let manifest_version = manifest.as_ref().map(|m| m.version_name.clone());
        let donate_url = manifest.as_ref().and_then(|m| normalize_link(m.donate_link.as_deref()));
        let website_url = manifest.as_ref().and_then(|m| normalize_link(m.website.as_deref()));
        let state = self.state.get();

        if self.blocked {
            return StatusSnapshot {
                display: DisplayState::Blocked,
                panels,
                last_checked_at: state.last_checked_at,
                manifest_version,
                donate_url,
                website_url,
            };
        }

        let installed = self.installed_version().await;
        let display_state = reconcile(manifest.as_ref(), &state, &installed);

        let last_checked_at = if display_state.confirms_no_update() {
            let now = Utc::now();
            self.state.set(StatePatch::default().last_checked_at(now));
            Some(now)
        } else {
            state.last_checked_at
        };

        debug!(status = ?display_state, installed = %installed, "Status reconciled");
        StatusSnapshot {
            display: display_state,
            panels,
            last_checked_at,
            manifest_version,
            donate_url,
            website_url,
        }
    }

    /// Installed OS version, read on the blocking pool like the probe.
    /// A missing property (or failed read) is `""`, which never equals a
    /// manifest version.
    async fn installed_version(&self) -> String {
        let properties = Arc::clone(&self.properties);
        let name = self.version_property.clone();

        match tokio::task::spawn_blocking(move || properties.get_property(&name)).await {
            Ok(version) => version.unwrap_or_default(),
            Err(e) => {
                warn!(property = %self.version_property, error = %e, "Installed version lookup failed");
                String::new()
            }
        }
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::collect(self.properties.as_ref(), &self.version_property)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
