// SPDX-License-Identifier: GPL-3.0-only
use tracing::info;
use crate::session::session::StatusSnapshot;
use crate::status::reconciler::DisplayState;

/// Receives a fresh snapshot whenever the status should be re-rendered
pub trait StatusSink: Send {
    fn status_changed(&mut self, snapshot: &StatusSnapshot);
}

/// Sink for headless runs: every snapshot becomes a log line
#[derive(Debug, Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn status_changed(&mut self, snapshot: &StatusSnapshot) {
        let version = snapshot.manifest_version.as_deref().unwrap_or("-");
        match snapshot.display {
            DisplayState::NoUpdate => {
                let checked = snapshot
                    .last_checked_at
                    .map(|at| at.to_rfc3339())
                    .unwrap_or_else(|| "never".to_string());
                info!(last_checked = %checked, "No update available");
            }
            DisplayState::UpdateAvailable { finished: true, .. } => {
                info!(version = %version, "Update downloaded, ready to install");
            }
            DisplayState::UpdateAvailable { downloading: true, .. } => {
                info!(version = %version, "Update download in progress");
            }
            DisplayState::UpdateAvailable { .. } => {
                info!(version = %version, "Update available");
            }
            DisplayState::Blocked => {
                info!("Update checks blocked");
            }
        }

        info!(
            donate = snapshot.panels.donate,
            website = snapshot.panels.website,
            developer = snapshot.panels.developer,
            addons = snapshot.panels.addons,
            "Manifest panels"
        );
    }
}
