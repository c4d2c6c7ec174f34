// SPDX-License-Identifier: GPL-3.0-only
use serde::Serialize;
use crate::manifest::models::UpdateManifest;
use crate::state::models::PersistedState;
use crate::status::version::versions_equal;

/// The single status rendered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DisplayState {
    NoUpdate,
    UpdateAvailable { downloading: bool, finished: bool },
    Blocked,
}

impl DisplayState {
    /// Whether showing this state should record a "last checked" time
    pub fn confirms_no_update(&self) -> bool {
        matches!(self, DisplayState::NoUpdate)
    }
}

/// Derive the display state from the manifest and persisted flags.
///
/// Never yields [`DisplayState::Blocked`]; blocking is a session concern.
/// The caller is responsible for stamping `last_checked_at` on `NoUpdate`.
pub fn reconcile(
    manifest: Option<&UpdateManifest>,
    state: &PersistedState,
    installed_version: &str,
) -> DisplayState {
    let Some(manifest) = manifest else {
        return DisplayState::NoUpdate;
    };

    let same_version = versions_equal(installed_version, &manifest.version_name);

    // An ignored update stays visible as available.
    let available = state.update_available || (!state.update_available && state.update_ignored);

    if !available || same_version {
        return DisplayState::NoUpdate;
    }

    // Finished is checked first so a torn read with both flags set shows finished.
    if state.download_finished {
        DisplayState::UpdateAvailable { downloading: false, finished: true }
    } else if state.download_ongoing {
        DisplayState::UpdateAvailable { downloading: true, finished: false }
    } else {
        DisplayState::UpdateAvailable { downloading: false, finished: false }
    }
}
