// SPDX-License-Identifier: GPL-3.0-only
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Update flags persisted across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub update_available: bool,
    pub update_ignored: bool,
    pub download_ongoing: bool,
    pub download_finished: bool,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Partial update to [`PersistedState`]; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub update_available: Option<bool>,
    pub update_ignored: Option<bool>,
    pub download_ongoing: Option<bool>,
    pub download_finished: Option<bool>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl StatePatch {
    pub fn update_available(mut self, value: bool) -> Self {
        self.update_available = Some(value);
        self
    }

    pub fn update_ignored(mut self, value: bool) -> Self {
        self.update_ignored = Some(value);
        self
    }

    pub fn download_ongoing(mut self, value: bool) -> Self {
        self.download_ongoing = Some(value);
        self
    }

    pub fn download_finished(mut self, value: bool) -> Self {
        self.download_finished = Some(value);
        self
    }

    pub fn last_checked_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_checked_at = Some(at);
        self
    }

    /// Apply onto `state`.
    ///
    /// Raising one of the download flags clears the other so that ongoing and
    /// finished are never set together.
    pub fn apply(&self, state: &mut PersistedState) {
        if let Some(value) = self.update_available {
            state.update_available = value;
        }
        if let Some(value) = self.update_ignored {
            state.update_ignored = value;
        }
        if let Some(value) = self.download_ongoing {
            state.download_ongoing = value;
            if value {
                state.download_finished = false;
            }
        }
        if let Some(value) = self.download_finished {
            state.download_finished = value;
            if value {
                state.download_ongoing = false;
            }
        }
        if let Some(at) = self.last_checked_at {
            state.last_checked_at = Some(at);
        }
    }
}
