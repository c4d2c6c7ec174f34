// SPDX-License-Identifier: GPL-3.0-only
use anyhow::Context;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info};
use crate::state::models::{PersistedState, StatePatch};
use crate::state::traits::StateStore;

/// In-process state store
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: RwLock<PersistedState>,
}

impl MemoryStateStore {
    pub fn new(initial: PersistedState) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Seed from a JSON document written by the download subsystem.
    /// A missing file yields the default state.
    pub fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No state seed found, starting from defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state seed {}", path.display()))?;
        let state: PersistedState = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed state seed {}", path.display()))?;

        info!(
            path = %path.display(),
            update_available = state.update_available,
            download_ongoing = state.download_ongoing,
            download_finished = state.download_finished,
            "Loaded persisted state"
        );
        Ok(Self::new(state))
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self) -> PersistedState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, patch: StatePatch) {
        debug!(?patch, "Applying state patch");
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        patch.apply(&mut state);
    }
}
