// SPDX-License-Identifier: GPL-3.0-only
use crate::state::models::{PersistedState, StatePatch};

/// Access to persisted update flags.
///
/// Writers outside this crate (the download subsystem) may race with readers;
/// a `get` is not guaranteed to be atomic with respect to them.
pub trait StateStore: Send + Sync {
    fn get(&self) -> PersistedState;

    fn set(&self, patch: StatePatch);
}
