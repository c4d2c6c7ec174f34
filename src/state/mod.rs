// SPDX-License-Identifier: GPL-3.0-only
pub mod models;
pub mod traits;
pub mod memory;

pub use models::{PersistedState, StatePatch};
pub use traits::StateStore;
pub use memory::MemoryStateStore;
