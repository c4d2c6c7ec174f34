// SPDX-License-Identifier: GPL-3.0-only
pub mod probe;
pub mod orchestrator;

pub use probe::CompatibilityProbe;
pub use orchestrator::{RefreshOrchestrator, RefreshOutcome};
