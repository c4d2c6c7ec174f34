// SPDX-License-Identifier: GPL-3.0-only
pub mod version;
pub mod reconciler;
pub mod links;
pub mod panels;

pub use version::versions_equal;
pub use reconciler::{reconcile, DisplayState};
pub use links::{normalize_link, open_link, LinkOpener};
pub use panels::ManifestPanels;
