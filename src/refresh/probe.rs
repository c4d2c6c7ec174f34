// SPDX-License-Identifier: GPL-3.0-only
use std::sync::Arc;
use tracing::{debug, warn};
use crate::properties::traits::PropertyStore;

/// Checks for the system property that marks the OS as served by this updater
#[derive(Clone)]
pub struct CompatibilityProbe {
    store: Arc<dyn PropertyStore>,
    marker: String,
}

impl CompatibilityProbe {
    pub fn new(store: Arc<dyn PropertyStore>, marker: impl Into<String>) -> Self {
        Self {
            store,
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Property lookups may hit the filesystem, so they run on the blocking
    /// pool. A failed lookup task counts as "not compatible".
    pub async fn check(&self) -> bool {
        let store = Arc::clone(&self.store);
        let marker = self.marker.clone();

        match tokio::task::spawn_blocking(move || store.has_property(&marker)).await {
            Ok(found) => {
                debug!(marker = %self.marker, found, "Compatibility probe finished");
                found
            }
            Err(e) => {
                warn!(marker = %self.marker, error = %e, "Compatibility probe task failed");
                false
            }
        }
    }
}
