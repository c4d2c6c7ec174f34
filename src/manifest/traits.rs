// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use std::time::Duration;
use crate::manifest::models::UpdateManifest;

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Manifest has an empty version name")]
    MissingVersion,

    #[error("Manifest refresh timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait ManifestRepository: Send + Sync {
    /// Last manifest fetched successfully, if any
    async fn current_manifest(&self) -> Option<UpdateManifest>;

    /// Fetch a fresh manifest, replacing the current one on success
    async fn refresh(&self) -> Result<UpdateManifest, ManifestError>;
}
