// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::manifest::models::UpdateManifest;
use crate::manifest::traits::{ManifestError, ManifestRepository};

/// Manifest repository reading a JSON document dropped on disk by the fetcher.
///
/// The last good manifest is kept when a refresh fails.
pub struct FileManifestRepository {
    path: PathBuf,
    current: RwLock<Option<UpdateManifest>>,
}

impl FileManifestRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            current: RwLock::new(None),
        }
    }

    /// Create a repository and load whatever manifest is already on disk.
    /// A missing or unreadable document leaves the repository empty.
    pub async fn open(path: PathBuf) -> Self {
        let repository = Self::new(path);
        if let Err(e) = repository.refresh().await {
            info!(path = %repository.path.display(), error = %e, "No usable manifest on disk yet");
        }
        repository
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_manifest(&self) -> Result<UpdateManifest, ManifestError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let manifest: UpdateManifest = serde_json::from_str(&contents)?;

        if manifest.version_name.trim().is_empty() {
            return Err(ManifestError::MissingVersion);
        }

        Ok(manifest)
    }
}

#[async_trait]
impl ManifestRepository for FileManifestRepository {
    async fn current_manifest(&self) -> Option<UpdateManifest> {
        self.current.read().await.clone()
    }

    async fn refresh(&self) -> Result<UpdateManifest, ManifestError> {
        match self.read_manifest().await {
            Ok(manifest) => {
                info!(
                    path = %self.path.display(),
                    version = %manifest.version_name,
                    "Manifest loaded"
                );
                *self.current.write().await = Some(manifest.clone());
                Ok(manifest)
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Manifest document unusable");
                Err(e)
            }
        }
    }
}
