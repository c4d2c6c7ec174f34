// SPDX-License-Identifier: GPL-3.0-only
use serde::Serialize;
use crate::manifest::models::UpdateManifest;

/// Which secondary panels the host should show for the current manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManifestPanels {
    pub donate: bool,
    pub website: bool,
    pub developer: bool,
    pub addons: bool,
}

impl ManifestPanels {
    pub fn from_manifest(manifest: Option<&UpdateManifest>) -> Self {
        let Some(manifest) = manifest else {
            return Self::default();
        };

        Self {
            donate: manifest.donate_link.is_some(),
            website: manifest.website.is_some(),
            developer: manifest.developer.is_some(),
            addons: manifest.addons_count > 0,
        }
    }
}
