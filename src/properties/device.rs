// SPDX-License-Identifier: GPL-3.0-only
use serde::Serialize;
use crate::properties::traits::PropertyStore;

pub const BRAND_PROPERTY: &str = "ro.product.brand";
pub const MODEL_PROPERTY: &str = "ro.product.model";
pub const BUILD_DATE_PROPERTY: &str = "ro.build.date";
pub const PLATFORM_RELEASE_PROPERTY: &str = "ro.build.version.release";

/// Shown when the installed OS version property is missing
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Description of the running device, as shown next to the update status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub build_date: Option<String>,
    pub platform_release: Option<String>,
    pub os_version: String,
}

impl DeviceInfo {
    pub fn collect(store: &dyn PropertyStore, version_property: &str) -> Self {
        Self {
            brand: store.get_property(BRAND_PROPERTY),
            model: store.get_property(MODEL_PROPERTY),
            build_date: store.get_property(BUILD_DATE_PROPERTY),
            platform_release: store.get_property(PLATFORM_RELEASE_PROPERTY),
            os_version: store
                .get_property(version_property)
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        }
    }

    /// "Brand Model", or whichever half is known
    pub fn device_name(&self) -> Option<String> {
        match (&self.brand, &self.model) {
            (Some(brand), Some(model)) => Some(format!("{} {}", brand, model)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}
