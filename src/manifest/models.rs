// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder older manifest generators write for absent fields
const LEGACY_ABSENT: &str = "null";

/// Descriptor of the latest available update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateManifest {
    /// Version identifier of the offered build
    pub version_name: String,

    /// Changelog text or a reference to it
    #[serde(default)]
    pub changelog_ref: String,

    /// Donation page, if the maintainer has one
    #[serde(default, deserialize_with = "optional_text")]
    pub donate_link: Option<String>,

    /// Project website
    #[serde(default, deserialize_with = "optional_text")]
    pub website: Option<String>,

    /// Maintainer credit
    #[serde(default, deserialize_with = "optional_text")]
    pub developer: Option<String>,

    /// Number of add-ons published alongside the build
    #[serde(default)]
    pub addons_count: u32,
}

impl UpdateManifest {
    pub fn new(version_name: impl Into<String>) -> Self {
        Self {
            version_name: version_name.into(),
            changelog_ref: String::new(),
            donate_link: None,
            website: None,
            developer: None,
            addons_count: 0,
        }
    }
}

/// Map blank strings and the legacy `"null"` placeholder to `None`
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == LEGACY_ABSENT {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
