// SPDX-License-Identifier: GPL-3.0-only
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::properties::traits::PropertyStore;

/// Property store backed by a build.prop-style file.
///
/// The file is re-read on every lookup so that a probe run after the
/// file changes sees the new contents.
#[derive(Debug, Clone)]
pub struct SystemPropertyStore {
    path: PathBuf,
}

impl SystemPropertyStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => parse_properties(&contents),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Property file unreadable");
                HashMap::new()
            }
        }
    }
}

impl PropertyStore for SystemPropertyStore {
    fn get_property(&self, name: &str) -> Option<String> {
        self.load().remove(name)
    }
}

/// Parse `key=value` lines, skipping comments and blank lines.
///
/// Later definitions win and empty values count as undefined.
pub fn parse_properties(contents: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            continue;
        }

        if value.is_empty() {
            props.remove(key);
        } else {
            props.insert(key.to_string(), value.to_string());
        }
    }

    props
}
