// SPDX-License-Identifier: GPL-3.0-only

/// Read-only view over device/system properties.
///
/// Implementations must be safe to call from background tasks.
pub trait PropertyStore: Send + Sync {
    /// Look up a property value
    fn get_property(&self, name: &str) -> Option<String>;

    /// Check whether a property is defined at all
    fn has_property(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }
}
