// SPDX-License-Identifier: GPL-3.0-only

/// Whether the installed build is the one the manifest offers.
///
/// Literal, case-sensitive comparison: "1.0" and "1.0.0" are different builds.
pub fn versions_equal(installed: &str, manifest: &str) -> bool {
    installed == manifest
}
