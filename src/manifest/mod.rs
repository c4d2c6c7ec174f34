// SPDX-License-Identifier: GPL-3.0-only
pub mod models;
pub mod traits;
pub mod file;

pub use models::UpdateManifest;
pub use traits::{ManifestError, ManifestRepository};
pub use file::FileManifestRepository;
