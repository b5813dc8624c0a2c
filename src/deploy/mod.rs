//! Deployment helpers: blueprint checks and static asset preparation.

pub mod manifest;
pub mod static_assets;

pub use manifest::{Blueprint, ManifestSummary};
pub use static_assets::ensure_static_dir;
