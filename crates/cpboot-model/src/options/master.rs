use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default image used for volume reclaim jobs.
pub const DEFAULT_RECYCLER_IMAGE: &str = "cpboot/volume-recycler:latest";

/// Process-level options that are not specific to a single controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MasterOptions {
    /// Path to a scheduler policy document.
    ///
    /// When unset, or when nothing exists at the path, the scheduler runs with the default provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler_config_file: Option<PathBuf>,
    /// Image used by both volume reclaim recipes.
    pub recycler_image: String,
    /// Which API surfaces are announced at startup.
    pub api: ApiOptions,
}

impl Default for MasterOptions {
    fn default() -> Self {
        Self {
            scheduler_config_file: None,
            recycler_image: DEFAULT_RECYCLER_IMAGE.to_string(),
            api: ApiOptions::default(),
        }
    }
}

/// API surface toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiOptions {
    /// Serve the deprecated `v1beta3` surface.
    pub enable_v1beta3: bool,
    /// Do not serve the `v1` surface.
    pub disable_v1: bool,
}
