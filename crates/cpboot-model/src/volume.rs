use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{VolumeKind, error::ModelError};

/// Script executed inside the reclaim image to scrub a released volume.
pub const RECYCLER_COMMAND: &str = "/usr/share/cpboot/scripts/volumes/recycler.sh";

/// Arguments passed to [`RECYCLER_COMMAND`]; the volume is mounted at `/scrub`.
pub const RECYCLER_ARGS: &[&str] = &["/scrub"];

/// Invocation recipe for a volume reclaim job.
///
/// One value exists per [`VolumeKind`]; each carries its own timeout reflecting
/// how long scrubbing that kind of volume is expected to take.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclableVolumeConfig {
    /// Image the reclaim job runs in.
    pub image: String,
    /// Executable and its leading words.
    pub command: Vec<String>,
    /// Arguments appended to `command`.
    pub args: Vec<String>,
    /// Hard limit for a single reclaim job, in seconds.
    pub timeout_secs: u64,
}

impl RecyclableVolumeConfig {
    /// Recipe for a volume kind using the standard recycler script.
    pub fn for_kind(kind: VolumeKind, image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            command: vec![RECYCLER_COMMAND.to_string()],
            args: RECYCLER_ARGS.iter().map(|a| a.to_string()).collect(),
            timeout_secs: kind.recycle_timeout_secs(),
        }
    }

    /// Host-path recipe (60 second timeout).
    pub fn host_path(image: impl Into<String>) -> Self {
        Self::for_kind(VolumeKind::HostPath, image)
    }

    /// Network file share recipe (300 second timeout).
    pub fn nfs(image: impl Into<String>) -> Self {
        Self::for_kind(VolumeKind::Nfs, image)
    }

    /// Validate before handing the recipe to a plugin family.
    ///
    /// Rules:
    /// - `image` is not blank;
    /// - `command` has at least one non-blank word;
    /// - `timeout_secs` is positive.
    pub fn validate(&self, kind: VolumeKind) -> Result<(), ModelError> {
        let invalid = |reason: &str| ModelError::InvalidVolumeConfig {
            kind: kind.to_string(),
            reason: reason.to_string(),
        };

        if self.image.trim().is_empty() {
            return Err(invalid("image is empty"));
        }
        match self.command.first() {
            Some(cmd) if !cmd.trim().is_empty() => {}
            _ => return Err(invalid("command is empty")),
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout must be positive"));
        }
        Ok(())
    }
}

impl fmt::Display for RecyclableVolumeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecyclableVolumeConfig(image='{}', cmd={:?}, args={}, timeout={}s)",
            self.image,
            self.command,
            self.args.len(),
            self.timeout_secs,
        )
    }
}
