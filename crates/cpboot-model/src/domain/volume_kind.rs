use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Volume families that support recycling after a claim is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeKind {
    /// Directory on the node's local filesystem.
    HostPath,
    /// Network file share.
    Nfs,
}

impl VolumeKind {
    /// Seconds a reclaim job for this kind is allowed to run.
    pub fn recycle_timeout_secs(&self) -> u64 {
        match self {
            VolumeKind::HostPath => 60,
            VolumeKind::Nfs => 300,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeKind::HostPath => "host-path",
            VolumeKind::Nfs => "nfs",
        }
    }
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolumeKind {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host-path" | "hostpath" => Ok(VolumeKind::HostPath),
            "nfs" => Ok(VolumeKind::Nfs),
            other => Err(ModelError::UnknownVolumeKind(other.to_string())),
        }
    }
}
