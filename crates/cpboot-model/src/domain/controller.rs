use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The fixed set of control loops brought up at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerKind {
    Namespace,
    ClaimBinder,
    VolumeRecycler,
    Replication,
    Endpoint,
    Scheduler,
    ResourceQuota,
    Node,
}

impl ControllerKind {
    /// All kinds, in the order the bootstrap sequence starts them.
    pub const ALL: [ControllerKind; 8] = [
        ControllerKind::Namespace,
        ControllerKind::ClaimBinder,
        ControllerKind::VolumeRecycler,
        ControllerKind::Replication,
        ControllerKind::Endpoint,
        ControllerKind::Scheduler,
        ControllerKind::ResourceQuota,
        ControllerKind::Node,
    ];

    /// Stable label used in logs, task slots and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Namespace => "namespace",
            ControllerKind::ClaimBinder => "claim-binder",
            ControllerKind::VolumeRecycler => "volume-recycler",
            ControllerKind::Replication => "replication",
            ControllerKind::Endpoint => "endpoint",
            ControllerKind::Scheduler => "scheduler",
            ControllerKind::ResourceQuota => "resource-quota",
            ControllerKind::Node => "node",
        }
    }

    /// Human-readable subsystem name for operator-facing messages.
    pub fn description(&self) -> &'static str {
        match self {
            ControllerKind::Namespace => "namespace manager",
            ControllerKind::ClaimBinder => "persistent volume claim binder",
            ControllerKind::VolumeRecycler => "persistent volume recycler",
            ControllerKind::Replication => "replication manager",
            ControllerKind::Endpoint => "endpoint controller",
            ControllerKind::Scheduler => "scheduler",
            ControllerKind::ResourceQuota => "resource quota manager",
            ControllerKind::Node => "node controller",
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerKind {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == norm)
            .ok_or_else(|| ModelError::UnknownController(s.to_string()))
    }
}
