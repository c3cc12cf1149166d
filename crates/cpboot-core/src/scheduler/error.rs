use std::{fmt, io, path::PathBuf};

use cpboot_model::CodecError;
use thiserror::Error;

/// The configuration factory rejected a provider name or a policy.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("unknown algorithm provider '{0}'")]
    UnknownProvider(String),

    #[error("invalid predicate key '{0}': no corresponding algorithm is registered")]
    UnknownPredicate(String),

    #[error("invalid priority key '{0}': no corresponding algorithm is registered")]
    UnknownPriority(String),

    #[error("priority '{name}' must have a positive weight, got {weight}")]
    InvalidWeight { name: String, weight: i32 },

    #[error("invalid argument for '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("algorithm name must not be empty")]
    EmptyName,
}

/// Step of the resolution that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStage {
    Read,
    Decode,
    Factory,
}

impl ResolveStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveStage::Read => "read",
            ResolveStage::Decode => "decode",
            ResolveStage::Factory => "factory",
        }
    }
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduler configuration could not be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unable to read scheduler config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scheduler configuration '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("scheduler configuration rejected: {0}")]
    Factory(#[from] FactoryError),
}

impl ResolveError {
    pub fn stage(&self) -> ResolveStage {
        match self {
            ResolveError::Read { .. } => ResolveStage::Read,
            ResolveError::Decode { .. } => ResolveStage::Decode,
            ResolveError::Factory(_) => ResolveStage::Factory,
        }
    }
}
