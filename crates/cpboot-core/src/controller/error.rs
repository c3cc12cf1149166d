use thiserror::Error;

/// Failure while constructing a control loop or one of its plugins.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("plugin probe failed: {0}")]
    Probe(String),

    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure reported by a running control loop.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("canceled")]
    Canceled,

    #[error("sync failed: {0}")]
    Sync(String),

    #[error("internal error: {0}")]
    Internal(String),
}
