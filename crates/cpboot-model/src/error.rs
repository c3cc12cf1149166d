use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid cluster cidr: {0}")]
    InvalidCidr(String),

    #[error("invalid option '{field}': {reason}")]
    InvalidOption { field: &'static str, reason: String },

    #[error("invalid recyclable volume config for {kind}: {reason}")]
    InvalidVolumeConfig { kind: String, reason: String },

    #[error("unknown volume kind: {0}")]
    UnknownVolumeKind(String),

    #[error("unknown controller kind: {0}")]
    UnknownController(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Failures of the versioned scheduler policy codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("policy document is empty")]
    Empty,

    #[error("malformed policy document: {0}")]
    Malformed(String),

    #[error("policy document has no apiVersion")]
    MissingVersion,

    #[error("unsupported policy apiVersion '{found}' (expected '{expected}')")]
    UnsupportedVersion {
        found: String,
        expected: &'static str,
    },

    #[error("unexpected document kind '{found}' (expected '{expected}')")]
    UnexpectedKind {
        found: String,
        expected: &'static str,
    },
}
