use cpboot_model::{ControllerKind, ModelError};
use thiserror::Error;

use crate::{
    controller::BuildError,
    scheduler::ResolveError,
    volume::RecyclerError,
};

/// Launcher-level failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("supervisor error: {0}")]
    Supervisor(String),

    #[error("launcher is shut down")]
    ShutDown,
}

/// Reasons the scheduler could not be brought up.
#[derive(Debug, Error)]
pub enum SchedulerStartError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("building scheduler: {0}")]
    Build(#[source] BuildError),

    #[error("launching scheduler: {0}")]
    Launch(#[source] CoreError),
}

impl SchedulerStartError {
    /// Short label of the step that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            SchedulerStartError::Resolve(e) => e.stage().as_str(),
            SchedulerStartError::Build(_) => "build",
            SchedulerStartError::Launch(_) => "launch",
        }
    }
}

/// Failure to activate a control loop during bootstrap.
///
/// Recycler and scheduler failures are fatal to the process: there is no safe partial
/// start without them. Every other variant is propagated and the caller decides.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid controller options: {0}")]
    Options(#[from] ModelError),

    #[error("could not start persistent volume recycler: {0}")]
    Recycler(#[source] RecyclerError),

    #[error("unable to start scheduler: {0}")]
    Scheduler(#[source] SchedulerStartError),

    #[error("failed to build {controller} controller: {source}")]
    Build {
        controller: ControllerKind,
        #[source]
        source: BuildError,
    },

    #[error("failed to launch {controller} controller: {source}")]
    Launch {
        controller: ControllerKind,
        #[source]
        source: CoreError,
    },
}

impl StartupError {
    /// Returns `true` if the process must not continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StartupError::Recycler(_) | StartupError::Scheduler(_))
    }

    /// Subsystem whose activation failed, if the failure is tied to one.
    pub fn controller(&self) -> Option<ControllerKind> {
        match self {
            StartupError::Options(_) => None,
            StartupError::Recycler(_) => Some(ControllerKind::VolumeRecycler),
            StartupError::Scheduler(_) => Some(ControllerKind::Scheduler),
            StartupError::Build { controller, .. } | StartupError::Launch { controller, .. } => {
                Some(*controller)
            }
        }
    }

    /// Short label of the step that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            StartupError::Options(_) => "options",
            StartupError::Recycler(e) => e.stage(),
            StartupError::Scheduler(e) => e.stage(),
            StartupError::Build { .. } => "build",
            StartupError::Launch { .. } => "launch",
        }
    }
}
