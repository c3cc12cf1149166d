use taskvisor::TaskError;

use crate::{controller::LoopError, metrics::LoopOutcome};

/// Classify a loop exit for metrics.
pub fn to_loop_outcome(res: &Result<(), LoopError>) -> LoopOutcome {
    match res {
        Ok(()) => LoopOutcome::Stopped,
        Err(LoopError::Canceled) => LoopOutcome::Canceled,
        Err(_) => LoopOutcome::Failed,
    }
}

/// Convert a loop exit into the task result reported to the supervisor.
pub fn to_task_result(res: Result<(), LoopError>) -> Result<(), TaskError> {
    match res {
        Ok(()) => Ok(()),
        Err(LoopError::Canceled) => Err(TaskError::Canceled),
        Err(e) => Err(TaskError::Fail {
            reason: e.to_string(),
        }),
    }
}
