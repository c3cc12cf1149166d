use std::{sync::Arc, time::Duration};

use taskvisor::{
    AdmissionPolicy as ControllerAdmission, BackoffPolicy, ControllerSpec, JitterPolicy, RestartPolicy, TaskFn,
    TaskRef, TaskSpec,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{to_loop_outcome, to_task_result};
use crate::{controller::LoopRef, metrics::MetricsHandle};

/// Wrap a control loop into a task named after its kind.
///
/// The task forwards the supervisor's cancellation token to the loop and records the
/// exit outcome.
pub fn to_task_ref(control: LoopRef, metrics: MetricsHandle) -> TaskRef {
    let name = control.kind().as_str();
    TaskFn::arc(name, move |cancel: CancellationToken| {
        let control = Arc::clone(&control);
        let metrics = Arc::clone(&metrics);

        async move {
            let kind = control.kind();
            let res = control.run(cancel).await;

            let outcome = to_loop_outcome(&res);
            debug!(controller = %kind, outcome = outcome.as_label(), "control loop exited");
            metrics.record_loop_exited(kind.as_str(), outcome);
            to_task_result(res)
        }
    })
}

/// Control loops are started once and never restarted by the supervisor.
pub fn to_task_spec(task: TaskRef) -> TaskSpec {
    let backoff = BackoffPolicy {
        first: Duration::from_secs(1),
        max: Duration::from_secs(1),
        jitter: JitterPolicy::None,
        factor: 1.0,
    };
    TaskSpec::new(task, RestartPolicy::Never, backoff, None)
}

pub fn to_controller_spec(task: TaskRef) -> ControllerSpec {
    ControllerSpec {
        admission: ControllerAdmission::DropIfRunning,
        task_spec: to_task_spec(task),
    }
}
