//! Adapters from control loops to taskvisor tasks and specs.
mod result;
mod spec;

pub use result::{to_loop_outcome, to_task_result};
pub use spec::{to_controller_spec, to_task_ref, to_task_spec};
