#![cfg(feature = "subscriber")]

//! Supervisor event logging.
//!
//! Every control loop runs as a supervised task named after its controller kind, so the
//! `controller` field of these records matches the one written by the bootstrap sequence.

use async_trait::async_trait;
use taskvisor::{Event, EventKind, Subscribe};
use tracing::{debug, error, info, trace, warn};

/// Taskvisor subscriber that turns supervisor events into tracing records.
#[derive(Debug, Default)]
pub struct Subscriber;

/// Events are queued per subscriber; overflow is reported as `SubscriberOverflow`.
const QUEUE_CAPACITY: usize = 1024;

#[async_trait]
impl Subscribe for Subscriber {
    async fn on_event(&self, event: &Event) {
        log_event(&Fields::from(event));
    }

    fn name(&self) -> &'static str {
        "cpboot-event-log"
    }

    fn queue_capacity(&self) -> usize {
        QUEUE_CAPACITY
    }
}

/// Event fields with placeholders for absent values.
struct Fields<'a> {
    kind: EventKind,
    controller: &'a str,
    reason: Option<&'a str>,
    attempt: u32,
    delay_ms: u32,
    timeout_ms: u32,
}

impl<'a> From<&'a Event> for Fields<'a> {
    fn from(e: &'a Event) -> Self {
        Self {
            kind: e.kind,
            controller: e.task.as_deref().unwrap_or("-"),
            reason: e.reason.as_deref(),
            attempt: e.attempt.unwrap_or(0),
            delay_ms: e.delay_ms.unwrap_or(0),
            timeout_ms: e.timeout_ms.unwrap_or(0),
        }
    }
}

impl Fields<'_> {
    fn reason(&self) -> &str {
        self.reason.unwrap_or("-")
    }
}

fn log_event(f: &Fields<'_>) {
    let msg = describe(f.kind);
    let controller = f.controller;

    match f.kind {
        EventKind::TaskAddRequested
        | EventKind::TaskRemoveRequested
        | EventKind::TaskRemoved
        | EventKind::ControllerSubmitted => trace!(controller, "{msg}"),
        EventKind::TaskAdded | EventKind::ControllerSlotTransition => {
            debug!(controller, reason = f.reason(), "{msg}")
        }
        EventKind::TaskStarting => info!(controller, attempt = f.attempt, "{msg}"),
        EventKind::TaskStopped => debug!(controller, "{msg}"),
        EventKind::TaskFailed => {
            error!(controller, attempt = f.attempt, reason = f.reason(), "{msg}")
        }
        EventKind::TimeoutHit => warn!(controller, timeout_ms = f.timeout_ms, "{msg}"),
        EventKind::BackoffScheduled => debug!(
            controller,
            attempt = f.attempt,
            delay_ms = f.delay_ms,
            after_failure = f.reason.is_some(),
            "{msg}"
        ),
        // Control loops are never restarted, so exhaustion is the normal end of a loop.
        EventKind::ActorExhausted => debug!(controller, reason = f.reason(), "{msg}"),
        EventKind::ActorDead => error!(controller, reason = f.reason(), "{msg}"),
        EventKind::ControllerRejected => warn!(controller, reason = f.reason(), "{msg}"),
        EventKind::ShutdownRequested | EventKind::AllStoppedWithinGrace => info!("{msg}"),
        EventKind::GraceExceeded => warn!("{msg}"),
        EventKind::SubscriberPanicked | EventKind::SubscriberOverflow => {
            error!(subscriber = controller, reason = f.reason(), "{msg}")
        }
    }
}

fn describe(kind: EventKind) -> &'static str {
    match kind {
        EventKind::TaskAddRequested => "control loop registration requested",
        EventKind::TaskAdded => "control loop registered",
        EventKind::TaskRemoveRequested => "control loop removal requested",
        EventKind::TaskRemoved => "control loop removed",
        EventKind::TaskStarting => "control loop running",
        EventKind::TaskStopped => "control loop stopped",
        EventKind::TaskFailed => "control loop failed",
        EventKind::TimeoutHit => "control loop exceeded its timeout",
        EventKind::BackoffScheduled => "control loop rerun scheduled",
        EventKind::ActorExhausted => "control loop finished; no restart",
        EventKind::ActorDead => "control loop terminated permanently",
        EventKind::ControllerSubmitted => "control loop submitted to its slot",
        EventKind::ControllerRejected => "control loop slot rejected submission",
        EventKind::ControllerSlotTransition => "control loop slot changed state",
        EventKind::ShutdownRequested => "shutdown requested; stopping control loops",
        EventKind::AllStoppedWithinGrace => "all control loops stopped within grace period",
        EventKind::GraceExceeded => "grace period exceeded; some control loops did not stop",
        EventKind::SubscriberOverflow => "event dropped: subscriber queue full",
        EventKind::SubscriberPanicked => "event subscriber panicked",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EventKind; 19] = [
        EventKind::TaskAddRequested,
        EventKind::TaskAdded,
        EventKind::TaskRemoveRequested,
        EventKind::TaskRemoved,
        EventKind::TaskStarting,
        EventKind::TaskStopped,
        EventKind::TaskFailed,
        EventKind::TimeoutHit,
        EventKind::BackoffScheduled,
        EventKind::ActorExhausted,
        EventKind::ActorDead,
        EventKind::ControllerSubmitted,
        EventKind::ControllerRejected,
        EventKind::ControllerSlotTransition,
        EventKind::ShutdownRequested,
        EventKind::AllStoppedWithinGrace,
        EventKind::GraceExceeded,
        EventKind::SubscriberOverflow,
        EventKind::SubscriberPanicked,
    ];

    #[test]
    fn every_kind_has_a_message() {
        for kind in ALL {
            assert!(!describe(kind).is_empty());
        }
    }

    #[test]
    fn logging_without_subscriber_installed_is_harmless() {
        for kind in ALL {
            log_event(&Fields {
                kind,
                controller: "scheduler",
                reason: Some("boom"),
                attempt: 1,
                delay_ms: 0,
                timeout_ms: 0,
            });
        }
    }

    #[test]
    fn subscriber_identity() {
        let sub = Subscriber;
        assert_eq!(sub.name(), "cpboot-event-log");
        assert_eq!(sub.queue_capacity(), QUEUE_CAPACITY);
    }
}
