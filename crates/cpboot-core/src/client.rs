//! Handles to the collaborators every control loop is built against.
//!
//! The bootstrap layer only passes these through; it never issues requests itself.
use std::sync::Arc;

/// Capability-bound handle for reading and writing control-plane objects.
///
/// Consistency and locking are the object store's concern; one handle is shared by all loops.
pub trait ControlPlaneClient: Send + Sync {
    /// Address of the API the handle talks to, used in diagnostics.
    fn endpoint(&self) -> &str;
}

/// Shared client handle.
pub type ClientHandle = Arc<dyn ControlPlaneClient>;

/// Cloud integration consulted by the node controller.
pub trait CloudProvider: Send + Sync {
    /// Provider name (e.g. "aws", "gce").
    fn name(&self) -> &str;
}

/// Shared cloud provider handle.
pub type CloudHandle = Arc<dyn CloudProvider>;
