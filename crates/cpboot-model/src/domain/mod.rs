mod cidr;
pub use cidr::ClusterCidr;

mod controller;
pub use controller::ControllerKind;

mod volume_kind;
pub use volume_kind::VolumeKind;

/// Duration value in milliseconds.
///
/// Used for sync periods and grace periods in controller options.
pub type PeriodMs = u64;
