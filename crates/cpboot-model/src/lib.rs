mod domain;
pub use domain::{ClusterCidr, ControllerKind, PeriodMs, VolumeKind};

mod error;
pub use error::{CodecError, ModelError, ModelResult};

mod options;
pub use options::{ApiOptions, ControllerManagerOptions, MasterOptions};

mod policy;
pub use policy::{
    LabelPreference, LabelsPresence, POLICY_API_VERSION, POLICY_KIND, PolicyCodec,
    PredicateArgument, PredicatePolicy, PriorityArgument, PriorityPolicy, SchedulerPolicy,
    ServiceAffinity, ServiceAntiAffinity,
};

mod volume;
pub use volume::{RECYCLER_ARGS, RECYCLER_COMMAND, RecyclableVolumeConfig};
