//! Declarative scheduler policy and its versioned wire codec.
mod codec;
pub use codec::{POLICY_API_VERSION, POLICY_KIND, PolicyCodec};

mod types;
pub use types::{
    LabelPreference, LabelsPresence, PredicateArgument, PredicatePolicy, PriorityArgument,
    PriorityPolicy, SchedulerPolicy, ServiceAffinity, ServiceAntiAffinity,
};
