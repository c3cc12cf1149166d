use serde::{Deserialize, Serialize};

/// Placement predicates and priorities requested by an operator.
///
/// Names refer to algorithms known to the scheduler configuration factory, unless an
/// argument is attached, in which case the entry defines a custom algorithm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerPolicy {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default)]
    pub predicates: Vec<PredicatePolicy>,
    #[serde(default)]
    pub priorities: Vec<PriorityPolicy>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredicatePolicy {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<PredicateArgument>,
}

impl PredicatePolicy {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }
}

/// Parameters of a custom predicate; exactly one field is expected to be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredicateArgument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_affinity: Option<ServiceAffinity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels_presence: Option<LabelsPresence>,
}

impl PredicateArgument {
    /// Number of argument variants that are set.
    pub fn variants(&self) -> usize {
        usize::from(self.service_affinity.is_some()) + usize::from(self.labels_presence.is_some())
    }
}

/// Pods of a service land on nodes sharing the given label values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAffinity {
    pub labels: Vec<String>,
}

/// Nodes must (or must not) carry all the given labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelsPresence {
    pub labels: Vec<String>,
    pub presence: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityPolicy {
    pub name: String,
    pub weight: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<PriorityArgument>,
}

impl PriorityPolicy {
    pub fn named(name: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            weight,
            argument: None,
        }
    }
}

/// Parameters of a custom priority; exactly one field is expected to be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityArgument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_anti_affinity: Option<ServiceAntiAffinity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_preference: Option<LabelPreference>,
}

impl PriorityArgument {
    /// Number of argument variants that are set.
    pub fn variants(&self) -> usize {
        usize::from(self.service_anti_affinity.is_some())
            + usize::from(self.label_preference.is_some())
    }
}

/// Spread pods of a service across values of the given label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAntiAffinity {
    pub label: String,
}

/// Prefer nodes that have (or lack) the given label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPreference {
    pub label: String,
    pub presence: bool,
}
