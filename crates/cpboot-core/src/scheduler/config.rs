use std::{collections::BTreeMap, fmt};

use cpboot_model::{PredicateArgument, PriorityArgument};

use crate::client::ClientHandle;

/// Where a [`SchedulerConfig`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// A named built-in algorithm provider.
    Provider(String),
    /// An operator-supplied policy document.
    Policy,
}

impl PolicySource {
    pub fn is_provider(&self) -> bool {
        matches!(self, PolicySource::Provider(_))
    }
}

/// Priority function with its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedPriority {
    pub name: String,
    pub weight: i32,
    /// Set for custom priorities defined inline by a policy.
    pub argument: Option<PriorityArgument>,
}

/// Component name under which scheduler events are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSource {
    pub component: String,
}

/// Executable scheduler configuration.
///
/// Produced by a [`super::ConfigFactory`] from exactly one of a provider name or a policy,
/// and bound to the control-plane client the factory was created with.
#[derive(Clone)]
pub struct SchedulerConfig {
    source: PolicySource,
    predicates: BTreeMap<String, Option<PredicateArgument>>,
    priorities: Vec<WeightedPriority>,
    client: ClientHandle,
    event_source: Option<EventSource>,
}

impl SchedulerConfig {
    pub fn new(
        source: PolicySource,
        predicates: BTreeMap<String, Option<PredicateArgument>>,
        priorities: Vec<WeightedPriority>,
        client: ClientHandle,
    ) -> Self {
        Self {
            source,
            predicates,
            priorities,
            client,
            event_source: None,
        }
    }

    pub fn source(&self) -> &PolicySource {
        &self.source
    }

    /// Predicate keys, sorted.
    pub fn predicate_keys(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Argument of a custom predicate, `None` for registered or unknown keys.
    pub fn predicate_argument(&self, key: &str) -> Option<&PredicateArgument> {
        self.predicates.get(key).and_then(Option::as_ref)
    }

    pub fn priorities(&self) -> &[WeightedPriority] {
        &self.priorities
    }

    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    pub fn event_source(&self) -> Option<&EventSource> {
        self.event_source.as_ref()
    }

    /// Attach the component name used when recording scheduler events.
    pub fn with_event_source(mut self, component: impl Into<String>) -> Self {
        self.event_source = Some(EventSource {
            component: component.into(),
        });
        self
    }
}

impl fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("source", &self.source)
            .field("predicates", &self.predicates.keys().collect::<Vec<_>>())
            .field("priorities", &self.priorities)
            .field("client", &self.client.endpoint())
            .field("event_source", &self.event_source)
            .finish()
    }
}

impl fmt::Display for SchedulerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            PolicySource::Provider(name) => name.as_str(),
            PolicySource::Policy => "policy",
        };
        write!(
            f,
            "SchedulerConfig(source={}, predicates={}, priorities={})",
            source,
            self.predicates.len(),
            self.priorities.len(),
        )
    }
}
