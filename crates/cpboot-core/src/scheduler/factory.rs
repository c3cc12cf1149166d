use std::collections::BTreeMap;

use cpboot_model::{PredicateArgument, SchedulerPolicy};
use tracing::{debug, instrument};

use super::{
    AlgorithmRegistry, FactoryError, PolicySource, SchedulerConfig, WeightedPriority,
};
use crate::client::ClientHandle;

/// Turns a provider name or a policy into an executable [`SchedulerConfig`].
pub trait ConfigFactory: Send + Sync {
    /// Build from a named built-in provider.
    fn create_from_provider(&self, provider: &str) -> Result<SchedulerConfig, FactoryError>;

    /// Build from an explicit policy, validating every key it references.
    fn create_from_config(&self, policy: SchedulerPolicy) -> Result<SchedulerConfig, FactoryError>;
}

/// [`ConfigFactory`] backed by an [`AlgorithmRegistry`] and bound to one client.
pub struct RegistryConfigFactory {
    client: ClientHandle,
    registry: AlgorithmRegistry,
}

impl RegistryConfigFactory {
    pub fn new(client: ClientHandle, registry: AlgorithmRegistry) -> Self {
        Self { client, registry }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }
}

impl ConfigFactory for RegistryConfigFactory {
    #[instrument(level = "debug", skip(self))]
    fn create_from_provider(&self, provider: &str) -> Result<SchedulerConfig, FactoryError> {
        let algorithms = self
            .registry
            .provider(provider)
            .ok_or_else(|| FactoryError::UnknownProvider(provider.to_string()))?;

        let predicates = algorithms
            .predicates
            .iter()
            .map(|key| (key.clone(), None))
            .collect();
        let priorities = algorithms
            .priorities
            .iter()
            .map(|(name, weight)| WeightedPriority {
                name: name.clone(),
                weight: *weight,
                argument: None,
            })
            .collect();

        debug!("scheduler configuration built from provider");
        Ok(SchedulerConfig::new(
            PolicySource::Provider(provider.to_string()),
            predicates,
            priorities,
            self.client.clone(),
        ))
    }

    /// Rules:
    /// - every priority weight is positive;
    /// - an entry with an argument sets exactly one argument variant and defines a custom key;
    /// - an entry without an argument names a registered key.
    ///
    /// Repeated names collapse to the last occurrence.
    #[instrument(
        level = "debug",
        skip(self, policy),
        fields(predicates = policy.predicates.len(), priorities = policy.priorities.len())
    )]
    fn create_from_config(&self, policy: SchedulerPolicy) -> Result<SchedulerConfig, FactoryError> {
        for p in &policy.priorities {
            if p.weight <= 0 {
                return Err(FactoryError::InvalidWeight {
                    name: p.name.clone(),
                    weight: p.weight,
                });
            }
        }

        let mut predicates: BTreeMap<String, Option<PredicateArgument>> = BTreeMap::new();
        for p in policy.predicates {
            if p.name.trim().is_empty() {
                return Err(FactoryError::EmptyName);
            }
            match &p.argument {
                Some(arg) => check_variants(&p.name, arg.variants())?,
                None if !self.registry.has_predicate(&p.name) => {
                    return Err(FactoryError::UnknownPredicate(p.name));
                }
                None => {}
            }
            predicates.insert(p.name, p.argument);
        }

        let mut priorities: BTreeMap<String, WeightedPriority> = BTreeMap::new();
        for p in policy.priorities {
            if p.name.trim().is_empty() {
                return Err(FactoryError::EmptyName);
            }
            match &p.argument {
                Some(arg) => check_variants(&p.name, arg.variants())?,
                None if !self.registry.has_priority(&p.name) => {
                    return Err(FactoryError::UnknownPriority(p.name));
                }
                None => {}
            }
            priorities.insert(
                p.name.clone(),
                WeightedPriority {
                    name: p.name,
                    weight: p.weight,
                    argument: p.argument,
                },
            );
        }

        debug!("scheduler configuration built from policy");
        Ok(SchedulerConfig::new(
            PolicySource::Policy,
            predicates,
            priorities.into_values().collect(),
            self.client.clone(),
        ))
    }
}

fn check_variants(name: &str, variants: usize) -> Result<(), FactoryError> {
    if variants == 1 {
        return Ok(());
    }
    Err(FactoryError::InvalidArgument {
        name: name.to_string(),
        reason: format!("exactly one argument kind must be set, found {variants}"),
    })
}
