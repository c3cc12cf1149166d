use std::collections::{BTreeMap, BTreeSet};

use super::FactoryError;

/// Name of the provider used when no policy document is configured.
pub const DEFAULT_PROVIDER: &str = "DefaultProvider";

const DEFAULT_PREDICATES: &[&str] = &[
    "PodFitsPorts",
    "PodFitsResources",
    "NoDiskConflict",
    "MatchNodeSelector",
    "HostName",
];

const DEFAULT_PRIORITIES: &[(&str, i32)] = &[
    ("LeastRequestedPriority", 1),
    ("BalancedResourceAllocation", 1),
    ("SelectorSpreadPriority", 1),
];

const EXTRA_PRIORITIES: &[&str] = &["EqualPriority", "ServiceSpreadingPriority"];

/// Named bundle of predicate keys and weighted priority keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgorithmProvider {
    pub predicates: BTreeSet<String>,
    pub priorities: BTreeMap<String, i32>,
}

/// Catalogue of scheduling algorithms known by name.
///
/// The algorithms themselves live in the scheduler; the registry only tracks which keys
/// a policy or provider may reference.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    predicates: BTreeSet<String>,
    priorities: BTreeSet<String>,
    providers: BTreeMap<String, AlgorithmProvider>,
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in predicates, priorities and [`DEFAULT_PROVIDER`].
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        for name in DEFAULT_PREDICATES {
            reg.register_predicate(*name);
        }
        for (name, _) in DEFAULT_PRIORITIES {
            reg.register_priority(*name);
        }
        for name in EXTRA_PRIORITIES {
            reg.register_priority(*name);
        }

        let provider = AlgorithmProvider {
            predicates: DEFAULT_PREDICATES.iter().map(|s| s.to_string()).collect(),
            priorities: DEFAULT_PRIORITIES
                .iter()
                .map(|(name, weight)| (name.to_string(), *weight))
                .collect(),
        };
        reg.providers.insert(DEFAULT_PROVIDER.to_string(), provider);
        reg
    }

    pub fn register_predicate(&mut self, name: impl Into<String>) {
        self.predicates.insert(name.into());
    }

    pub fn register_priority(&mut self, name: impl Into<String>) {
        self.priorities.insert(name.into());
    }

    /// Register a provider; every key it references must already be registered.
    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        provider: AlgorithmProvider,
    ) -> Result<(), FactoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FactoryError::EmptyName);
        }
        if let Some(key) = provider.predicates.iter().find(|k| !self.has_predicate(k)) {
            return Err(FactoryError::UnknownPredicate(key.clone()));
        }
        if let Some(key) = provider.priorities.keys().find(|k| !self.has_priority(k)) {
            return Err(FactoryError::UnknownPriority(key.clone()));
        }
        if let Some((key, weight)) = provider.priorities.iter().find(|(_, w)| **w <= 0) {
            return Err(FactoryError::InvalidWeight {
                name: key.clone(),
                weight: *weight,
            });
        }
        self.providers.insert(name, provider);
        Ok(())
    }

    pub fn has_predicate(&self, name: &str) -> bool {
        self.predicates.contains(name)
    }

    pub fn has_priority(&self, name: &str) -> bool {
        self.priorities.contains(name)
    }

    pub fn provider(&self, name: &str) -> Option<&AlgorithmProvider> {
        self.providers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_default_provider() {
        let reg = AlgorithmRegistry::with_defaults();
        let provider = reg.provider(DEFAULT_PROVIDER).expect("default provider registered");

        assert_eq!(provider.predicates.len(), DEFAULT_PREDICATES.len());
        assert_eq!(provider.priorities.get("LeastRequestedPriority"), Some(&1));
        assert!(reg.has_predicate("HostName"));
        assert!(reg.has_priority("EqualPriority"));
        assert!(!reg.has_predicate("EqualPriority"));
    }

    #[test]
    fn provider_must_reference_known_keys() {
        let mut reg = AlgorithmRegistry::with_defaults();
        let provider = AlgorithmProvider {
            predicates: ["HostName".to_string(), "Bogus".to_string()].into(),
            priorities: BTreeMap::new(),
        };

        let err = reg.register_provider("Custom", provider).unwrap_err();
        assert!(matches!(err, FactoryError::UnknownPredicate(ref k) if k == "Bogus"));
        assert!(reg.provider("Custom").is_none());
    }

    #[test]
    fn provider_weights_must_be_positive() {
        let mut reg = AlgorithmRegistry::with_defaults();
        let provider = AlgorithmProvider {
            predicates: BTreeSet::new(),
            priorities: [("EqualPriority".to_string(), 0)].into(),
        };
        assert!(matches!(
            reg.register_provider("Flat", provider),
            Err(FactoryError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn registers_valid_provider() {
        let mut reg = AlgorithmRegistry::with_defaults();
        let provider = AlgorithmProvider {
            predicates: ["PodFitsResources".to_string()].into(),
            priorities: [("EqualPriority".to_string(), 2)].into(),
        };
        reg.register_provider("Minimal", provider.clone()).unwrap();
        assert_eq!(reg.provider("Minimal"), Some(&provider));
    }
}
