use std::{
    fs,
    path::{Path, PathBuf},
};

use cpboot_model::{MasterOptions, PolicyCodec};
use tracing::{debug, info};

use super::{ConfigFactory, DEFAULT_PROVIDER, ResolveError, SchedulerConfig};

/// Chooses between a policy document and the default provider, then builds the config.
///
/// The choice depends only on whether something exists at the configured path, so the
/// same file contents (or the same absence) always lead to the same kind of outcome.
#[derive(Debug, Clone, Default)]
pub struct SchedulerConfigResolver {
    path: Option<PathBuf>,
    codec: PolicyCodec,
}

impl SchedulerConfigResolver {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            codec: PolicyCodec::new(),
        }
    }

    pub fn from_options(opts: &MasterOptions) -> Self {
        Self::new(opts.scheduler_config_file.clone())
    }

    /// The policy document to use, if one is configured and present.
    ///
    /// Any stat failure counts as absence: only existence is checked, not the error kind.
    pub fn policy_file(&self) -> Option<&Path> {
        let path = self.path.as_deref()?;
        fs::metadata(path).ok().map(|_| path)
    }

    /// Resolve the scheduler configuration.
    ///
    /// - no policy file: build from [`DEFAULT_PROVIDER`];
    /// - policy file: read it fully, decode it, build from the decoded policy.
    ///
    /// Errors keep the failing stage (read, decode, factory) distinct. There is no fallback
    /// to the default provider once a policy file has been found.
    pub fn resolve(&self, factory: &dyn ConfigFactory) -> Result<SchedulerConfig, ResolveError> {
        let Some(path) = self.policy_file() else {
            debug!(provider = DEFAULT_PROVIDER, "no scheduler policy file; using default provider");
            return Ok(factory.create_from_provider(DEFAULT_PROVIDER)?);
        };

        let data = fs::read(path).map_err(|source| ResolveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = self
            .codec
            .decode(&data)
            .map_err(|source| ResolveError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            predicates = policy.predicates.len(),
            priorities = policy.priorities.len(),
            "loaded scheduler policy"
        );
        Ok(factory.create_from_config(policy)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::ControlPlaneClient,
        scheduler::{
            AlgorithmRegistry, FactoryError, PolicySource, RegistryConfigFactory, ResolveStage,
        },
    };
    use cpboot_model::SchedulerPolicy;
    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };

    struct TestClient;

    impl ControlPlaneClient for TestClient {
        fn endpoint(&self) -> &str {
            "test"
        }
    }

    /// Records which factory entry point was used.
    struct Recording {
        inner: RegistryConfigFactory,
        calls: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new() -> Self {
            Self {
                inner: RegistryConfigFactory::new(
                    Arc::new(TestClient),
                    AlgorithmRegistry::with_defaults(),
                ),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ConfigFactory for Recording {
        fn create_from_provider(
            &self,
            provider: &str,
        ) -> Result<SchedulerConfig, FactoryError> {
            self.calls.lock().unwrap().push(format!("provider:{provider}"));
            self.inner.create_from_provider(provider)
        }

        fn create_from_config(
            &self,
            policy: SchedulerPolicy,
        ) -> Result<SchedulerConfig, FactoryError> {
            self.calls.lock().unwrap().push("policy".into());
            self.inner.create_from_config(policy)
        }
    }

    fn write_policy(dir: &tempfile::TempDir, body: &[u8]) -> PathBuf {
        let path = dir.path().join("scheduler-policy.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body).unwrap();
        path
    }

    #[test]
    fn missing_file_selects_default_provider() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = SchedulerConfigResolver::new(Some(dir.path().join("scheduler-policy.json")));
        let factory = Recording::new();

        let cfg = resolver.resolve(&factory).unwrap();

        assert_eq!(cfg.source(), &PolicySource::Provider(DEFAULT_PROVIDER.into()));
        assert_eq!(factory.calls(), vec![format!("provider:{DEFAULT_PROVIDER}")]);
    }

    #[test]
    fn unset_path_selects_default_provider() {
        let factory = Recording::new();
        let cfg = SchedulerConfigResolver::new(None).resolve(&factory).unwrap();
        assert!(cfg.source().is_provider());
    }

    #[test]
    fn valid_policy_file_is_used_instead_of_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_policy(
            &dir,
            br#"{"kind": "Policy", "apiVersion": "v1",
                 "predicates": [{"name": "MatchNodeSelector"}],
                 "priorities": [{"name": "EqualPriority", "weight": 1}]}"#,
        );
        let factory = Recording::new();

        let cfg = SchedulerConfigResolver::new(Some(path)).resolve(&factory).unwrap();

        assert_eq!(cfg.source(), &PolicySource::Policy);
        assert_eq!(cfg.predicate_keys().collect::<Vec<_>>(), vec!["MatchNodeSelector"]);
        assert_eq!(factory.calls(), vec!["policy".to_string()]);
    }

    #[test]
    fn undecodable_file_fails_at_decode_stage_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let factory = Recording::new();

        let bodies: [&[u8]; 3] = [b"{ not json", b"", br#"{"kind": "Policy"}"#];
        for body in bodies {
            let path = write_policy(&dir, body);
            let err = SchedulerConfigResolver::new(Some(path))
                .resolve(&factory)
                .unwrap_err();
            assert_eq!(err.stage(), ResolveStage::Decode, "unexpected error: {err}");
        }
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn unknown_predicate_fails_at_factory_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_policy(
            &dir,
            br#"{"kind": "Policy", "apiVersion": "v1", "predicates": [{"name": "PodFitsEverything"}]}"#,
        );
        let factory = Recording::new();

        let err = SchedulerConfigResolver::new(Some(path))
            .resolve(&factory)
            .unwrap_err();

        assert_eq!(err.stage(), ResolveStage::Factory);
        assert!(err.to_string().contains("PodFitsEverything"));
        assert_eq!(factory.calls(), vec!["policy".to_string()]);
    }

    #[test]
    fn unreadable_path_fails_at_read_stage() {
        // A directory exists but cannot be read as a file.
        let dir = tempfile::tempdir().unwrap();
        let factory = Recording::new();

        let err = SchedulerConfigResolver::new(Some(dir.path().to_path_buf()))
            .resolve(&factory)
            .unwrap_err();

        assert_eq!(err.stage(), ResolveStage::Read);
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn resolution_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_policy(&dir, br#"{"apiVersion": "v1", "predicates": [{"name": "HostName"}]}"#);
        let resolver = SchedulerConfigResolver::new(Some(path));
        let factory = Recording::new();

        let first = resolver.resolve(&factory).unwrap();
        let second = resolver.resolve(&factory).unwrap();

        assert_eq!(first.source(), second.source());
        assert_eq!(
            first.predicate_keys().collect::<Vec<_>>(),
            second.predicate_keys().collect::<Vec<_>>()
        );
    }
}
