//! Process configuration file.
use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use cpboot_model::{ControllerManagerOptions, MasterOptions};
use cpboot_observe::LoggerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file when no CLI argument is given.
pub const CONFIG_ENV: &str = "CPBOOT_CONFIG";

/// Address announced in API startup messages by default.
pub const DEFAULT_API_ADDRESS: &str = "https://127.0.0.1:8443";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level config document. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MasterConfig {
    pub logger: LoggerConfig,
    pub master: MasterOptions,
    pub controllers: ControllerManagerOptions,
    /// Public address of the API, used when announcing served API surfaces.
    pub api_address: String,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            logger: LoggerConfig::default(),
            master: MasterOptions::default(),
            controllers: ControllerManagerOptions::default(),
            api_address: DEFAULT_API_ADDRESS.to_string(),
        }
    }
}

impl MasterConfig {
    /// Load the config at `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The first CLI argument wins over the environment variable.
pub fn config_path(arg: Option<OsString>, env: Option<OsString>) -> Option<PathBuf> {
    arg.or(env)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpboot_observe::LoggerFormat;
    use std::io::Write;

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(MasterConfig::load(None).unwrap(), MasterConfig::default());
    }

    #[test]
    fn cli_argument_wins_over_env() {
        let path = config_path(Some("/etc/cpboot/a.json".into()), Some("/etc/cpboot/b.json".into()));
        assert_eq!(path, Some(PathBuf::from("/etc/cpboot/a.json")));

        let path = config_path(None, Some("/etc/cpboot/b.json".into()));
        assert_eq!(path, Some(PathBuf::from("/etc/cpboot/b.json")));

        assert_eq!(config_path(None, Some("".into())), None);
        assert_eq!(config_path(None, None), None);
    }

    #[test]
    fn loads_partial_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpboot.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "logger": {{"format": "json"}},
                "master": {{"schedulerConfigFile": "/etc/cpboot/scheduler-policy.json"}},
                "controllers": {{"concurrentRcSyncs": 10, "clusterCidr": "10.244.0.0/16"}}
            }}"#
        )
        .unwrap();

        let cfg = MasterConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert_eq!(
            cfg.master.scheduler_config_file.as_deref(),
            Some(Path::new("/etc/cpboot/scheduler-policy.json"))
        );
        assert_eq!(cfg.controllers.concurrent_rc_syncs, 10);
        assert_eq!(cfg.controllers.concurrent_endpoint_syncs, 5);
        assert_eq!(cfg.api_address, DEFAULT_API_ADDRESS);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MasterConfig::load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_cidr_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpboot.json");
        fs::write(&path, r#"{"controllers": {"clusterCidr": "10.244.0.0/40"}}"#).unwrap();

        let err = MasterConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err}");
    }
}
