//! Volume plugin probing for the persistent volume recycler.
//!
//! Each volume family is probed with its own [`RecyclableVolumeConfig`]; the recycler is
//! built from the concatenated plugin list.
use std::{fmt, sync::Arc};

use cpboot_model::{ModelError, RecyclableVolumeConfig, VolumeKind};
use thiserror::Error;
use tracing::debug;

use crate::{controller::BuildError, error::CoreError};

/// A volume plugin able to recycle released volumes of its kind.
pub trait VolumePlugin: fmt::Debug + Send + Sync {
    /// Plugin name (e.g. "host-path").
    fn name(&self) -> &str;
}

/// Shared plugin handle.
pub type VolumePluginRef = Arc<dyn VolumePlugin>;

/// Discovers the plugins of one volume family, configured with a reclaim recipe.
pub trait VolumePluginProber: Send + Sync {
    fn probe(&self, config: &RecyclableVolumeConfig) -> Result<Vec<VolumePluginRef>, BuildError>;
}

/// The plugin families that take part in recycling.
#[derive(Clone)]
pub struct VolumePluginFamilies {
    host_path: Arc<dyn VolumePluginProber>,
    nfs: Arc<dyn VolumePluginProber>,
}

impl VolumePluginFamilies {
    pub fn new(host_path: Arc<dyn VolumePluginProber>, nfs: Arc<dyn VolumePluginProber>) -> Self {
        Self { host_path, nfs }
    }

    /// Families in probe order, paired with their kind.
    fn iter(&self) -> [(VolumeKind, &Arc<dyn VolumePluginProber>); 2] {
        [
            (VolumeKind::HostPath, &self.host_path),
            (VolumeKind::Nfs, &self.nfs),
        ]
    }
}

/// Reasons the volume recycler could not be brought up.
#[derive(Debug, Error)]
pub enum RecyclerError {
    #[error("invalid reclaim recipe: {0}")]
    InvalidConfig(#[from] ModelError),

    #[error("probing {family} volume plugins: {source}")]
    Probe {
        family: VolumeKind,
        #[source]
        source: BuildError,
    },

    #[error("building recycler: {0}")]
    Build(#[source] BuildError),

    #[error("launching recycler: {0}")]
    Launch(#[source] CoreError),
}

impl RecyclerError {
    /// Short label of the step that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            RecyclerError::InvalidConfig(_) => "config",
            RecyclerError::Probe { .. } => "probe",
            RecyclerError::Build(_) => "build",
            RecyclerError::Launch(_) => "launch",
        }
    }
}

/// Probe every recyclable volume family and return the combined plugin list.
///
/// Host-path plugins come first, then network file share plugins. Each family is probed
/// with its own recipe: both use `image`, but timeouts differ per [`VolumeKind`].
/// The first failure aborts probing.
pub fn probe_recyclable_plugins(
    image: &str,
    families: &VolumePluginFamilies,
) -> Result<Vec<VolumePluginRef>, RecyclerError> {
    let mut plugins = Vec::new();

    for (kind, prober) in families.iter() {
        let config = RecyclableVolumeConfig::for_kind(kind, image);
        config.validate(kind)?;

        let probed = prober
            .probe(&config)
            .map_err(|source| RecyclerError::Probe { family: kind, source })?;

        debug!(
            family = %kind,
            plugins = probed.len(),
            timeout_secs = config.timeout_secs,
            "probed volume plugin family"
        );
        plugins.extend(probed);
    }
    Ok(plugins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct NamedPlugin(String);

    impl VolumePlugin for NamedPlugin {
        fn name(&self) -> &str {
            &self.0
        }
    }

    struct StaticProber {
        prefix: &'static str,
        count: usize,
        fail: bool,
        seen: Mutex<Vec<RecyclableVolumeConfig>>,
    }

    impl StaticProber {
        fn new(prefix: &'static str, count: usize) -> Arc<Self> {
            Arc::new(Self {
                prefix,
                count,
                fail: false,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(prefix: &'static str) -> Arc<Self> {
            Arc::new(Self {
                prefix,
                count: 0,
                fail: true,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl VolumePluginProber for StaticProber {
        fn probe(
            &self,
            config: &RecyclableVolumeConfig,
        ) -> Result<Vec<VolumePluginRef>, BuildError> {
            self.seen.lock().unwrap().push(config.clone());
            if self.fail {
                return Err(BuildError::Probe(format!("{} plugins unavailable", self.prefix)));
            }
            Ok((0..self.count)
                .map(|i| Arc::new(NamedPlugin(format!("{}-{i}", self.prefix))) as VolumePluginRef)
                .collect())
        }
    }

    #[test]
    fn plugin_list_is_the_sum_of_both_families() {
        let host = StaticProber::new("host-path", 2);
        let nfs = StaticProber::new("nfs", 3);
        let families = VolumePluginFamilies::new(host.clone(), nfs.clone());

        let plugins = probe_recyclable_plugins("recycler:latest", &families).unwrap();

        assert_eq!(plugins.len(), 5);
        assert_eq!(plugins[0].name(), "host-path-0");
        assert_eq!(plugins[4].name(), "nfs-2");
    }

    #[test]
    fn each_family_sees_its_own_timeout() {
        let host = StaticProber::new("host-path", 1);
        let nfs = StaticProber::new("nfs", 1);
        let families = VolumePluginFamilies::new(host.clone(), nfs.clone());

        probe_recyclable_plugins("recycler:latest", &families).unwrap();

        let host_seen = host.seen.lock().unwrap();
        let nfs_seen = nfs.seen.lock().unwrap();
        assert_eq!(host_seen.len(), 1);
        assert_eq!(nfs_seen.len(), 1);
        assert_eq!(host_seen[0].timeout_secs, 60);
        assert_eq!(nfs_seen[0].timeout_secs, 300);
        assert_eq!(host_seen[0].image, nfs_seen[0].image);
    }

    #[test]
    fn nfs_probe_failure_names_the_family() {
        let families =
            VolumePluginFamilies::new(StaticProber::new("host-path", 1), StaticProber::failing("nfs"));

        let err = probe_recyclable_plugins("recycler:latest", &families).unwrap_err();

        assert_eq!(err.stage(), "probe");
        match err {
            RecyclerError::Probe { family, .. } => assert_eq!(family, VolumeKind::Nfs),
            other => panic!("expected probe error, got {other:?}"),
        }
    }

    #[test]
    fn blank_image_fails_before_probing() {
        let host = StaticProber::new("host-path", 1);
        let families = VolumePluginFamilies::new(host.clone(), StaticProber::new("nfs", 1));

        let err = probe_recyclable_plugins(" ", &families).unwrap_err();

        assert_eq!(err.stage(), "config");
        assert!(host.seen.lock().unwrap().is_empty());
    }
}
