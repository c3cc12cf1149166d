use std::time::Duration;

use cpboot_model::{ClusterCidr, ControllerManagerOptions};

use super::BuildError;

/// Arguments of the replication manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicationParams {
    /// Upper bound of replica creations/deletions per sync.
    pub burst_replicas: usize,
    /// Number of replication controllers synced in parallel.
    pub concurrent_syncs: usize,
}

impl ReplicationParams {
    pub fn from_options(opts: &ControllerManagerOptions) -> Self {
        Self {
            burst_replicas: opts.burst_replicas,
            concurrent_syncs: opts.concurrent_rc_syncs,
        }
    }
}

/// Token bucket settings for pod evictions issued by the node controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvictionRateLimit {
    pub qps: f32,
    pub burst: u32,
}

/// Arguments of the node controller.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeControllerParams {
    pub register_retry_count: u32,
    pub pod_eviction_timeout: Duration,
    pub eviction_limit: EvictionRateLimit,
    pub node_monitor_grace_period: Duration,
    pub node_startup_grace_period: Duration,
    pub node_monitor_period: Duration,
    pub node_sync_period: Duration,
    pub cluster_cidr: Option<ClusterCidr>,
    pub allocate_node_cidrs: bool,
}

impl NodeControllerParams {
    /// Collect node controller arguments from the controller options.
    ///
    /// Fails when CIDR allocation is enabled without a cluster CIDR.
    pub fn from_options(opts: &ControllerManagerOptions) -> Result<Self, BuildError> {
        if opts.allocate_node_cidrs && opts.cluster_cidr.is_none() {
            return Err(BuildError::InvalidConfig(
                "node CIDR allocation requires a cluster CIDR".into(),
            ));
        }
        Ok(Self {
            register_retry_count: opts.register_retry_count,
            pod_eviction_timeout: opts.pod_eviction_timeout(),
            eviction_limit: EvictionRateLimit {
                qps: opts.deleting_pods_qps,
                burst: opts.deleting_pods_burst,
            },
            node_monitor_grace_period: opts.node_monitor_grace_period(),
            node_startup_grace_period: opts.node_startup_grace_period(),
            node_monitor_period: opts.node_monitor_period(),
            node_sync_period: opts.node_sync_period(),
            cluster_cidr: opts.cluster_cidr,
            allocate_node_cidrs: opts.allocate_node_cidrs,
        })
    }
}
