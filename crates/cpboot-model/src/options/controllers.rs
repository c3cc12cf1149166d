use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ClusterCidr, PeriodMs, error::ModelError};

/// Tuning knobs for every control loop started at bootstrap.
///
/// Periods are in milliseconds; use the `*_period()` accessors for [`Duration`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerManagerOptions {
    pub namespace_sync_period_ms: PeriodMs,
    /// Shared by the claim binder and the volume recycler.
    pub pv_claim_binder_sync_period_ms: PeriodMs,
    pub resource_quota_sync_period_ms: PeriodMs,
    pub concurrent_rc_syncs: usize,
    pub concurrent_endpoint_syncs: usize,
    /// Upper bound of replica creations/deletions per replication sync.
    pub burst_replicas: usize,

    pub register_retry_count: u32,
    pub pod_eviction_timeout_ms: PeriodMs,
    pub deleting_pods_qps: f32,
    pub deleting_pods_burst: u32,
    pub node_monitor_grace_period_ms: PeriodMs,
    pub node_startup_grace_period_ms: PeriodMs,
    pub node_monitor_period_ms: PeriodMs,
    pub node_sync_period_ms: PeriodMs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_cidr: Option<ClusterCidr>,
    pub allocate_node_cidrs: bool,
}

impl Default for ControllerManagerOptions {
    fn default() -> Self {
        Self {
            namespace_sync_period_ms: 300_000,
            pv_claim_binder_sync_period_ms: 10_000,
            resource_quota_sync_period_ms: 10_000,
            concurrent_rc_syncs: 5,
            concurrent_endpoint_syncs: 5,
            burst_replicas: 500,

            register_retry_count: 10,
            pod_eviction_timeout_ms: 300_000,
            deleting_pods_qps: 0.1,
            deleting_pods_burst: 10,
            node_monitor_grace_period_ms: 40_000,
            node_startup_grace_period_ms: 60_000,
            node_monitor_period_ms: 5_000,
            node_sync_period_ms: 10_000,
            cluster_cidr: None,
            allocate_node_cidrs: false,
        }
    }
}

impl ControllerManagerOptions {
    pub fn namespace_sync_period(&self) -> Duration {
        Duration::from_millis(self.namespace_sync_period_ms)
    }

    pub fn pv_claim_binder_sync_period(&self) -> Duration {
        Duration::from_millis(self.pv_claim_binder_sync_period_ms)
    }

    pub fn resource_quota_sync_period(&self) -> Duration {
        Duration::from_millis(self.resource_quota_sync_period_ms)
    }

    pub fn pod_eviction_timeout(&self) -> Duration {
        Duration::from_millis(self.pod_eviction_timeout_ms)
    }

    pub fn node_monitor_grace_period(&self) -> Duration {
        Duration::from_millis(self.node_monitor_grace_period_ms)
    }

    pub fn node_startup_grace_period(&self) -> Duration {
        Duration::from_millis(self.node_startup_grace_period_ms)
    }

    pub fn node_monitor_period(&self) -> Duration {
        Duration::from_millis(self.node_monitor_period_ms)
    }

    pub fn node_sync_period(&self) -> Duration {
        Duration::from_millis(self.node_sync_period_ms)
    }

    /// Validate the options before any control loop is built.
    ///
    /// Rules:
    /// - every period is non-zero;
    /// - concurrency and burst values are at least 1;
    /// - `deleting_pods_qps` is finite and positive;
    /// - `allocate_node_cidrs` requires `cluster_cidr`.
    pub fn validate(&self) -> Result<(), ModelError> {
        let periods = [
            ("namespaceSyncPeriodMs", self.namespace_sync_period_ms),
            ("pvClaimBinderSyncPeriodMs", self.pv_claim_binder_sync_period_ms),
            ("resourceQuotaSyncPeriodMs", self.resource_quota_sync_period_ms),
            ("podEvictionTimeoutMs", self.pod_eviction_timeout_ms),
            ("nodeMonitorGracePeriodMs", self.node_monitor_grace_period_ms),
            ("nodeStartupGracePeriodMs", self.node_startup_grace_period_ms),
            ("nodeMonitorPeriodMs", self.node_monitor_period_ms),
            ("nodeSyncPeriodMs", self.node_sync_period_ms),
        ];
        if let Some((field, _)) = periods.into_iter().find(|(_, v)| *v == 0) {
            return Err(ModelError::InvalidOption {
                field,
                reason: "period cannot be zero".into(),
            });
        }

        let counts = [
            ("concurrentRcSyncs", self.concurrent_rc_syncs),
            ("concurrentEndpointSyncs", self.concurrent_endpoint_syncs),
            ("burstReplicas", self.burst_replicas),
            ("deletingPodsBurst", self.deleting_pods_burst as usize),
        ];
        if let Some((field, _)) = counts.into_iter().find(|(_, v)| *v == 0) {
            return Err(ModelError::InvalidOption {
                field,
                reason: "must be at least 1".into(),
            });
        }

        if !self.deleting_pods_qps.is_finite() || self.deleting_pods_qps <= 0.0 {
            return Err(ModelError::InvalidOption {
                field: "deletingPodsQps",
                reason: format!("must be a positive number, got {}", self.deleting_pods_qps),
            });
        }

        if self.allocate_node_cidrs && self.cluster_cidr.is_none() {
            return Err(ModelError::InvalidOption {
                field: "clusterCidr",
                reason: "required when allocateNodeCidrs is enabled".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let opts = ControllerManagerOptions::default();
        opts.validate().unwrap();
        assert_eq!(opts.namespace_sync_period(), Duration::from_secs(300));
        assert_eq!(opts.pv_claim_binder_sync_period(), Duration::from_secs(10));
    }

    #[test]
    fn zero_period_is_rejected_with_field_name() {
        let opts = ControllerManagerOptions {
            node_sync_period_ms: 0,
            ..Default::default()
        };
        match opts.validate() {
            Err(ModelError::InvalidOption { field, .. }) => assert_eq!(field, "nodeSyncPeriodMs"),
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let opts = ControllerManagerOptions {
            concurrent_endpoint_syncs: 0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn bad_qps_is_rejected() {
        for qps in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let opts = ControllerManagerOptions {
                deleting_pods_qps: qps,
                ..Default::default()
            };
            assert!(opts.validate().is_err(), "qps {qps} should be rejected");
        }
    }

    #[test]
    fn cidr_allocation_requires_cidr() {
        let mut opts = ControllerManagerOptions {
            allocate_node_cidrs: true,
            ..Default::default()
        };
        assert!(opts.validate().is_err());

        opts.cluster_cidr = Some("10.244.0.0/16".parse().unwrap());
        opts.validate().unwrap();
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let json = r#"{"concurrentRcSyncs": 2, "clusterCidr": "10.0.0.0/8"}"#;
        let opts: ControllerManagerOptions = serde_json::from_str(json).unwrap();

        assert_eq!(opts.concurrent_rc_syncs, 2);
        assert_eq!(opts.burst_replicas, 500);
        assert_eq!(opts.cluster_cidr.unwrap().prefix(), 8);
    }
}
