//! # Desired-vs-observed diffing and pre-call validation.
//!
//! [`ClusterDiff::between`] computes everything one apply cycle has to do and
//! rejects invalid combinations before a single mutating call goes out.
//!
//! Because scaling policies are sum types, "CU size vs. autoscaling block" and
//! "replica count vs. replica autoscaling" cannot even be expressed
//! simultaneously. What remains to validate at runtime is the cross-field rule:
//! a fixed CU change and a fixed replica change must not land in the same cycle,
//! because the control plane has no defined target for a combined modification.

use std::collections::BTreeMap;

use crate::api::CreateCluster;
use crate::reconcile::ReconcileError;
use crate::state::{
    ComputeScaling, DesiredCluster, ObservedCluster, ReplicaScaling, StatusAction,
};

/// Everything one apply cycle needs to do, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterDiff {
    /// New fixed CU size (both sides `Fixed`, values differ).
    pub resize: Option<u32>,
    /// New fixed replica count (both sides `Fixed`, values differ).
    pub replicas: Option<u32>,
    /// Suspend/resume transition derived from the status pair.
    pub action: StatusAction,
    /// Full replacement label set, if labels differ.
    pub labels: Option<BTreeMap<String, String>>,
    /// New display name, if it differs.
    pub rename: Option<String>,
    /// New compute scaling policy (variant change, or non-fixed change).
    pub compute_policy: Option<ComputeScaling>,
    /// New replica scaling policy (variant change, or non-fixed change).
    pub replica_policy: Option<ReplicaScaling>,
}

impl ClusterDiff {
    /// Computes the diff for one cycle, validating cross-field invariants.
    ///
    /// A resize is only a resize when both sides are `Fixed`; any variant change
    /// (fixed → autoscaled, bounds change, schedule change) is a policy
    /// replacement instead, applied after transitions and metadata.
    pub fn between(
        desired: &DesiredCluster,
        observed: &ObservedCluster,
    ) -> Result<Self, ReconcileError> {
        let mut diff = ClusterDiff {
            action: StatusAction::plan(desired.desired_status, observed.status),
            ..ClusterDiff::default()
        };

        if desired.compute != observed.compute {
            match (desired.compute.fixed_cu(), observed.compute.fixed_cu()) {
                (Some(cu), Some(_)) => diff.resize = Some(cu),
                _ => diff.compute_policy = Some(desired.compute.clone()),
            }
        }

        if desired.replicas != observed.replicas {
            match (desired.replicas.fixed_count(), observed.replicas.fixed_count()) {
                (Some(count), Some(_)) => diff.replicas = Some(count),
                _ => diff.replica_policy = Some(desired.replicas.clone()),
            }
        }

        if diff.resize.is_some() && diff.replicas.is_some() {
            return Err(ReconcileError::Validation {
                cluster: observed.id.clone(),
                field: "cu_size, replica_count",
                message: "CU size and replica count cannot both change in one apply cycle"
                    .to_string(),
            });
        }

        if desired.labels != observed.labels {
            diff.labels = Some(desired.labels.clone());
        }
        if desired.name != observed.name {
            diff.rename = Some(desired.name.clone());
        }

        Ok(diff)
    }

    /// `true` when the cycle has nothing to do.
    pub fn is_empty(&self) -> bool {
        self.resize.is_none()
            && self.replicas.is_none()
            && self.action == StatusAction::None
            && self.labels.is_none()
            && self.rename.is_none()
            && self.compute_policy.is_none()
            && self.replica_policy.is_none()
    }
}

/// Validates a desired state for creation and builds the create parameters.
///
/// Creation accepts only the fixed shape: one replica, fixed CU. Scaling
/// policies attach in a follow-up apply once the cluster exists.
pub fn plan_create(desired: &DesiredCluster) -> Result<CreateCluster, ReconcileError> {
    let cu_size = desired.compute.fixed_cu().ok_or_else(|| ReconcileError::Validation {
        cluster: desired.name.clone(),
        field: "compute",
        message: "autoscaling attaches only after creation; declare a fixed CU size".to_string(),
    })?;

    match desired.replicas.fixed_count() {
        Some(1) => {}
        Some(count) => {
            return Err(ReconcileError::Validation {
                cluster: desired.name.clone(),
                field: "replicas",
                message: format!("replica count must be 1 at creation, got {count}"),
            })
        }
        None => {
            return Err(ReconcileError::Validation {
                cluster: desired.name.clone(),
                field: "replicas",
                message: "replica autoscaling attaches only after creation".to_string(),
            })
        }
    }

    Ok(CreateCluster {
        name: desired.name.clone(),
        cu_size,
        replicas: 1,
        labels: desired.labels.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClusterStatus, DesiredStatus, ScalingWindow};

    fn observed_fixed(cu: u32, count: u32) -> ObservedCluster {
        ObservedCluster {
            id: "clu-1".to_string(),
            name: "demo".to_string(),
            labels: BTreeMap::new(),
            status: ClusterStatus::Running,
            compute: ComputeScaling::Fixed { cu_size: cu },
            replicas: ReplicaScaling::Fixed { count },
        }
    }

    fn desired_fixed(cu: u32, count: u32) -> DesiredCluster {
        DesiredCluster {
            name: "demo".to_string(),
            labels: BTreeMap::new(),
            desired_status: DesiredStatus::Running,
            compute: ComputeScaling::Fixed { cu_size: cu },
            replicas: ReplicaScaling::Fixed { count },
        }
    }

    #[test]
    fn test_no_change_yields_empty_diff() {
        let diff = ClusterDiff::between(&desired_fixed(1, 1), &observed_fixed(1, 1)).unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn test_cu_change_is_a_resize() {
        let diff = ClusterDiff::between(&desired_fixed(2, 1), &observed_fixed(1, 1)).unwrap();
        assert_eq!(diff.resize, Some(2));
        assert_eq!(diff.replicas, None);
        assert_eq!(diff.compute_policy, None);
    }

    #[test]
    fn test_cu_and_replica_change_together_is_rejected() {
        let err = ClusterDiff::between(&desired_fixed(2, 3), &observed_fixed(1, 1)).unwrap_err();
        match err {
            ReconcileError::Validation { cluster, field, .. } => {
                assert_eq!(cluster, "clu-1");
                assert_eq!(field, "cu_size, replica_count");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_switch_to_autoscaling_is_a_policy_change_not_a_resize() {
        let mut desired = desired_fixed(1, 1);
        desired.compute = ComputeScaling::Autoscaled { min_cu: 1, max_cu: 8 };
        let diff = ClusterDiff::between(&desired, &observed_fixed(1, 1)).unwrap();
        assert_eq!(diff.resize, None);
        assert_eq!(
            diff.compute_policy,
            Some(ComputeScaling::Autoscaled { min_cu: 1, max_cu: 8 })
        );
    }

    #[test]
    fn test_policy_change_and_replica_change_may_coexist() {
        // Only the fixed-CU vs fixed-replica pair is mutually exclusive.
        let mut desired = desired_fixed(1, 3);
        desired.compute = ComputeScaling::Scheduled {
            default_cu: 1,
            windows: vec![ScalingWindow { cron: "0 8 * * *".into(), target: 4 }],
        };
        let diff = ClusterDiff::between(&desired, &observed_fixed(1, 1)).unwrap();
        assert_eq!(diff.replicas, Some(3));
        assert!(diff.compute_policy.is_some());
    }

    #[test]
    fn test_labels_and_rename_detected() {
        let mut desired = desired_fixed(1, 1);
        desired.name = "renamed".to_string();
        desired.labels.insert("env".to_string(), "prod".to_string());
        let diff = ClusterDiff::between(&desired, &observed_fixed(1, 1)).unwrap();
        assert_eq!(diff.rename.as_deref(), Some("renamed"));
        assert!(diff.labels.is_some());
    }

    #[test]
    fn test_suspend_action_derived() {
        let mut desired = desired_fixed(1, 1);
        desired.desired_status = DesiredStatus::Suspended;
        let diff = ClusterDiff::between(&desired, &observed_fixed(1, 1)).unwrap();
        assert_eq!(diff.action, StatusAction::Suspend);
    }

    #[test]
    fn test_plan_create_accepts_only_fixed_single_replica() {
        assert!(plan_create(&desired_fixed(2, 1)).is_ok());

        let err = plan_create(&desired_fixed(2, 3)).unwrap_err();
        assert!(matches!(err, ReconcileError::Validation { field: "replicas", .. }));

        let mut desired = desired_fixed(2, 1);
        desired.compute = ComputeScaling::Autoscaled { min_cu: 1, max_cu: 4 };
        let err = plan_create(&desired).unwrap_err();
        assert!(matches!(err, ReconcileError::Validation { field: "compute", .. }));

        let mut desired = desired_fixed(2, 1);
        desired.replicas = ReplicaScaling::Autoscaled { min: 1, max: 3 };
        let err = plan_create(&desired).unwrap_err();
        assert!(matches!(err, ReconcileError::Validation { field: "replicas", .. }));
    }
}
