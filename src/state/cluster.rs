//! # Desired and observed cluster snapshots.
//!
//! [`DesiredCluster`] is the user's declared target for one apply cycle;
//! [`ObservedCluster`] is the latest control-plane snapshot. Both are ephemeral —
//! the caller persists whatever state it wants to keep, this crate holds nothing
//! across cycles.

use std::collections::BTreeMap;

use super::{ClusterStatus, ComputeScaling, DesiredStatus, ReplicaScaling};

/// User-declared target configuration for a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredCluster {
    /// Display name. Mutable; the cluster id is the stable identity.
    pub name: String,
    /// Free-form labels attached to the cluster.
    pub labels: BTreeMap<String, String>,
    /// Declared run status.
    pub desired_status: DesiredStatus,
    /// Compute scaling policy (fixed CU, autoscaled, or scheduled).
    pub compute: ComputeScaling,
    /// Replica scaling policy (fixed count, autoscaled, or scheduled).
    pub replicas: ReplicaScaling,
}

impl DesiredCluster {
    /// Minimal desired state: named, running, fixed 1 CU, one replica.
    ///
    /// This is also the only shape valid at creation time (replicas must be 1 and
    /// autoscaling attaches post-creation), so it doubles as a creation template.
    pub fn new(name: impl Into<String>, cu_size: u32) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
            desired_status: DesiredStatus::Running,
            compute: ComputeScaling::Fixed { cu_size },
            replicas: ReplicaScaling::Fixed { count: 1 },
        }
    }
}

/// Latest control-plane snapshot of a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCluster {
    /// Opaque id, immutable once created.
    pub id: String,
    /// Current display name.
    pub name: String,
    /// Current labels.
    pub labels: BTreeMap<String, String>,
    /// Reported lifecycle status.
    pub status: ClusterStatus,
    /// Currently configured compute scaling policy.
    pub compute: ComputeScaling,
    /// Currently configured replica scaling policy.
    pub replicas: ReplicaScaling,
}

/// Root credentials, returned exactly once at creation time.
///
/// The control plane never returns the password again; the caller owns
/// persisting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterCredentials {
    /// Root user name.
    pub username: String,
    /// Root password; shown only in the create response.
    pub password: String,
}
