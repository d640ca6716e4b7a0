//! # ControlPlane: the API gateway client trait.
//!
//! Five single-shot calls cover everything reconciliation needs: create,
//! describe, modify, drop, transition. Each call is synchronous from the
//! caller's perspective — long-running work is reflected in the *status* the
//! control plane reports afterwards, which is what the poll engine watches.
//!
//! Implementations must be cheap to share (`&self` methods, `Send + Sync`); the
//! reconciler holds one client in an `Arc` and probes through it concurrently
//! for independent resources.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::state::{
    ClusterCredentials, ComputeScaling, ObservedCluster, ReplicaScaling, StatusAction,
};

/// Stable business code the control plane returns for an unknown cluster id.
///
/// A delete-convergence probe treats this code as "already gone" rather than as
/// a fatal error.
pub const CODE_CLUSTER_NOT_FOUND: &str = "CLUSTER_NOT_FOUND";

/// Parameters for a create call.
///
/// Creation only accepts a fixed shape (replicas = 1, fixed CU); scaling
/// policies attach post-creation via [`ClusterDelta`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCluster {
    /// Display name for the new cluster.
    pub name: String,
    /// Fixed CU size at creation.
    pub cu_size: u32,
    /// Replica count at creation; the control plane requires 1.
    pub replicas: u32,
    /// Initial labels.
    pub labels: BTreeMap<String, String>,
}

/// Create response: the new identity plus one-time credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCluster {
    /// Opaque cluster id, immutable from here on.
    pub id: String,
    /// Root credentials; the password is never returned again.
    pub credentials: ClusterCredentials,
}

/// One mutation against an existing cluster.
///
/// The reconciler issues at most one [`ClusterDelta::Resize`] *or* one
/// [`ClusterDelta::Replicas`] per apply cycle (never both), followed by the
/// synchronous metadata and policy deltas in fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterDelta {
    /// Change the fixed CU size; asynchronous (cluster goes `Modifying`).
    Resize {
        /// New CU size.
        cu_size: u32,
    },
    /// Change the fixed replica count; asynchronous.
    Replicas {
        /// New replica count.
        count: u32,
    },
    /// Replace the label set; synchronous.
    Labels(BTreeMap<String, String>),
    /// Rename the cluster; synchronous.
    Rename {
        /// New display name.
        name: String,
    },
    /// Replace the compute scaling policy; may trigger provisioning.
    ComputePolicy(ComputeScaling),
    /// Replace the replica scaling policy; may trigger provisioning.
    ReplicaPolicy(ReplicaScaling),
}

impl ClusterDelta {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ClusterDelta::Resize { .. } => "resize",
            ClusterDelta::Replicas { .. } => "replica_count",
            ClusterDelta::Labels(_) => "labels",
            ClusterDelta::Rename { .. } => "rename",
            ClusterDelta::ComputePolicy(_) => "compute_policy",
            ClusterDelta::ReplicaPolicy(_) => "replica_policy",
        }
    }

    /// `true` when the control plane applies this delta asynchronously and the
    /// cluster must be polled back to `Running` afterwards.
    pub fn is_async(&self) -> bool {
        !matches!(self, ClusterDelta::Labels(_) | ClusterDelta::Rename { .. })
    }
}

/// # Control-plane API gateway.
///
/// The single seam between reconciliation and the REST control API. Errors are
/// classified by [`ApiError`]: structured business errors (fatal) or transport
/// failures (retryable).
#[async_trait]
pub trait ControlPlane: Send + Sync + 'static {
    /// Provisions a new cluster; returns its id and one-time credentials.
    async fn create(&self, params: &CreateCluster) -> Result<CreatedCluster, ApiError>;

    /// Fetches the latest observed snapshot of a cluster.
    async fn describe(&self, id: &str) -> Result<ObservedCluster, ApiError>;

    /// Applies one mutation to a cluster.
    async fn modify(&self, id: &str, delta: &ClusterDelta) -> Result<(), ApiError>;

    /// Deletes a cluster; terminal.
    async fn drop(&self, id: &str) -> Result<(), ApiError>;

    /// Issues a suspend/resume transition.
    async fn transition(&self, id: &str, action: StatusAction) -> Result<(), ApiError>;
}
