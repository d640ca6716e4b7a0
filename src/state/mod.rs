//! Typed desired/observed cluster state and status-transition rules.
//!
//! The state model is deliberately ephemeral: a [`DesiredCluster`] is recomputed by
//! the host orchestrator on every apply, an [`ObservedCluster`] is re-fetched at the
//! start of every cycle, and neither outlives the cycle that produced it.
//!
//! Scaling configuration is a sum type ([`ComputeScaling`], [`ReplicaScaling`]), so
//! "fixed size and autoscaling are mutually exclusive" holds by construction rather
//! than by runtime validation.

mod cluster;
mod scaling;
mod status;

pub use cluster::{ClusterCredentials, DesiredCluster, ObservedCluster};
pub use scaling::{ComputeScaling, ReplicaScaling, ScalingWindow};
pub use status::{ClusterStatus, DesiredStatus, StatusAction};
