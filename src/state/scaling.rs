//! # Scaling policy sum types.
//!
//! The control plane accepts either a fixed size, a dynamic autoscaling range, or a
//! cron-driven schedule for both compute (CU) and replicas — but never more than one
//! at a time. Modeling each as an enum makes the mutual exclusion structural: a
//! desired state simply cannot carry both a CU size and an autoscaling block.
//!
//! Switching a cluster between variants (e.g. fixed → autoscaled) is a policy
//! change applied as one mutation, distinct from a resize within the `Fixed`
//! variant.

/// One cron-driven scaling window.
///
/// `cron` is passed through to the control plane verbatim; the client does not
/// evaluate schedules locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingWindow {
    /// Cron expression, control-plane syntax.
    pub cron: String,
    /// Target size (CU or replica count) while the window is active.
    pub target: u32,
}

/// Compute (CU) scaling configuration for a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeScaling {
    /// Fixed CU size; resizes are explicit mutations.
    Fixed {
        /// Compute units allocated to the cluster.
        cu_size: u32,
    },
    /// Dynamic autoscaling within an inclusive CU range.
    Autoscaled {
        /// Lower CU bound.
        min_cu: u32,
        /// Upper CU bound.
        max_cu: u32,
    },
    /// Cron-based scheduled scaling.
    Scheduled {
        /// CU size outside any window.
        default_cu: u32,
        /// Scaling windows, evaluated by the control plane.
        windows: Vec<ScalingWindow>,
    },
}

impl ComputeScaling {
    /// The fixed CU size, if this policy is `Fixed`.
    pub fn fixed_cu(&self) -> Option<u32> {
        match self {
            ComputeScaling::Fixed { cu_size } => Some(*cu_size),
            _ => None,
        }
    }

    /// `true` unless the policy is a plain fixed size.
    pub fn is_autoscaling(&self) -> bool {
        !matches!(self, ComputeScaling::Fixed { .. })
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ComputeScaling::Fixed { .. } => "fixed",
            ComputeScaling::Autoscaled { .. } => "autoscaled",
            ComputeScaling::Scheduled { .. } => "scheduled",
        }
    }
}

/// Replica scaling configuration for a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicaScaling {
    /// Fixed replica count; changes are explicit mutations.
    Fixed {
        /// Number of replicas.
        count: u32,
    },
    /// Dynamic autoscaling within an inclusive replica range.
    Autoscaled {
        /// Lower replica bound.
        min: u32,
        /// Upper replica bound.
        max: u32,
    },
    /// Cron-based scheduled replica scaling.
    Scheduled {
        /// Replica count outside any window.
        default_count: u32,
        /// Scaling windows, evaluated by the control plane.
        windows: Vec<ScalingWindow>,
    },
}

impl ReplicaScaling {
    /// The fixed replica count, if this policy is `Fixed`.
    pub fn fixed_count(&self) -> Option<u32> {
        match self {
            ReplicaScaling::Fixed { count } => Some(*count),
            _ => None,
        }
    }

    /// `true` unless the policy is a plain fixed count.
    pub fn is_autoscaling(&self) -> bool {
        !matches!(self, ReplicaScaling::Fixed { .. })
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReplicaScaling::Fixed { .. } => "fixed",
            ReplicaScaling::Autoscaled { .. } => "autoscaled",
            ReplicaScaling::Scheduled { .. } => "scheduled",
        }
    }
}
