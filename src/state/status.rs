//! # Cluster status model and transition planning.
//!
//! [`ClusterStatus`] mirrors the control plane's reported lifecycle states.
//! [`DesiredStatus`] is the subset a user can declare (a cluster cannot be asked
//! to be "creating"). [`StatusAction`] is the derived transition, computed by
//! [`StatusAction::plan`] from the desired/observed pair.
//!
//! ## Transition rules
//! ```text
//! desired=Suspended ∧ observed=Running   → Suspend
//! desired=Running   ∧ observed=Suspended → Resume
//! anything else                          → None
//! ```
//! In particular, a cluster already mid-transition (Suspending, Resuming,
//! Modifying) yields `None`: the reconciler waits for the in-flight transition
//! instead of stacking a second one.

use std::fmt;

/// Lifecycle status reported by the control plane.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterStatus {
    /// Initial provisioning after create.
    Creating,
    /// Healthy and serving.
    Running,
    /// Suspend transition in flight.
    Suspending,
    /// Compute released; storage retained.
    Suspended,
    /// Resume transition in flight.
    Resuming,
    /// CU/replica/scaling-policy change in flight.
    Modifying,
    /// Terminal; the cluster no longer exists.
    Deleted,
}

impl ClusterStatus {
    /// `true` while the control plane is still working towards a stable state.
    ///
    /// A probe waiting for convergence treats these as "not yet", bounded only by
    /// the poll timeout.
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            ClusterStatus::Creating
                | ClusterStatus::Suspending
                | ClusterStatus::Resuming
                | ClusterStatus::Modifying
        )
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ClusterStatus::Creating => "creating",
            ClusterStatus::Running => "running",
            ClusterStatus::Suspending => "suspending",
            ClusterStatus::Suspended => "suspended",
            ClusterStatus::Resuming => "resuming",
            ClusterStatus::Modifying => "modifying",
            ClusterStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Run status a user can declare for a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesiredStatus {
    /// Cluster should be up and serving.
    #[default]
    Running,
    /// Cluster should be suspended (compute released, storage retained).
    Suspended,
}

/// Derived status transition for one apply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusAction {
    /// No transition required.
    #[default]
    None,
    /// Issue a suspend call, then await `Suspended`.
    Suspend,
    /// Issue a resume call, then await `Running`.
    Resume,
}

impl StatusAction {
    /// Computes the transition for a desired/observed status pair.
    ///
    /// # Example
    /// ```
    /// use clustervisor::{ClusterStatus, DesiredStatus, StatusAction};
    ///
    /// let action = StatusAction::plan(DesiredStatus::Suspended, ClusterStatus::Running);
    /// assert_eq!(action, StatusAction::Suspend);
    /// ```
    pub fn plan(desired: DesiredStatus, observed: ClusterStatus) -> Self {
        match (desired, observed) {
            (DesiredStatus::Suspended, ClusterStatus::Running) => StatusAction::Suspend,
            (DesiredStatus::Running, ClusterStatus::Suspended) => StatusAction::Resume,
            _ => StatusAction::None,
        }
    }

    /// The stable status this action converges to, if any.
    pub fn target(&self) -> Option<ClusterStatus> {
        match self {
            StatusAction::None => None,
            StatusAction::Suspend => Some(ClusterStatus::Suspended),
            StatusAction::Resume => Some(ClusterStatus::Running),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            StatusAction::None => "none",
            StatusAction::Suspend => "suspend",
            StatusAction::Resume => "resume",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspend_planned_only_from_running() {
        assert_eq!(
            StatusAction::plan(DesiredStatus::Suspended, ClusterStatus::Running),
            StatusAction::Suspend
        );
        assert_eq!(
            StatusAction::plan(DesiredStatus::Suspended, ClusterStatus::Suspended),
            StatusAction::None
        );
        assert_eq!(
            StatusAction::plan(DesiredStatus::Suspended, ClusterStatus::Suspending),
            StatusAction::None
        );
    }

    #[test]
    fn test_resume_planned_only_from_suspended() {
        assert_eq!(
            StatusAction::plan(DesiredStatus::Running, ClusterStatus::Suspended),
            StatusAction::Resume
        );
        assert_eq!(
            StatusAction::plan(DesiredStatus::Running, ClusterStatus::Running),
            StatusAction::None
        );
        assert_eq!(
            StatusAction::plan(DesiredStatus::Running, ClusterStatus::Resuming),
            StatusAction::None
        );
    }

    #[test]
    fn test_transitional_statuses_plan_nothing() {
        for observed in [
            ClusterStatus::Creating,
            ClusterStatus::Suspending,
            ClusterStatus::Resuming,
            ClusterStatus::Modifying,
            ClusterStatus::Deleted,
        ] {
            assert_eq!(
                StatusAction::plan(DesiredStatus::Running, observed),
                StatusAction::None,
                "observed={observed}"
            );
            assert_eq!(
                StatusAction::plan(DesiredStatus::Suspended, observed),
                StatusAction::None,
                "observed={observed}"
            );
        }
    }

    #[test]
    fn test_action_targets() {
        assert_eq!(StatusAction::Suspend.target(), Some(ClusterStatus::Suspended));
        assert_eq!(StatusAction::Resume.target(), Some(ClusterStatus::Running));
        assert_eq!(StatusAction::None.target(), None);
    }
}
