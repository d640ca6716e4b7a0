//! Step-level errors produced by the reconciler.

use thiserror::Error;

use crate::error::ApiError;
use crate::poll::PollError;

/// # Errors terminating an apply cycle.
///
/// Every variant names the cluster and the step that failed; already-applied
/// prior steps are not rolled back.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// An invariant on the desired state is violated. Raised before any
    /// mutating call, so the cycle has zero side effects.
    #[error("invalid desired state for cluster {cluster}: {field}: {message}")]
    Validation {
        /// Cluster id, or name when no id exists yet.
        cluster: String,
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A control-plane call failed.
    #[error("step {step} failed for cluster {cluster}")]
    Api {
        /// Cluster id, or name when no id exists yet.
        cluster: String,
        /// The step that issued the call.
        step: &'static str,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// A convergence wait ended without reaching the target.
    #[error("step {step} did not converge for cluster {cluster}")]
    Convergence {
        /// Cluster id.
        cluster: String,
        /// The step being awaited.
        step: &'static str,
        /// The terminal poll result.
        #[source]
        source: PollError,
    },
}

impl ReconcileError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReconcileError::Validation { .. } => "reconcile_validation",
            ReconcileError::Api { .. } => "reconcile_api",
            ReconcileError::Convergence { .. } => "reconcile_convergence",
        }
    }

    /// The cluster the error refers to.
    pub fn cluster(&self) -> &str {
        match self {
            ReconcileError::Validation { cluster, .. }
            | ReconcileError::Api { cluster, .. }
            | ReconcileError::Convergence { cluster, .. } => cluster,
        }
    }
}
