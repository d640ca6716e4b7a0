//! Resource lifecycle orchestration: diff desired vs. observed state, validate
//! invariants, apply mutations in a fixed convergent order, and await
//! convergence of long-running steps via the poll engine.

mod cluster;
mod config;
mod diff;
mod error;

pub use cluster::{ApplyReport, ApplyWarning, Reconciler};
pub use config::ReconcileConfig;
pub use diff::{plan_create, ClusterDiff};
pub use error::ReconcileError;
