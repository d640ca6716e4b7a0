//! # clustervisor
//!
//! **Clustervisor** is a lifecycle-reconciliation library for cloud
//! vector-database clusters.
//!
//! It takes a declared [`DesiredCluster`], compares it against the control
//! plane's [`ObservedCluster`], and converges the two through a single
//! sequential apply cycle — issuing mutations over a [`ControlPlane`] gateway
//! and waiting out long-running transitions with a generic poll engine. It is
//! designed as the reconciliation core behind an infrastructure-as-code
//! provider; the provider owns schemas, plan diffs, and persistence, this crate
//! owns convergence.
//!
//! ## Architecture
//! ```text
//!  DesiredCluster      ObservedCluster
//!        │                   ▲
//!        ▼                   │ describe
//! ┌───────────────────────────────────────────────────────────┐
//! │  Reconciler (apply cycle orchestrator)                    │
//! │  - ClusterDiff (diff + invariant validation)              │
//! │  - fixed mutation order: resize | replicas → transition   │
//! │    → labels → rename → scaling policies                   │
//! └──────┬──────────────────────────────┬─────────────────────┘
//!        │ mutations                    │ convergence waits
//!        ▼                              ▼
//! ┌──────────────────┐        ┌──────────────────────────────┐
//! │  ControlPlane    │◄───────│  Poller (poll engine)        │
//! │  (API gateway)   │ probes │  - fixed interval, deadline  │
//! └──────────────────┘        │  - TransientBudget (cap)     │
//!                             │  - CancellationToken         │
//!                             └──────────────┬───────────────┘
//!                                            │ events
//!                                            ▼
//!                             ┌──────────────────────────────┐
//!                             │  Bus (broadcast)             │
//!                             │   └─► listener ─► Subscribe  │
//!                             └──────────────────────────────┘
//! ```
//!
//! ## Convergence waits
//! ```text
//! Poller::run(token, tag, timeout, probe)
//!
//! loop {
//!   ├─► probe()
//!   │     ├─ Ready(v)        ─► Ok(v)
//!   │     ├─ Pending{reason} ─► reset transient budget, continue
//!   │     ├─ Err(Transient)  ─► budget.record()
//!   │     │                      └─ exhausted ─► Err(GaveUp)
//!   │     └─ Err(Fatal)      ─► Err(Fatal)
//!   ├─► past deadline?       ─► Err(TimedOut)
//!   └─► sleep(interval)      (cancellable ─► Err(Canceled))
//! }
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits                        |
//! |-----------------|----------------------------------------------------------|-------------------------------------------|
//! | **State model** | Typed desired/observed state, sum-typed scaling policies.| [`DesiredCluster`], [`ComputeScaling`]    |
//! | **Polling**     | Poll-until-condition with timeout/cancellation/retry.    | [`Poller`], [`ProbeOutcome`], [`PollError`]|
//! | **Reconcile**   | Convergent apply cycle over the gateway client.          | [`Reconciler`], [`ClusterDiff`]           |
//! | **Gateway**     | Control-plane API boundary and injected-store mock.      | [`ControlPlane`], [`MockPlane`], [`Store`]|
//! | **Events**      | Lifecycle events with ordering guarantees.               | [`Event`], [`Bus`], [`Subscribe`]         |
//! | **Errors**      | Classified errors for calls, polls, and cycles.          | [`ApiError`], [`PollError`], [`ReconcileError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use clustervisor::{DesiredCluster, MockPlane, ReconcileConfig, Reconciler};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Production code would pass its HTTP-backed ControlPlane here.
//!     let api = Arc::new(MockPlane::new());
//!     let rec = Reconciler::new(api, ReconcileConfig::default());
//!
//!     let token = CancellationToken::new();
//!     let report = rec.create(&token, &DesiredCluster::new("demo", 1)).await?;
//!     println!("cluster {} is {}", report.observed.id, report.observed.status);
//!
//!     let mut desired = DesiredCluster::new("demo", 2);
//!     desired.labels.insert("env".into(), "prod".into());
//!     let report = rec.apply(&token, &report.observed.id, &desired).await?;
//!     println!("converged at {}", report.observed.status);
//!     Ok(())
//! }
//! ```

mod api;
mod error;
mod events;
mod poll;
mod reconcile;
mod state;
mod subscribers;

// ---- Public re-exports ----

pub use api::{
    Call, ClusterDelta, ClusterRecord, ControlPlane, CreateCluster, CreatedCluster, MemoryStore,
    MockPlane, Store, CODE_CLUSTER_NOT_FOUND,
};
pub use error::ApiError;
pub use events::{Bus, Event, EventKind};
pub use poll::{PollError, PollTag, Poller, ProbeError, ProbeOutcome, TransientBudget};
pub use reconcile::{
    plan_create, ApplyReport, ApplyWarning, ClusterDiff, ReconcileConfig, ReconcileError,
    Reconciler,
};
pub use state::{
    ClusterCredentials, ClusterStatus, ComputeScaling, DesiredCluster, DesiredStatus,
    ObservedCluster, ReplicaScaling, ScalingWindow, StatusAction,
};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
