//! # Reconciliation timing configuration.
//!
//! Provides [`ReconcileConfig`], the per-reconciler settings for probe interval,
//! transient-failure budget, and per-step convergence timeouts.
//!
//! The defaults reflect how long the control plane actually takes: cluster
//! creation runs on the order of 45 minutes, modifications around 30. There is
//! no backoff knob on purpose — against multi-minute waits a fixed 10s interval
//! is already negligible load.

use std::time::Duration;

/// Settings for one [`Reconciler`](crate::Reconciler).
///
/// ## Field semantics
/// - `interval`: fixed probe interval for all convergence waits
/// - `transient_cap`: consecutive transport failures tolerated within one wait
/// - `create_timeout` / `modify_timeout` / `transition_timeout` /
///   `delete_timeout`: per-step convergence deadlines
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus)
#[derive(Clone, Debug)]
pub struct ReconcileConfig {
    /// Fixed probe interval for convergence waits.
    pub interval: Duration,

    /// Consecutive transport failures tolerated within one wait before the
    /// engine gives up.
    pub transient_cap: u32,

    /// Deadline for a new cluster to reach `Running` after create.
    pub create_timeout: Duration,

    /// Deadline for a resize/replica/policy change to settle back to `Running`.
    pub modify_timeout: Duration,

    /// Deadline for a suspend/resume transition to reach its target status.
    pub transition_timeout: Duration,

    /// Deadline for a dropped cluster to disappear.
    pub delete_timeout: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,
}

impl Default for ReconcileConfig {
    /// Default configuration:
    ///
    /// - `interval = 10s`
    /// - `transient_cap = 20`
    /// - `create_timeout = 45min`
    /// - `modify_timeout = 30min`
    /// - `transition_timeout = 30min`
    /// - `delete_timeout = 30min`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            transient_cap: 20,
            create_timeout: Duration::from_secs(45 * 60),
            modify_timeout: Duration::from_secs(30 * 60),
            transition_timeout: Duration::from_secs(30 * 60),
            delete_timeout: Duration::from_secs(30 * 60),
            bus_capacity: 1024,
        }
    }
}
