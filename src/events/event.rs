//! # Runtime events emitted by the poll engine and the reconciler.
//!
//! [`EventKind`] classifies events across two categories:
//! - **Wait events**: one convergence wait (poll run) starting, retrying, and
//!   terminating.
//! - **Apply events**: mutations issued and cycle-level outcomes.
//!
//! The [`Event`] struct carries metadata such as timestamps, the cluster id, the
//! step being waited on, attempt numbers, and failure reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore exact order when events are delivered out
//! of order.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::state::ClusterStatus;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Wait (poll run) events ===
    /// A convergence wait started.
    ///
    /// Sets: `cluster`, `step`, `timeout_ms`, `at`, `seq`.
    WaitStarted,

    /// Probe reported "not yet converged"; the wait continues.
    ///
    /// Sets: `cluster`, `step`, `attempt`, `reason`, `at`, `seq`.
    WaitPending,

    /// Probe hit a transport failure; the wait continues against the cap.
    ///
    /// Sets: `cluster`, `step`, `attempt`, `reason`, `at`, `seq`.
    WaitTransient,

    /// The wait converged.
    ///
    /// Sets: `cluster`, `step`, `attempt`, `at`, `seq`.
    WaitConverged,

    /// Probe reported a fatal failure; the wait aborted.
    ///
    /// Sets: `cluster`, `step`, `attempt`, `reason`, `at`, `seq`.
    WaitFailed,

    /// The wait exhausted its deadline on a still-retryable probe.
    ///
    /// Sets: `cluster`, `step`, `reason` (last retryable reason), `timeout_ms`,
    /// `at`, `seq`.
    WaitTimedOut,

    /// Consecutive transport failures exceeded the cap; the wait gave up.
    ///
    /// Sets: `cluster`, `step`, `attempt` (failure count), `reason`, `at`, `seq`.
    WaitGaveUp,

    /// The wait was cancelled by the caller.
    ///
    /// Sets: `cluster`, `step`, `at`, `seq`.
    WaitCanceled,

    // === Apply (cycle) events ===
    /// An apply cycle started for a cluster.
    ///
    /// Sets: `cluster`, `at`, `seq`.
    ApplyStarted,

    /// A create call was issued.
    ///
    /// Sets: `cluster` (name at this point — no id yet), `at`, `seq`.
    CreateIssued,

    /// A synchronous or asynchronous mutation was issued.
    ///
    /// Sets: `cluster`, `step` (mutation name), `at`, `seq`.
    MutationIssued,

    /// A suspend/resume transition call was issued.
    ///
    /// Sets: `cluster`, `step` (action label), `status` (target), `at`, `seq`.
    TransitionIssued,

    /// A non-fatal problem occurred; the cycle continued or completed.
    ///
    /// Sets: `cluster`, `step`, `reason`, `at`, `seq`.
    ApplyWarning,

    /// The apply cycle completed and the final observed state was fetched.
    ///
    /// Sets: `cluster`, `status`, `at`, `seq`.
    ApplyConverged,

    /// A drop call was issued.
    ///
    /// Sets: `cluster`, `at`, `seq`.
    DropIssued,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Cluster id (or name, before an id exists).
    pub cluster: Option<Arc<str>>,
    /// Step or mutation the event refers to (e.g. `"resize"`, `"create"`).
    pub step: Option<Arc<str>>,
    /// Human-readable reason (pending reasons, failure messages).
    pub reason: Option<Arc<str>>,
    /// Probe attempt count (starting from 1) or consecutive failure count.
    pub attempt: Option<u32>,
    /// Wait timeout in milliseconds (compact).
    pub timeout_ms: Option<u64>,
    /// Cluster status attached to the event, if relevant.
    pub status: Option<ClusterStatus>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            cluster: None,
            step: None,
            reason: None,
            attempt: None,
            timeout_ms: None,
            status: None,
        }
    }

    /// Attaches a cluster id or name.
    #[inline]
    pub fn with_cluster(mut self, cluster: impl Into<Arc<str>>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// Attaches a step or mutation name.
    #[inline]
    pub fn with_step(mut self, step: impl Into<Arc<str>>) -> Self {
        self.step = Some(step.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a wait timeout (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        self.timeout_ms = Some(d.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    /// Attaches a cluster status.
    #[inline]
    pub fn with_status(mut self, status: ClusterStatus) -> Self {
        self.status = Some(status);
        self
    }
}
