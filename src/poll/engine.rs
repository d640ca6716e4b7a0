//! # Poller: generic poll-until-condition engine.
//!
//! Drives a probe closure on a fixed interval until one of five terminal
//! outcomes:
//!
//! ```text
//! loop {
//!   ├─► probe()
//!   │     ├─ Ready(v)            ─► return Ok(v)
//!   │     ├─ Pending{reason}     ─► reset transient budget, continue
//!   │     ├─ Err(Transient)      ─► count against budget
//!   │     │                          └─ budget exhausted ─► Err(GaveUp)
//!   │     └─ Err(Fatal)          ─► Err(Fatal)
//!   ├─► deadline reached?        ─► Err(TimedOut), wrapping last retryable reason
//!   └─► sleep(min(interval, remaining))   (cancellable)
//!          └─ token cancelled    ─► Err(Canceled)
//! }
//! ```
//!
//! ## Rules
//! - The probe runs **immediately** on entry; an already-converged resource never
//!   waits a full interval.
//! - The interval is **fixed** — no backoff. Waits here span minutes to hours
//!   (create ≈45min, BYOC ops up to 2h), so interval growth buys nothing.
//! - The interval sleep is the **sole suspension point**; cancellation is
//!   observed within one interval, never after the full timeout.
//! - A `Poller` holds no per-run state and is safe to share across concurrent
//!   poll runs for independent resources.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::{select, time, time::Instant};
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};
use crate::poll::{ProbeError, ProbeOutcome, TransientBudget};

/// # Terminal result of one poll run.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The probe reported a fatal failure.
    #[error("probe failed: {error}")]
    Fatal {
        /// Underlying failure message.
        error: String,
    },

    /// The deadline passed while the probe was still retryable.
    #[error("timed out after {timeout:?}; last: {last}")]
    TimedOut {
        /// The configured timeout that was exhausted.
        timeout: Duration,
        /// Last retryable reason observed before the deadline.
        last: String,
    },

    /// Consecutive transport failures exceeded the cap before the deadline.
    #[error("gave up after {failures} consecutive transient failures; last: {last}")]
    GaveUp {
        /// Consecutive failure count at the point of giving up.
        failures: u32,
        /// The final transient failure message.
        last: String,
    },

    /// The caller cancelled the wait.
    #[error("cancelled while waiting for convergence")]
    Canceled,
}

impl PollError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PollError::Fatal { .. } => "poll_fatal",
            PollError::TimedOut { .. } => "poll_timed_out",
            PollError::GaveUp { .. } => "poll_gave_up",
            PollError::Canceled => "poll_canceled",
        }
    }

    /// `true` when the run ended without a definitive business answer
    /// (timeout or transport give-up).
    ///
    /// These are the outcomes a post-create convergence wait downgrades to a
    /// warning: the resource exists, only the wait for it ran out.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, PollError::TimedOut { .. } | PollError::GaveUp { .. })
    }
}

/// Labels one poll run for event reporting.
///
/// The same engine serves every resource kind and step; the tag is what keeps
/// `[wait-pending] cluster=clu-1 step=resize` distinguishable downstream.
#[derive(Debug, Clone)]
pub struct PollTag {
    /// Cluster id (or name, pre-creation).
    pub cluster: Arc<str>,
    /// Step being awaited (e.g. `"create"`, `"resize"`, `"suspend"`).
    pub step: Arc<str>,
}

impl PollTag {
    /// Creates a tag for one poll run.
    pub fn new(cluster: impl Into<Arc<str>>, step: impl Into<Arc<str>>) -> Self {
        Self {
            cluster: cluster.into(),
            step: step.into(),
        }
    }
}

/// Generic poll-until-condition engine.
///
/// One `Poller` is shared by all waits of a reconciler; per-run state (attempt
/// counter, transient budget, deadline) lives on the stack of [`Poller::run`],
/// so concurrent runs for independent resources never interfere.
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    transient_cap: u32,
    bus: Bus,
}

impl Poller {
    /// Creates an engine probing on `interval` with the given consecutive
    /// transient-failure cap.
    pub fn new(interval: Duration, transient_cap: u32, bus: Bus) -> Self {
        Self {
            interval,
            transient_cap,
            bus,
        }
    }

    /// The fixed probe interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Polls `probe` until convergence, fatal failure, budget exhaustion,
    /// deadline, or cancellation.
    ///
    /// The probe is invoked immediately, then once per interval. The final sleep
    /// is clamped to the remaining deadline, so a perpetually-pending probe
    /// produces [`PollError::TimedOut`] at the configured timeout, within one
    /// interval.
    pub async fn run<T, F, Fut>(
        &self,
        token: &CancellationToken,
        tag: PollTag,
        timeout: Duration,
        mut probe: F,
    ) -> Result<T, PollError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<ProbeOutcome<T>, ProbeError>>,
    {
        let deadline = Instant::now() + timeout;
        let mut budget = TransientBudget::new(self.transient_cap);
        let mut last_retryable: Option<String> = None;
        let mut attempt: u32 = 0;

        self.bus.publish(
            Event::new(EventKind::WaitStarted)
                .with_cluster(tag.cluster.clone())
                .with_step(tag.step.clone())
                .with_timeout(timeout),
        );

        loop {
            if token.is_cancelled() {
                self.publish_terminal(&tag, EventKind::WaitCanceled, attempt, None);
                return Err(PollError::Canceled);
            }

            attempt += 1;
            match probe().await {
                Ok(ProbeOutcome::Ready(value)) => {
                    self.publish_terminal(&tag, EventKind::WaitConverged, attempt, None);
                    return Ok(value);
                }
                Ok(ProbeOutcome::Pending { reason }) => {
                    budget.reset();
                    self.bus.publish(
                        Event::new(EventKind::WaitPending)
                            .with_cluster(tag.cluster.clone())
                            .with_step(tag.step.clone())
                            .with_attempt(attempt)
                            .with_reason(reason.clone()),
                    );
                    last_retryable = Some(reason);
                }
                Err(ProbeError::Transient { error }) => {
                    self.bus.publish(
                        Event::new(EventKind::WaitTransient)
                            .with_cluster(tag.cluster.clone())
                            .with_step(tag.step.clone())
                            .with_attempt(attempt)
                            .with_reason(error.clone()),
                    );
                    last_retryable = Some(error.clone());
                    if !budget.record(error) {
                        let last = budget.last_reason().unwrap_or_default().to_string();
                        self.publish_terminal(
                            &tag,
                            EventKind::WaitGaveUp,
                            budget.failures(),
                            Some(&last),
                        );
                        return Err(PollError::GaveUp {
                            failures: budget.failures(),
                            last,
                        });
                    }
                }
                Err(ProbeError::Fatal { error }) => {
                    self.publish_terminal(&tag, EventKind::WaitFailed, attempt, Some(&error));
                    return Err(PollError::Fatal { error });
                }
            }

            let now = Instant::now();
            if now >= deadline {
                let last = last_retryable.unwrap_or_else(|| "no probe response".to_string());
                self.bus.publish(
                    Event::new(EventKind::WaitTimedOut)
                        .with_cluster(tag.cluster.clone())
                        .with_step(tag.step.clone())
                        .with_reason(last.clone())
                        .with_timeout(timeout),
                );
                return Err(PollError::TimedOut { timeout, last });
            }

            let sleep = time::sleep(self.interval.min(deadline - now));
            tokio::pin!(sleep);
            select! {
                _ = &mut sleep => {}
                _ = token.cancelled() => {
                    self.publish_terminal(&tag, EventKind::WaitCanceled, attempt, None);
                    return Err(PollError::Canceled);
                }
            }
        }
    }

    fn publish_terminal(&self, tag: &PollTag, kind: EventKind, attempt: u32, reason: Option<&str>) {
        let mut ev = Event::new(kind)
            .with_cluster(tag.cluster.clone())
            .with_step(tag.step.clone())
            .with_attempt(attempt);
        if let Some(reason) = reason {
            ev = ev.with_reason(reason.to_string());
        }
        self.bus.publish(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(10);

    fn poller(cap: u32) -> Poller {
        Poller::new(INTERVAL, cap, Bus::new(64))
    }

    fn tag() -> PollTag {
        PollTag::new("clu-test", "test")
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_returns_without_waiting() {
        let started = Instant::now();
        let result: Result<u32, _> = poller(20)
            .run(&CancellationToken::new(), tag(), Duration::from_secs(600), || async {
                Ok(ProbeOutcome::Ready(7))
            })
            .await;
        assert_eq!(result.unwrap(), 7);
        assert!(started.elapsed() < INTERVAL, "returned within one interval");
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_pending_times_out_at_deadline() {
        let timeout = Duration::from_secs(95);
        let started = Instant::now();
        let result: Result<(), _> = poller(20)
            .run(&CancellationToken::new(), tag(), timeout, || async {
                Ok(ProbeOutcome::pending("status=creating"))
            })
            .await;
        match result.unwrap_err() {
            PollError::TimedOut { last, .. } => assert_eq!(last, "status=creating"),
            other => panic!("expected TimedOut, got {other:?}"),
        }
        let elapsed = started.elapsed();
        assert!(elapsed >= timeout, "never times out early: {elapsed:?}");
        assert!(elapsed <= timeout + INTERVAL, "within one interval: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_probe_aborts_immediately() {
        let mut calls = 0u32;
        let started = Instant::now();
        let result: Result<(), _> = poller(20)
            .run(&CancellationToken::new(), tag(), Duration::from_secs(600), move || {
                calls += 1;
                let n = calls;
                async move {
                    if n < 3 {
                        Ok(ProbeOutcome::pending("status=creating"))
                    } else {
                        Err(ProbeError::fatal("INVALID_STATE"))
                    }
                }
            })
            .await;
        match result.unwrap_err() {
            PollError::Fatal { error } => assert_eq!(error, "INVALID_STATE"),
            other => panic!("expected Fatal, got {other:?}"),
        }
        // Two pending probes means exactly two interval sleeps.
        assert_eq!(started.elapsed(), INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transients_within_cap_still_succeed() {
        let cap = 5u32;
        let mut calls = 0u32;
        let result = poller(cap)
            .run(&CancellationToken::new(), tag(), Duration::from_secs(600), move || {
                calls += 1;
                let n = calls;
                async move {
                    if n <= cap {
                        Err(ProbeError::transient("connection reset"))
                    } else {
                        Ok(ProbeOutcome::Ready(n))
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), cap + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transients_beyond_cap_give_up_before_timeout() {
        let timeout = Duration::from_secs(3600);
        let started = Instant::now();
        let result: Result<(), _> = poller(5)
            .run(&CancellationToken::new(), tag(), timeout, || async {
                Err(ProbeError::transient("connection reset"))
            })
            .await;
        match result.unwrap_err() {
            PollError::GaveUp { failures, last } => {
                assert_eq!(failures, 6);
                assert_eq!(last, "connection reset");
            }
            other => panic!("expected GaveUp, got {other:?}"),
        }
        assert!(started.elapsed() < timeout, "gave up well before the deadline");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_resets_transient_budget() {
        // Alternate transient/pending far past the cap; consecutive count never
        // exceeds 1, so the run reaches the ready probe.
        let mut calls = 0u32;
        let result = poller(2)
            .run(&CancellationToken::new(), tag(), Duration::from_secs(3600), move || {
                calls += 1;
                let n = calls;
                async move {
                    match n {
                        n if n >= 20 => Ok(ProbeOutcome::Ready(n)),
                        n if n % 2 == 1 => Err(ProbeError::transient("blip")),
                        _ => Ok(ProbeOutcome::pending("status=modifying")),
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_observed_within_one_interval() {
        let token = CancellationToken::new();
        let cancel_after = Duration::from_secs(25);
        {
            let token = token.clone();
            tokio::spawn(async move {
                time::sleep(cancel_after).await;
                token.cancel();
            });
        }
        let started = Instant::now();
        let result: Result<(), _> = poller(20)
            .run(&token, tag(), Duration::from_secs(7200), || async {
                Ok(ProbeOutcome::pending("status=creating"))
            })
            .await;
        assert_eq!(result.unwrap_err(), PollError::Canceled);
        let elapsed = started.elapsed();
        assert!(
            elapsed <= cancel_after + INTERVAL,
            "cancelled within one interval: {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_events_published_in_order() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let engine = Poller::new(INTERVAL, 20, bus);
        let mut calls = 0u32;
        let _ = engine
            .run(&CancellationToken::new(), tag(), Duration::from_secs(600), move || {
                calls += 1;
                let n = calls;
                async move {
                    if n == 1 {
                        Ok(ProbeOutcome::pending("status=creating"))
                    } else {
                        Ok(ProbeOutcome::Ready(()))
                    }
                }
            })
            .await
            .unwrap();

        let kinds: Vec<EventKind> = [rx.recv().await, rx.recv().await, rx.recv().await]
            .into_iter()
            .map(|ev| ev.unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![EventKind::WaitStarted, EventKind::WaitPending, EventKind::WaitConverged]
        );
    }
}
