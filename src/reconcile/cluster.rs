//! # Reconciler: per-cluster lifecycle orchestrator.
//!
//! Sequences one apply cycle's mutations into a convergent order and awaits the
//! long-running ones through the poll engine.
//!
//! ## Apply cycle
//! ```text
//! apply(id, desired)
//!   ├─► describe(id)                        (fetch observed)
//!   ├─► ClusterDiff::between                (validate; fail fast, zero mutations)
//!   ├─► resize            ─► await Running      (only when both sides fixed)
//!   │     or replica change ─► await Running    (mutually exclusive per cycle)
//!   ├─► suspend/resume    ─► await target status
//!   ├─► labels, rename                      (synchronous, no wait)
//!   ├─► compute policy    ─► await Running  (may trigger provisioning)
//!   ├─► replica policy    ─► await Running
//!   └─► describe(id)                        (final observed, returned)
//! ```
//!
//! CU/replica changes and suspend/resume are the only steps that leave
//! `Running`; running them before metadata avoids mutating a cluster
//! mid-transition. A fixed-CU and fixed-replica change in the same cycle is
//! rejected up front: the control plane has no defined target for the combined
//! modification.
//!
//! ## Failure semantics
//! A post-create convergence timeout or transport give-up is a **warning**, not
//! a failure: the cluster id already exists and rollback of a half-provisioned
//! cloud resource is not this crate's call to make. Every other step error
//! aborts the remainder of the cycle; prior steps are not rolled back.

use std::sync::Arc;

use tokio::select;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::{ClusterDelta, ControlPlane, CODE_CLUSTER_NOT_FOUND};
use crate::error::ApiError;
use crate::events::{Bus, Event, EventKind};
use crate::poll::{PollError, PollTag, Poller, ProbeError, ProbeOutcome};
use crate::reconcile::{plan_create, ClusterDiff, ReconcileConfig, ReconcileError};
use crate::state::{
    ClusterCredentials, ClusterStatus, DesiredCluster, ObservedCluster, StatusAction,
};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Non-fatal problem recorded during an apply cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyWarning {
    /// The step the warning refers to.
    pub step: &'static str,
    /// What went wrong.
    pub message: String,
}

impl std::fmt::Display for ApplyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.step, self.message)
    }
}

/// Result of one apply cycle.
///
/// The caller persists `observed` (and `credentials`, returned once at
/// creation); this crate keeps nothing across cycles.
#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// Final observed state, re-fetched at the end of the cycle (or best-known
    /// state after a create-convergence warning).
    pub observed: ObservedCluster,
    /// One-time root credentials; `Some` only for a create cycle.
    pub credentials: Option<ClusterCredentials>,
    /// Non-fatal problems encountered during the cycle.
    pub warnings: Vec<ApplyWarning>,
}

/// Per-resource-type lifecycle orchestrator for clusters.
///
/// Each method runs one sequential apply cycle; parallelism exists only across
/// independent clusters, each with its own call into the reconciler. The
/// reconciler itself holds no per-cluster state.
pub struct Reconciler<A: ControlPlane> {
    api: Arc<A>,
    config: ReconcileConfig,
    poller: Poller,
    bus: Bus,
    subscribers: SubscriberSet,
}

impl<A: ControlPlane> Reconciler<A> {
    /// Creates a reconciler over the given gateway client.
    pub fn new(api: Arc<A>, config: ReconcileConfig) -> Self {
        let bus = Bus::new(config.bus_capacity);
        let poller = Poller::new(config.interval, config.transient_cap, bus.clone());
        Self {
            api,
            config,
            poller,
            bus,
            subscribers: SubscriberSet::default(),
        }
    }

    /// Registers subscribers; drive them with [`Reconciler::spawn_listener`].
    pub fn with_subscribers(mut self, subs: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = SubscriberSet::new(subs);
        self
    }

    /// Creates a receiver observing all subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Spawns the listener task that drains the bus into the registered
    /// subscribers until `token` is cancelled.
    ///
    /// Lagged events are skipped; the listener never blocks publishers.
    pub fn spawn_listener(&self, token: CancellationToken) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let subs = self.subscribers.clone();
        tokio::spawn(async move {
            loop {
                select! {
                    _ = token.cancelled() => break,
                    res = rx.recv() => match res {
                        Ok(ev) => subs.emit(&ev).await,
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        })
    }

    /// Provisions a new cluster and awaits it reaching `Running`.
    ///
    /// A convergence timeout or transport give-up after a successful create
    /// call is reported as a warning with the best-known observed state — the
    /// identity exists and the caller must persist it either way. A fatal probe
    /// result or cancellation is an error.
    pub async fn create(
        &self,
        token: &CancellationToken,
        desired: &DesiredCluster,
    ) -> Result<ApplyReport, ReconcileError> {
        let params = plan_create(desired)?;

        self.bus
            .publish(Event::new(EventKind::CreateIssued).with_cluster(desired.name.clone()));
        let created = self.api.create(&params).await.map_err(|source| {
            ReconcileError::Api {
                cluster: desired.name.clone(),
                step: "create",
                source,
            }
        })?;
        let id = created.id;

        let mut warnings = Vec::new();
        let observed = match self
            .await_status(token, &id, "create", ClusterStatus::Running, self.config.create_timeout)
            .await
        {
            Ok(observed) => observed,
            Err(err) if err.is_exhaustion() => {
                self.bus.publish(
                    Event::new(EventKind::ApplyWarning)
                        .with_cluster(id.clone())
                        .with_step("create")
                        .with_reason(err.to_string()),
                );
                warnings.push(ApplyWarning {
                    step: "create",
                    message: err.to_string(),
                });
                self.best_known(&id, desired).await
            }
            Err(source) => {
                return Err(ReconcileError::Convergence {
                    cluster: id,
                    step: "create",
                    source,
                })
            }
        };

        self.bus.publish(
            Event::new(EventKind::ApplyConverged)
                .with_cluster(id)
                .with_status(observed.status),
        );
        Ok(ApplyReport {
            observed,
            credentials: Some(created.credentials),
            warnings,
        })
    }

    /// Runs one apply cycle converging an existing cluster to `desired`.
    pub async fn apply(
        &self,
        token: &CancellationToken,
        id: &str,
        desired: &DesiredCluster,
    ) -> Result<ApplyReport, ReconcileError> {
        self.bus
            .publish(Event::new(EventKind::ApplyStarted).with_cluster(id.to_string()));

        let observed = self.describe(id).await?;
        let diff = ClusterDiff::between(desired, &observed)?;

        if let Some(cu_size) = diff.resize {
            self.modify(token, id, ClusterDelta::Resize { cu_size }).await?;
        } else if let Some(count) = diff.replicas {
            self.modify(token, id, ClusterDelta::Replicas { count }).await?;
        }

        if let Some(target) = diff.action.target() {
            self.transition(token, id, diff.action, target).await?;
        }

        if let Some(labels) = diff.labels {
            self.modify(token, id, ClusterDelta::Labels(labels)).await?;
        }
        if let Some(name) = diff.rename {
            self.modify(token, id, ClusterDelta::Rename { name }).await?;
        }
        if let Some(policy) = diff.compute_policy {
            self.modify(token, id, ClusterDelta::ComputePolicy(policy)).await?;
        }
        if let Some(policy) = diff.replica_policy {
            self.modify(token, id, ClusterDelta::ReplicaPolicy(policy)).await?;
        }

        let observed = self.describe(id).await?;
        self.bus.publish(
            Event::new(EventKind::ApplyConverged)
                .with_cluster(id.to_string())
                .with_status(observed.status),
        );
        Ok(ApplyReport {
            observed,
            credentials: None,
            warnings: Vec::new(),
        })
    }

    /// Drops a cluster and awaits its disappearance.
    ///
    /// A cluster the control plane no longer knows is already converged, both
    /// on the drop call and while polling.
    pub async fn delete(
        &self,
        token: &CancellationToken,
        id: &str,
    ) -> Result<(), ReconcileError> {
        self.bus
            .publish(Event::new(EventKind::DropIssued).with_cluster(id.to_string()));

        match ControlPlane::drop(&*self.api, id).await {
            Ok(()) => {}
            Err(ApiError::Business { ref code, .. }) if code == CODE_CLUSTER_NOT_FOUND => {
                return Ok(())
            }
            Err(source) => {
                return Err(ReconcileError::Api {
                    cluster: id.to_string(),
                    step: "drop",
                    source,
                })
            }
        }

        let api = &self.api;
        self.poller
            .run(
                token,
                PollTag::new(id, "delete"),
                self.config.delete_timeout,
                || async move {
                    match api.describe(id).await {
                        Ok(obs) if obs.status == ClusterStatus::Deleted => {
                            Ok(ProbeOutcome::Ready(()))
                        }
                        Ok(obs) => Ok(ProbeOutcome::pending(format!("status={}", obs.status))),
                        Err(ApiError::Business { ref code, .. })
                            if code == CODE_CLUSTER_NOT_FOUND =>
                        {
                            Ok(ProbeOutcome::Ready(()))
                        }
                        Err(err) => Err(ProbeError::from(err)),
                    }
                },
            )
            .await
            .map_err(|source| ReconcileError::Convergence {
                cluster: id.to_string(),
                step: "delete",
                source,
            })
    }

    /// Issues one mutation; for asynchronous deltas, awaits `Running` again.
    async fn modify(
        &self,
        token: &CancellationToken,
        id: &str,
        delta: ClusterDelta,
    ) -> Result<(), ReconcileError> {
        let step = delta.as_label();
        self.bus.publish(
            Event::new(EventKind::MutationIssued)
                .with_cluster(id.to_string())
                .with_step(step),
        );
        self.api
            .modify(id, &delta)
            .await
            .map_err(|source| ReconcileError::Api {
                cluster: id.to_string(),
                step,
                source,
            })?;

        if delta.is_async() {
            self.await_status(token, id, step, ClusterStatus::Running, self.config.modify_timeout)
                .await
                .map_err(|source| ReconcileError::Convergence {
                    cluster: id.to_string(),
                    step,
                    source,
                })?;
        }
        Ok(())
    }

    /// Issues a suspend/resume call and awaits the target status.
    async fn transition(
        &self,
        token: &CancellationToken,
        id: &str,
        action: StatusAction,
        target: ClusterStatus,
    ) -> Result<(), ReconcileError> {
        let step = action.as_label();
        self.bus.publish(
            Event::new(EventKind::TransitionIssued)
                .with_cluster(id.to_string())
                .with_step(step)
                .with_status(target),
        );
        self.api
            .transition(id, action)
            .await
            .map_err(|source| ReconcileError::Api {
                cluster: id.to_string(),
                step,
                source,
            })?;

        self.await_status(token, id, step, target, self.config.transition_timeout)
            .await
            .map_err(|source| ReconcileError::Convergence {
                cluster: id.to_string(),
                step,
                source,
            })?;
        Ok(())
    }

    /// Polls describe until the cluster reaches `target`.
    ///
    /// Transitional statuses are "not yet"; a stable status other than the
    /// target means the cluster went somewhere unexpected, which no amount of
    /// waiting will fix.
    async fn await_status(
        &self,
        token: &CancellationToken,
        id: &str,
        step: &'static str,
        target: ClusterStatus,
        timeout: std::time::Duration,
    ) -> Result<ObservedCluster, PollError> {
        let api = &self.api;
        self.poller
            .run(token, PollTag::new(id, step), timeout, || async move {
                match api.describe(id).await {
                    Ok(obs) if obs.status == target => Ok(ProbeOutcome::Ready(obs)),
                    Ok(obs) if obs.status.is_transitional() => {
                        Ok(ProbeOutcome::pending(format!("status={}", obs.status)))
                    }
                    Ok(obs) => Err(ProbeError::fatal(format!(
                        "unexpected status {} while waiting for {target}",
                        obs.status
                    ))),
                    Err(err) => Err(ProbeError::from(err)),
                }
            })
            .await
    }

    async fn describe(&self, id: &str) -> Result<ObservedCluster, ReconcileError> {
        self.api
            .describe(id)
            .await
            .map_err(|source| ReconcileError::Api {
                cluster: id.to_string(),
                step: "describe",
                source,
            })
    }

    /// Best-known state after a create-convergence warning: one describe
    /// attempt, falling back to the desired shape still marked `Creating`.
    async fn best_known(&self, id: &str, desired: &DesiredCluster) -> ObservedCluster {
        match self.api.describe(id).await {
            Ok(observed) => observed,
            Err(_) => ObservedCluster {
                id: id.to_string(),
                name: desired.name.clone(),
                labels: desired.labels.clone(),
                status: ClusterStatus::Creating,
                compute: desired.compute.clone(),
                replicas: desired.replicas.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Call, MockPlane};
    use crate::state::{ComputeScaling, DesiredStatus, ReplicaScaling};
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::time::Duration;

    fn reconciler(mock: MockPlane) -> Reconciler<MockPlane> {
        Reconciler::new(Arc::new(mock), ReconcileConfig::default())
    }

    fn running_cluster(id: &str, cu: u32) -> ObservedCluster {
        ObservedCluster {
            id: id.to_string(),
            name: "demo".to_string(),
            labels: BTreeMap::new(),
            status: ClusterStatus::Running,
            compute: ComputeScaling::Fixed { cu_size: cu },
            replicas: ReplicaScaling::Fixed { count: 1 },
        }
    }

    fn desired(cu: u32) -> DesiredCluster {
        DesiredCluster::new("demo", cu)
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_applies_one_mutation_and_converges() {
        let mock = MockPlane::new().settle_after(2);
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);
        let token = CancellationToken::new();

        let report = rec.apply(&token, "clu-1", &desired(2)).await.unwrap();

        assert_eq!(report.observed.status, ClusterStatus::Running);
        assert_eq!(report.observed.compute, ComputeScaling::Fixed { cu_size: 2 });
        assert!(report.warnings.is_empty());

        let mutations = rec.api.mutations();
        assert_eq!(
            mutations,
            vec![Call::Modify {
                id: "clu-1".to_string(),
                delta: ClusterDelta::Resize { cu_size: 2 },
            }],
            "exactly one resize, no replica or transition calls"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cu_and_replica_change_fails_with_zero_mutations() {
        let mock = MockPlane::new();
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);

        let mut want = desired(2);
        want.replicas = ReplicaScaling::Fixed { count: 3 };
        let err = rec
            .apply(&CancellationToken::new(), "clu-1", &want)
            .await
            .unwrap_err();

        assert!(matches!(err, ReconcileError::Validation { .. }));
        assert!(rec.api.mutations().is_empty(), "no mutating calls issued");
    }

    #[tokio::test(start_paused = true)]
    async fn test_suspend_then_resume_roundtrip() {
        let mock = MockPlane::new().settle_after(1);
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);
        let token = CancellationToken::new();

        let mut want = desired(1);
        want.desired_status = DesiredStatus::Suspended;
        let report = rec.apply(&token, "clu-1", &want).await.unwrap();
        assert_eq!(report.observed.status, ClusterStatus::Suspended);

        want.desired_status = DesiredStatus::Running;
        let report = rec.apply(&token, "clu-1", &want).await.unwrap();
        assert_eq!(report.observed.status, ClusterStatus::Running);

        let transitions: Vec<Call> = rec
            .api
            .mutations()
            .into_iter()
            .filter(|c| matches!(c, Call::Transition { .. }))
            .collect();
        assert_eq!(
            transitions,
            vec![
                Call::Transition { id: "clu-1".to_string(), action: StatusAction::Suspend },
                Call::Transition { id: "clu-1".to_string(), action: StatusAction::Resume },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_synchronous_metadata_changes_skip_polling() {
        let mock = MockPlane::new().settle_after(50);
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);

        let mut want = desired(1);
        want.name = "renamed".to_string();
        want.labels.insert("env".to_string(), "prod".to_string());
        let started = tokio::time::Instant::now();
        let report = rec
            .apply(&CancellationToken::new(), "clu-1", &want)
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO, "no convergence waits");
        assert_eq!(report.observed.name, "renamed");
        assert_eq!(rec.api.mutations().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_policy_change_polls_back_to_running() {
        let mock = MockPlane::new().settle_after(3);
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);

        let mut want = desired(1);
        want.compute = ComputeScaling::Autoscaled { min_cu: 1, max_cu: 8 };
        let report = rec
            .apply(&CancellationToken::new(), "clu-1", &want)
            .await
            .unwrap();

        assert_eq!(report.observed.status, ClusterStatus::Running);
        assert_eq!(
            report.observed.compute,
            ComputeScaling::Autoscaled { min_cu: 1, max_cu: 8 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_step_error_aborts_remaining_steps() {
        let mock = MockPlane::new();
        mock.seed(running_cluster("clu-1", 1));
        // Let the initial describe through; fail the resize call.
        mock.inject_fault_after(1, ApiError::business("INVALID_CU_SIZE", "bad size", "req-9"));
        let rec = reconciler(mock);

        let mut want = desired(2);
        want.labels.insert("env".to_string(), "prod".to_string());
        let err = rec
            .apply(&CancellationToken::new(), "clu-1", &want)
            .await
            .unwrap_err();

        match err {
            ReconcileError::Api { cluster, step, .. } => {
                assert_eq!(cluster, "clu-1");
                assert_eq!(step, "resize");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        let label_calls = rec
            .api
            .mutations()
            .into_iter()
            .filter(|c| matches!(c, Call::Modify { delta: ClusterDelta::Labels(_), .. }))
            .count();
        assert_eq!(label_calls, 0, "label change skipped after fatal resize");
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_returns_credentials_and_running_state() {
        let mock = MockPlane::new().settle_after(2);
        let rec = reconciler(mock);

        let report = rec
            .create(&CancellationToken::new(), &desired(1))
            .await
            .unwrap();

        assert_eq!(report.observed.status, ClusterStatus::Running);
        assert!(report.warnings.is_empty());
        let creds = report.credentials.expect("credentials returned once");
        assert_eq!(creds.username, "db_admin");
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_rejects_multi_replica_with_zero_calls() {
        let mock = MockPlane::new();
        let rec = reconciler(mock);

        let mut want = desired(1);
        want.replicas = ReplicaScaling::Fixed { count: 2 };
        let err = rec
            .create(&CancellationToken::new(), &want)
            .await
            .unwrap_err();

        assert!(matches!(err, ReconcileError::Validation { field: "replicas", .. }));
        assert!(rec.api.calls().is_empty(), "validation precedes any API call");
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_timeout_downgraded_to_warning() {
        // 45min timeout at 10s interval is ~270 probes; never settles.
        let mock = MockPlane::new().settle_after(10_000);
        let rec = reconciler(mock);

        let report = rec
            .create(&CancellationToken::new(), &desired(1))
            .await
            .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].step, "create");
        assert_eq!(report.observed.status, ClusterStatus::Creating);
        assert!(report.credentials.is_some(), "identity and credentials kept");
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_transport_give_up_downgraded_to_warning() {
        let mock = MockPlane::new().settle_after(10_000);
        // Let the create call through, then fail 21 consecutive probes (cap 20).
        mock.inject_fault_after(1, ApiError::transport("connection reset"));
        for _ in 0..20 {
            mock.inject_fault(ApiError::transport("connection reset"));
        }
        let rec = reconciler(mock);

        let report = rec
            .create(&CancellationToken::new(), &desired(1))
            .await
            .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("gave up"));
        // Faults exhausted, so the best-known describe succeeds.
        assert_eq!(report.observed.status, ClusterStatus::Creating);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_waits_for_disappearance() {
        let mock = MockPlane::new().settle_after(2);
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);

        rec.delete(&CancellationToken::new(), "clu-1").await.unwrap();

        let drops: Vec<Call> = rec
            .api
            .mutations()
            .into_iter()
            .filter(|c| matches!(c, Call::Drop { .. }))
            .collect();
        assert_eq!(drops.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_converges_on_not_found() {
        // Instant settling removes the record on drop; the first probe sees
        // not-found and treats it as converged.
        let mock = MockPlane::new();
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);

        let started = tokio::time::Instant::now();
        rec.delete(&CancellationToken::new(), "clu-1").await.unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_of_unknown_cluster_is_ok() {
        let mock = MockPlane::new();
        let rec = reconciler(mock);
        rec.delete(&CancellationToken::new(), "clu-missing")
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_events_bracket_the_cycle() {
        let mock = MockPlane::new();
        mock.seed(running_cluster("clu-1", 1));
        let rec = reconciler(mock);
        let mut rx = rec.subscribe();

        rec.apply(&CancellationToken::new(), "clu-1", &desired(1))
            .await
            .unwrap();

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(kinds.first(), Some(&EventKind::ApplyStarted));
        assert_eq!(kinds.last(), Some(&EventKind::ApplyConverged));
    }

    struct Recorder {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.kind);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_fans_out_to_subscribers() {
        let recorder = Arc::new(Recorder { seen: Mutex::new(Vec::new()) });
        let mock = MockPlane::new();
        mock.seed(running_cluster("clu-1", 1));
        let rec =
            reconciler(mock).with_subscribers(vec![recorder.clone() as Arc<dyn Subscribe>]);

        let listener_token = CancellationToken::new();
        let handle = rec.spawn_listener(listener_token.clone());

        rec.apply(&CancellationToken::new(), "clu-1", &desired(1))
            .await
            .unwrap();

        // Let the listener drain the bus before stopping it.
        tokio::time::sleep(Duration::from_millis(10)).await;
        listener_token.cancel();
        handle.await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert!(seen.contains(&EventKind::ApplyStarted));
        assert!(seen.contains(&EventKind::ApplyConverged));
    }
}
