//! # MockPlane: in-process control-plane test double.
//!
//! Implements [`ControlPlane`] over an injected [`Store`], with two test hooks:
//!
//! - **Call log**: every call is recorded as a [`Call`], so tests can assert
//!   exactly which mutations an apply cycle issued (and which it did not).
//! - **Fault injection**: queued [`ApiError`]s are returned by the next calls,
//!   one each, before any real behavior runs.
//!
//! Asynchronous work is simulated by *describe-count settling*: a mutation puts
//! the record into a transitional status for `settle_after` describes, then it
//! flips to the target status. No wall-clock time is involved, which keeps poll
//! tests deterministic under tokio's paused clock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{
    ClusterDelta, ClusterRecord, ControlPlane, CreateCluster, CreatedCluster, MemoryStore, Store,
    CODE_CLUSTER_NOT_FOUND,
};
use crate::error::ApiError;
use crate::state::{ClusterCredentials, ClusterStatus, ObservedCluster, StatusAction};

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// A create call with the requested name.
    Create {
        /// Requested cluster name.
        name: String,
    },
    /// A describe call.
    Describe {
        /// Cluster id.
        id: String,
    },
    /// A modify call with the full delta.
    Modify {
        /// Cluster id.
        id: String,
        /// The mutation that was requested.
        delta: ClusterDelta,
    },
    /// A drop call.
    Drop {
        /// Cluster id.
        id: String,
    },
    /// A transition call.
    Transition {
        /// Cluster id.
        id: String,
        /// Requested action.
        action: StatusAction,
    },
}

/// Mock control plane over an injected [`Store`].
pub struct MockPlane {
    store: Arc<dyn Store>,
    settle_after: u32,
    next_id: AtomicU32,
    calls: Mutex<Vec<Call>>,
    faults: Mutex<VecDeque<(u32, ApiError)>>,
}

impl MockPlane {
    /// Mock with a private in-memory store and instant settling.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Mock over a caller-provided store.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            settle_after: 0,
            next_id: AtomicU32::new(1),
            calls: Mutex::new(Vec::new()),
            faults: Mutex::new(VecDeque::new()),
        }
    }

    /// Sets how many describes still see a transitional status before it
    /// settles.
    pub fn settle_after(mut self, describes: u32) -> Self {
        self.settle_after = describes;
        self
    }

    /// Handle to the underlying store, for direct test manipulation.
    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    /// Seeds a settled cluster record, bypassing create.
    pub fn seed(&self, cluster: ObservedCluster) {
        let id = cluster.id.clone();
        self.store.set(&id, ClusterRecord::settled(cluster));
    }

    /// Queues an error to be returned by the next call (FIFO, one per call).
    pub fn inject_fault(&self, err: ApiError) {
        self.faults.lock().unwrap().push_back((0, err));
    }

    /// Queues an error that lets `skip` further calls through first, then fires
    /// on the one after. Later queued faults fire on subsequent calls.
    pub fn inject_fault_after(&self, skip: u32, err: ApiError) {
        self.faults.lock().unwrap().push_back((skip, err));
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded mutating calls only (describes filtered out).
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Describe { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_fault(&self) -> Option<ApiError> {
        let mut faults = self.faults.lock().unwrap();
        match faults.front_mut() {
            Some((0, _)) => faults.pop_front().map(|(_, err)| err),
            Some((skip, _)) => {
                *skip -= 1;
                None
            }
            None => None,
        }
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::business(
            CODE_CLUSTER_NOT_FOUND,
            format!("cluster {id} not found"),
            "req-mock",
        )
    }

    fn fetch(&self, id: &str) -> Result<ClusterRecord, ApiError> {
        self.store.get(id).ok_or_else(|| Self::not_found(id))
    }
}

impl Default for MockPlane {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ControlPlane for MockPlane {
    async fn create(&self, params: &CreateCluster) -> Result<CreatedCluster, ApiError> {
        self.record(Call::Create {
            name: params.name.clone(),
        });
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let id = format!("clu-{}", self.next_id.fetch_add(1, AtomicOrdering::Relaxed));
        let cluster = ObservedCluster {
            id: id.clone(),
            name: params.name.clone(),
            labels: params.labels.clone(),
            status: ClusterStatus::Creating,
            compute: crate::state::ComputeScaling::Fixed {
                cu_size: params.cu_size,
            },
            replicas: crate::state::ReplicaScaling::Fixed {
                count: params.replicas,
            },
        };
        self.store.set(
            &id,
            ClusterRecord {
                cluster,
                settle_in: self.settle_after,
                settle_to: Some(ClusterStatus::Running),
            },
        );
        Ok(CreatedCluster {
            id: id.clone(),
            credentials: ClusterCredentials {
                username: "db_admin".to_string(),
                password: format!("pw-{id}"),
            },
        })
    }

    async fn describe(&self, id: &str) -> Result<ObservedCluster, ApiError> {
        self.record(Call::Describe { id: id.to_string() });
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let mut record = self.fetch(id)?;
        if record.settle_in > 0 {
            record.settle_in -= 1;
            self.store.set(id, record.clone());
        } else if let Some(to) = record.settle_to.take() {
            record.cluster.status = to;
            self.store.set(id, record.clone());
        }
        Ok(record.cluster)
    }

    async fn modify(&self, id: &str, delta: &ClusterDelta) -> Result<(), ApiError> {
        self.record(Call::Modify {
            id: id.to_string(),
            delta: delta.clone(),
        });
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let mut record = self.fetch(id)?;
        match delta {
            ClusterDelta::Resize { cu_size } => {
                record.cluster.compute = crate::state::ComputeScaling::Fixed { cu_size: *cu_size };
            }
            ClusterDelta::Replicas { count } => {
                record.cluster.replicas = crate::state::ReplicaScaling::Fixed { count: *count };
            }
            ClusterDelta::Labels(labels) => {
                record.cluster.labels = labels.clone();
            }
            ClusterDelta::Rename { name } => {
                record.cluster.name = name.clone();
            }
            ClusterDelta::ComputePolicy(policy) => {
                record.cluster.compute = policy.clone();
            }
            ClusterDelta::ReplicaPolicy(policy) => {
                record.cluster.replicas = policy.clone();
            }
        }
        if delta.is_async() {
            record.cluster.status = ClusterStatus::Modifying;
            record.settle_in = self.settle_after;
            record.settle_to = Some(ClusterStatus::Running);
        }
        self.store.set(id, record);
        Ok(())
    }

    async fn drop(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Drop { id: id.to_string() });
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let mut record = self.fetch(id)?;
        if self.settle_after == 0 {
            self.store.delete(id);
        } else {
            record.settle_in = self.settle_after;
            record.settle_to = Some(ClusterStatus::Deleted);
            self.store.set(id, record);
        }
        Ok(())
    }

    async fn transition(&self, id: &str, action: StatusAction) -> Result<(), ApiError> {
        self.record(Call::Transition {
            id: id.to_string(),
            action,
        });
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let mut record = self.fetch(id)?;
        let (via, target) = match action {
            StatusAction::Suspend => (ClusterStatus::Suspending, ClusterStatus::Suspended),
            StatusAction::Resume => (ClusterStatus::Resuming, ClusterStatus::Running),
            StatusAction::None => {
                return Err(ApiError::business(
                    "INVALID_TRANSITION",
                    "no transition requested",
                    "req-mock",
                ))
            }
        };
        record.cluster.status = via;
        record.settle_in = self.settle_after;
        record.settle_to = Some(target);
        self.store.set(id, record);
        Ok(())
    }
}
