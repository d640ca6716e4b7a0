//! # Injected record store for the mock control plane.
//!
//! The mock's state lives behind the [`Store`] capability (get/set/delete)
//! instead of process-wide maps, so each test owns an isolated store and
//! parallel tests cannot observe each other's clusters.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::state::{ClusterStatus, ObservedCluster};

/// One cluster as the mock control plane tracks it.
///
/// `settle_in` counts describes that still see the in-flight status; once it
/// reaches zero the record flips to `settle_to`. This is how the mock simulates
/// long-running provisioning without real time passing.
#[derive(Debug, Clone)]
pub struct ClusterRecord {
    /// Current snapshot returned by describe.
    pub cluster: ObservedCluster,
    /// Describes remaining before the pending transition settles.
    pub settle_in: u32,
    /// Status the record settles to, if a transition is in flight.
    pub settle_to: Option<ClusterStatus>,
}

impl ClusterRecord {
    /// A settled record with no transition in flight.
    pub fn settled(cluster: ObservedCluster) -> Self {
        Self {
            cluster,
            settle_in: 0,
            settle_to: None,
        }
    }
}

/// Record store capability for the mock control plane.
pub trait Store: Send + Sync + 'static {
    /// Returns the record for `id`, if present.
    fn get(&self, id: &str) -> Option<ClusterRecord>;

    /// Inserts or replaces the record for `id`.
    fn set(&self, id: &str, record: ClusterRecord);

    /// Removes the record for `id`, if present.
    fn delete(&self, id: &str);
}

/// In-memory [`Store`] backed by a `RwLock<HashMap>`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, ClusterRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, id: &str) -> Option<ClusterRecord> {
        self.inner.read().unwrap().get(id).cloned()
    }

    fn set(&self, id: &str, record: ClusterRecord) {
        self.inner.write().unwrap().insert(id.to_string(), record);
    }

    fn delete(&self, id: &str) {
        self.inner.write().unwrap().remove(id);
    }
}
