//! Control-plane API gateway boundary.
//!
//! The reconciler talks to the control plane exclusively through the
//! [`ControlPlane`] trait: one synchronous call per method, structured errors,
//! no retry logic of its own. Production implementations own the HTTP transport
//! and live outside this crate; [`MockPlane`] is the in-crate test double, backed
//! by an injected [`Store`] capability instead of process-wide globals.

mod client;
mod mock;
mod store;

pub use client::{
    ClusterDelta, ControlPlane, CreateCluster, CreatedCluster, CODE_CLUSTER_NOT_FOUND,
};
pub use mock::{Call, MockPlane};
pub use store::{ClusterRecord, MemoryStore, Store};
