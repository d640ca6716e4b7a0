//! # Core subscriber trait.
//!
//! `Subscribe` is the extension point for plugging custom event handlers into the
//! reconciler — audit trails, metrics, progress reporting back to the host
//! orchestrator.
//!
//! ## Contract
//! - Subscribers are driven by the reconciler's listener task
//!   ([`Reconciler::spawn_listener`](crate::Reconciler::spawn_listener)), one
//!   event at a time, in bus order.
//! - A slow subscriber delays later events for *all* subscribers of that
//!   listener; if the bus ring buffer overflows meanwhile, the listener skips the
//!   lagged events and continues.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Implementations should avoid blocking the async runtime (prefer async I/O and
/// cooperative waits).
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
