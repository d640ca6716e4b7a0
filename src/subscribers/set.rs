//! # Subscriber fan-out.
//!
//! [`SubscriberSet`] holds the registered subscribers and delivers each event to
//! all of them in registration order. Delivery is sequential and awaited: an
//! apply cycle is a single thread of control, and event volume is a handful per
//! mutation, so per-subscriber queues would buy nothing here.

use std::sync::Arc;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Ordered collection of subscribers sharing one event stream.
#[derive(Clone, Default)]
pub struct SubscriberSet {
    subs: Arc<[Arc<dyn Subscribe>]>,
}

impl SubscriberSet {
    /// Builds a set from the given subscribers.
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs: subs.into() }
    }

    /// `true` when no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// Delivers one event to every subscriber, in registration order.
    pub async fn emit(&self, event: &Event) {
        for sub in self.subs.iter() {
            sub.on_event(event).await;
        }
    }
}
