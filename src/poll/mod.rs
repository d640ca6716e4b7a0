//! Generic poll-until-condition engine with timeout, cancellation, and retry
//! classification.
//!
//! The [`Poller`] drives a probe closure on a fixed interval until it converges,
//! fails fatally, exhausts the transient-failure budget, times out, or is
//! cancelled. Probes self-classify their failures: a
//! [`ProbeOutcome::Pending`](crate::poll::ProbeOutcome) is retried until the
//! deadline, a [`ProbeError::Transient`] counts against the consecutive-failure
//! cap, and a [`ProbeError::Fatal`] aborts immediately.

mod budget;
mod engine;
mod probe;

pub use budget::TransientBudget;
pub use engine::{PollError, PollTag, Poller};
pub use probe::{ProbeError, ProbeOutcome};
