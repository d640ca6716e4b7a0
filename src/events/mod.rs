//! Runtime events published by the poll engine and the reconciler.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
