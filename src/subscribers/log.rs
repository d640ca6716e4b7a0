//! # LogWriter — simple event printer.
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [apply-started] cluster="clu-1"
//! [mutation] cluster="clu-1" step="resize"
//! [wait-started] cluster="clu-1" step="resize" timeout_ms=1800000
//! [wait-pending] cluster="clu-1" step="resize" attempt=3 reason="status=modifying"
//! [wait-converged] cluster="clu-1" step="resize"
//! [apply-converged] cluster="clu-1" status=running
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::WaitStarted => {
                println!(
                    "[wait-started] cluster={:?} step={:?} timeout_ms={:?}",
                    e.cluster, e.step, e.timeout_ms
                );
            }
            EventKind::WaitPending => {
                println!(
                    "[wait-pending] cluster={:?} step={:?} attempt={:?} reason={:?}",
                    e.cluster, e.step, e.attempt, e.reason
                );
            }
            EventKind::WaitTransient => {
                println!(
                    "[wait-transient] cluster={:?} step={:?} attempt={:?} reason={:?}",
                    e.cluster, e.step, e.attempt, e.reason
                );
            }
            EventKind::WaitConverged => {
                println!("[wait-converged] cluster={:?} step={:?}", e.cluster, e.step);
            }
            EventKind::WaitFailed => {
                println!(
                    "[wait-failed] cluster={:?} step={:?} reason={:?}",
                    e.cluster, e.step, e.reason
                );
            }
            EventKind::WaitTimedOut => {
                println!(
                    "[wait-timed-out] cluster={:?} step={:?} reason={:?}",
                    e.cluster, e.step, e.reason
                );
            }
            EventKind::WaitGaveUp => {
                println!(
                    "[wait-gave-up] cluster={:?} step={:?} failures={:?} reason={:?}",
                    e.cluster, e.step, e.attempt, e.reason
                );
            }
            EventKind::WaitCanceled => {
                println!("[wait-canceled] cluster={:?} step={:?}", e.cluster, e.step);
            }
            EventKind::ApplyStarted => {
                println!("[apply-started] cluster={:?}", e.cluster);
            }
            EventKind::CreateIssued => {
                println!("[create] cluster={:?}", e.cluster);
            }
            EventKind::MutationIssued => {
                println!("[mutation] cluster={:?} step={:?}", e.cluster, e.step);
            }
            EventKind::TransitionIssued => {
                println!(
                    "[transition] cluster={:?} action={:?} target={:?}",
                    e.cluster, e.step, e.status
                );
            }
            EventKind::ApplyWarning => {
                println!(
                    "[apply-warning] cluster={:?} step={:?} reason={:?}",
                    e.cluster, e.step, e.reason
                );
            }
            EventKind::ApplyConverged => {
                println!("[apply-converged] cluster={:?} status={:?}", e.cluster, e.status);
            }
            EventKind::DropIssued => {
                println!("[drop] cluster={:?}", e.cluster);
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
