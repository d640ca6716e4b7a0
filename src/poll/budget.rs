//! # Consecutive transient-failure budget for one poll run.
//!
//! A long wait (cluster create runs ~45 minutes) must tolerate network blips
//! without aborting, but a control plane that stops answering entirely should not
//! burn the whole timeout. [`TransientBudget`] caps *consecutive* transient
//! failures: any successful probe invocation — converged or merely pending —
//! resets the count.

/// Tracks consecutive transient failures within one poll run.
///
/// The budget allows exactly `cap` consecutive failures; recording one more
/// reports exhaustion. A fresh budget is created per poll run; it is never shared
/// across resources.
#[derive(Debug)]
pub struct TransientBudget {
    cap: u32,
    consecutive: u32,
    last: Option<String>,
}

impl TransientBudget {
    /// Creates a budget allowing `cap` consecutive transient failures.
    pub fn new(cap: u32) -> Self {
        Self {
            cap,
            consecutive: 0,
            last: None,
        }
    }

    /// Records one transient failure.
    ///
    /// Returns `true` while the run is still within budget, `false` once the cap
    /// is exceeded and the run should give up.
    pub fn record(&mut self, reason: impl Into<String>) -> bool {
        self.consecutive += 1;
        self.last = Some(reason.into());
        self.consecutive <= self.cap
    }

    /// Resets the consecutive count after a successful probe invocation.
    pub fn reset(&mut self) {
        self.consecutive = 0;
    }

    /// Number of consecutive transient failures recorded since the last reset.
    pub fn failures(&self) -> u32 {
        self.consecutive
    }

    /// The most recent transient failure reason, if any.
    pub fn last_reason(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_exactly_cap_failures() {
        let mut budget = TransientBudget::new(3);
        assert!(budget.record("a"));
        assert!(budget.record("b"));
        assert!(budget.record("c"));
        assert!(!budget.record("d"));
        assert_eq!(budget.failures(), 4);
        assert_eq!(budget.last_reason(), Some("d"));
    }

    #[test]
    fn test_reset_restores_full_budget() {
        let mut budget = TransientBudget::new(2);
        assert!(budget.record("a"));
        assert!(budget.record("b"));
        budget.reset();
        assert_eq!(budget.failures(), 0);
        assert!(budget.record("c"));
        assert!(budget.record("d"));
        assert!(!budget.record("e"));
    }

    #[test]
    fn test_zero_cap_exhausts_on_first_failure() {
        let mut budget = TransientBudget::new(0);
        assert!(!budget.record("a"));
    }
}
