//! # Probe results and failure classification.
//!
//! A probe is one stateless, synchronous convergence check. It reports one of
//! three things:
//!
//! - [`ProbeOutcome::Ready`] — converged, carry the value out of the poll run.
//! - [`ProbeOutcome::Pending`] — the API answered but the resource has not
//!   converged yet ("still provisioning"). Retried until the poll deadline, with
//!   no cap.
//! - [`ProbeError`] — the check itself failed; the probe classifies the failure
//!   as [`ProbeError::Transient`] (network blip, retry against the cap) or
//!   [`ProbeError::Fatal`] (business error, abort immediately).
//!
//! The [`From<ApiError>`](ProbeError::from) impl is the default classifier:
//! transport failures are transient, structured business errors are fatal. A
//! probe may override it for domain cases — e.g. a delete probe treats a
//! not-found business code as [`ProbeOutcome::Ready`].

use thiserror::Error;

use crate::error::ApiError;

/// Successful result of one probe invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome<T> {
    /// Converged; the poll run returns this value.
    Ready(T),
    /// API answered, but the resource has not converged yet.
    Pending {
        /// Human-readable "why not yet" (e.g. `"status=creating"`).
        reason: String,
    },
}

impl<T> ProbeOutcome<T> {
    /// Shorthand for a pending outcome.
    pub fn pending(reason: impl Into<String>) -> Self {
        ProbeOutcome::Pending {
            reason: reason.into(),
        }
    }
}

/// # Failure of one probe invocation, self-classified.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Transient failure; retryable up to the consecutive-failure cap.
    #[error("transient failure: {error}")]
    Transient {
        /// Underlying failure message.
        error: String,
    },

    /// Non-recoverable failure; aborts the poll run immediately.
    #[error("fatal failure: {error}")]
    Fatal {
        /// Underlying failure message.
        error: String,
    },
}

impl ProbeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ProbeError::Transient { .. } => "probe_transient",
            ProbeError::Fatal { .. } => "probe_fatal",
        }
    }

    /// Indicates whether the error type is safe to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProbeError::Transient { .. })
    }

    /// Shorthand constructor for a transient failure.
    pub fn transient(error: impl Into<String>) -> Self {
        ProbeError::Transient {
            error: error.into(),
        }
    }

    /// Shorthand constructor for a fatal failure.
    pub fn fatal(error: impl Into<String>) -> Self {
        ProbeError::Fatal {
            error: error.into(),
        }
    }
}

impl From<ApiError> for ProbeError {
    /// Default retry classification for control-plane errors.
    ///
    /// Transport failures may succeed on retry; business errors carry a stable
    /// code and will not change their answer.
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport { .. } => ProbeError::Transient {
                error: err.to_string(),
            },
            ApiError::Business { .. } => ProbeError::Fatal {
                error: err.to_string(),
            },
        }
    }
}
