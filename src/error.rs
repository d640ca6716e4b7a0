//! Error types shared across the control-plane client boundary.
//!
//! This module defines [`ApiError`], the error type returned by every
//! [`ControlPlane`](crate::api::ControlPlane) call. It is the raw material the
//! retry classifier works with: transport failures are retryable (up to a cap),
//! structured business errors are always fatal.
//!
//! Step-level errors produced by the reconciler itself live in
//! [`ReconcileError`](crate::reconcile::ReconcileError); terminal poll results in
//! [`PollError`](crate::poll::PollError).

use thiserror::Error;

/// # Errors returned by the control-plane API.
///
/// Every gateway call fails in exactly one of two ways:
///
/// - [`ApiError::Business`] — the control plane processed the request and
///   rejected it with a stable error code. Retrying will not change the answer.
/// - [`ApiError::Transport`] — the request never produced a control-plane
///   answer (connection reset, DNS failure, gateway timeout). Retrying may
///   succeed.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Structured business error with a stable code; never retryable.
    #[error("control plane rejected request: {code}: {message} (request id {request_id})")]
    Business {
        /// Stable, machine-readable error code.
        code: String,
        /// Human-readable message from the control plane.
        message: String,
        /// Request id for support correlation.
        request_id: String,
    },

    /// Network-level failure; the request may not have reached the control plane.
    #[error("transport failure: {message}")]
    Transport {
        /// Underlying transport error message.
        message: String,
    },
}

impl ApiError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use clustervisor::ApiError;
    ///
    /// let err = ApiError::Transport { message: "connection reset".into() };
    /// assert_eq!(err.as_label(), "api_transport");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ApiError::Business { .. } => "api_business",
            ApiError::Transport { .. } => "api_transport",
        }
    }

    /// `true` for transport failures, which the classifier treats as retryable.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }

    /// Returns the business error code, if this is a business error.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Business { code, .. } => Some(code),
            ApiError::Transport { .. } => None,
        }
    }

    /// Shorthand constructor for a business error.
    pub fn business(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        ApiError::Business {
            code: code.into(),
            message: message.into(),
            request_id: request_id.into(),
        }
    }

    /// Shorthand constructor for a transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
        }
    }
}
