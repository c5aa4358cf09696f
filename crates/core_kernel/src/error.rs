//! Core error types used across the system
//!
//! Three error kinds cover every failure the core surfaces to callers:
//! malformed input, a missing addressed entity, and an unavailable backing
//! store. Business-rule failures are never errors; they accumulate into
//! violation sets returned from validation.

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed or out-of-domain caller input, detected before any lookup
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation addressed a specific entity that does not exist for the
    /// given tenant; reference lookups return empty lists instead
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backing store could not be loaded or queried; always retryable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl CoreError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CoreError::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        CoreError::ServiceUnavailable(message.into())
    }

    /// Whether retrying the same call can succeed without caller changes
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::ServiceUnavailable(_))
    }
}
