//! Reference domain errors

use core_kernel::CoreError;
use thiserror::Error;

/// Errors that can occur in the reference data domain
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The locale is well-formed but no supported locale can serve it
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// A category name did not match any known reference category
    #[error("Unknown reference category: {0}")]
    UnknownCategory(String),

    /// The backing source could not deliver the reference tables
    #[error("Reference source unavailable: {0}")]
    SourceUnavailable(String),

    /// A kernel-level failure (malformed locale, malformed value)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ReferenceError {
    pub fn unsupported_locale(locale: impl Into<String>) -> Self {
        ReferenceError::UnsupportedLocale(locale.into())
    }

    pub fn source_unavailable(message: impl Into<String>) -> Self {
        ReferenceError::SourceUnavailable(message.into())
    }
}

impl From<ReferenceError> for CoreError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::UnsupportedLocale(locale) => {
                CoreError::invalid_argument(format!("unsupported locale: {}", locale))
            }
            ReferenceError::UnknownCategory(name) => {
                CoreError::invalid_argument(format!("unknown reference category: {}", name))
            }
            ReferenceError::SourceUnavailable(message) => CoreError::service_unavailable(message),
            ReferenceError::Core(inner) => inner,
        }
    }
}
