//! Party domain errors
//!
//! Business-rule failures are not listed here: a constraint violation is a
//! value in the validation result, never an error.

use core_kernel::{CoreError, PartyId, TenantId};
use domain_reference::ReferenceError;
use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// No party with this id exists for the tenant
    #[error("Party not found: {id} (tenant {tenant})")]
    PartyNotFound { tenant: TenantId, id: PartyId },

    /// Attempted to create a party that already exists
    #[error("Duplicate party: {0}")]
    DuplicateParty(PartyId),

    /// Invalid party data provided
    #[error("Invalid party data: {0}")]
    InvalidData(String),

    /// Party state could not be serialized for the snapshot log
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A reference data failure (unsupported locale, unavailable source)
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The party store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PartyError {
    pub fn not_found(tenant: &TenantId, id: PartyId) -> Self {
        PartyError::PartyNotFound {
            tenant: tenant.clone(),
            id,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        PartyError::StoreUnavailable(message.into())
    }
}

impl From<PartyError> for CoreError {
    fn from(err: PartyError) -> Self {
        match err {
            PartyError::PartyNotFound { .. } => CoreError::not_found(err.to_string()),
            PartyError::DuplicateParty(_) | PartyError::InvalidData(_) => {
                CoreError::invalid_argument(err.to_string())
            }
            PartyError::Serialization(_) | PartyError::StoreUnavailable(_) => {
                CoreError::service_unavailable(err.to_string())
            }
            PartyError::Reference(inner) => inner.into(),
        }
    }
}
