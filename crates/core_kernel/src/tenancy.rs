//! Tenancy scoping
//!
//! Reference rows are either global defaults or additions owned by exactly
//! one tenant. The owning side is an explicit enum rather than a nullable
//! identifier, so the overlay rule (global ∪ tenant rows) is checkable by
//! the type system and a "null tenant" can never be confused with a real
//! one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque tenant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TenantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TenantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Ownership scope of a reference row
///
/// Global rows form the default set every tenant sees; tenant rows are
/// additions layered on top for that tenant only. A row belongs to at most
/// one tenant by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<TenantId>", into = "Option<TenantId>")]
pub enum Scope {
    Global,
    Tenant(TenantId),
}

impl Scope {
    /// Convenience constructor for a tenant-owned scope
    pub fn tenant(id: impl Into<TenantId>) -> Self {
        Scope::Tenant(id.into())
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }

    /// Returns the owning tenant, if any
    pub fn owner(&self) -> Option<&TenantId> {
        match self {
            Scope::Global => None,
            Scope::Tenant(id) => Some(id),
        }
    }

    /// Whether a row with this scope is part of the effective set for the
    /// requested tenant
    ///
    /// Global rows are visible to every caller, including callers with no
    /// tenant at all; tenant rows are visible only to their owner.
    pub fn is_visible_to(&self, requested: Option<&TenantId>) -> bool {
        match self {
            Scope::Global => true,
            Scope::Tenant(owner) => requested == Some(owner),
        }
    }
}

impl From<Option<TenantId>> for Scope {
    fn from(tenant: Option<TenantId>) -> Self {
        match tenant {
            None => Scope::Global,
            Some(id) => Scope::Tenant(id),
        }
    }
}

impl From<Scope> for Option<TenantId> {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Global => None,
            Scope::Tenant(id) => Some(id),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Tenant(id) => write!(f, "tenant:{}", id),
        }
    }
}
