//! Core Kernel - Foundational types and utilities for the party master-data system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Typed attribute values with precision-preserving decimal semantics
//! - Tenancy scoping for global versus tenant-owned reference rows
//! - Locale identifiers and the module-wide defaults
//! - Common identifiers and value objects

pub mod error;
pub mod identifiers;
pub mod locale;
pub mod temporal;
pub mod tenancy;
pub mod units;
pub mod value;

pub use error::CoreError;
pub use identifiers::{AssociationId, MandateId, PartyId, SnapshotId};
pub use locale::{LocaleId, DEFAULT_LOCALE};
pub use temporal::{TemporalError, ValidPeriod};
pub use tenancy::{Scope, TenantId};
pub use units::{UnitOfMeasure, UnitType};
pub use value::{PartyKind, TypedValue, ValueType};
