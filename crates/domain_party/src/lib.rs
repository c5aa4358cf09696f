//! Party Management Domain
//!
//! This crate manages master data about parties: natural persons and
//! organizations, their typed attributes, contact mechanisms, addresses,
//! identifications, roles, and the associations and mandates between them.
//!
//! # Party model
//!
//! A party is either a person or an organization. Both share the same
//! collection set (attributes, preferences, roles, …); the concrete kind
//! adds its own fields. The aggregate is a sum type resolved by pattern
//! matching, so "is-a party" queries stay cheap and there is no
//! inheritance hierarchy to walk.
//!
//! # Validation
//!
//! [`ValidationEngine`] checks a party against the reference data and the
//! role-driven constraint tables in three phases (structural shape, typed
//! value integrity, role constraints), accumulating every violation into a
//! set keyed by field path and violation kind. A party that fails
//! validation is a normal value; the caller decides what to do with it.

pub mod address;
pub mod association;
pub mod attribute;
pub mod contact;
pub mod error;
pub mod identification;
pub mod party;
pub mod ports;
pub mod preference;
pub mod role;
pub mod service;
pub mod validation;

pub use address::PhysicalAddress;
pub use association::{Association, Mandate};
pub use attribute::{Attribute, Property};
pub use contact::ContactMechanism;
pub use error::PartyError;
pub use identification::{Identification, TaxNumber};
pub use party::{Organization, Party, PartyCommon, Person};
pub use ports::{
    EntityType, PartyStore, SnapshotLog, SnapshotPage, SnapshotQuery, SnapshotRecord,
    SortDirection,
};
pub use preference::{Consent, ExternalReference, Preference, SegmentAllocation};
pub use role::{PartyLock, PartyRole, PartyStatus};
pub use service::PartyService;
pub use validation::{ValidationContext, ValidationEngine, Violation, ViolationKind};
