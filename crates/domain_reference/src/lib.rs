//! Reference Data Domain
//!
//! This crate manages the look-up ("reference") data that party attributes
//! are validated and rendered against: code lists such as marital statuses,
//! identification types, or role types, defined globally and extended per
//! tenant, localized per language.
//!
//! # Overlay model
//!
//! Every reference row is either a global default or an addition owned by
//! one tenant. The effective list for a tenant is always the global set plus
//! that tenant's rows; an overlay adds entries, it never removes or replaces
//! global ones.
//!
//! # Constraints
//!
//! Business rules are data: constraint rows keyed by role type (and, for
//! associations and mandates, by their own type codes) describe what an
//! attribute or preference of a party holding that role must look like. The
//! [`ConstraintEngine`] is a small interpreter over the closed set of
//! constraint kinds.
//!
//! # Concurrency
//!
//! All loaded tables live in an immutable [`ReferenceSnapshot`] behind an
//! atomically swappable handle. Readers take the current snapshot once per
//! call and never observe a half-reloaded table set.

pub mod category;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod item;
pub mod resolver;
pub mod store;

pub use category::ReferenceCategory;
pub use constraint::{
    AssociationPropertyConstraint, AttributeConstraint, ConstraintKind, ConstraintRule,
    MandatePropertyConstraint, PreferenceConstraint,
};
pub use engine::{ConstraintEngine, ConstraintOutcome, EvaluationContext};
pub use error::ReferenceError;
pub use item::{AddressField, ItemDetail, ReferenceItem};
pub use resolver::OverlayResolver;
pub use store::{ReferenceDataSet, ReferenceSnapshot, ReferenceSource, ReferenceStore};
