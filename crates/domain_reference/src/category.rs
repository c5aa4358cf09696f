//! Reference data categories
//!
//! The closed set of code lists the system knows about. Category names
//! arrive as strings on the service boundary and are parsed up front;
//! unknown names fail before any table lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReferenceError;

/// A reference data category (one code list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceCategory {
    AttributeTypes,
    PreferenceTypes,
    ContactMechanismTypes,
    ContactMechanismRoles,
    PhysicalAddressTypes,
    IdentificationTypes,
    MaritalStatuses,
    Genders,
    RoleTypes,
    StatusTypes,
    LockTypes,
    TaxNumberTypes,
    ConsentTypes,
    SegmentTypes,
    AssociationTypes,
    MandateTypes,
}

impl ReferenceCategory {
    /// Returns the wire code for this category
    pub fn code(&self) -> &'static str {
        match self {
            ReferenceCategory::AttributeTypes => "attribute_types",
            ReferenceCategory::PreferenceTypes => "preference_types",
            ReferenceCategory::ContactMechanismTypes => "contact_mechanism_types",
            ReferenceCategory::ContactMechanismRoles => "contact_mechanism_roles",
            ReferenceCategory::PhysicalAddressTypes => "physical_address_types",
            ReferenceCategory::IdentificationTypes => "identification_types",
            ReferenceCategory::MaritalStatuses => "marital_statuses",
            ReferenceCategory::Genders => "genders",
            ReferenceCategory::RoleTypes => "role_types",
            ReferenceCategory::StatusTypes => "status_types",
            ReferenceCategory::LockTypes => "lock_types",
            ReferenceCategory::TaxNumberTypes => "tax_number_types",
            ReferenceCategory::ConsentTypes => "consent_types",
            ReferenceCategory::SegmentTypes => "segment_types",
            ReferenceCategory::AssociationTypes => "association_types",
            ReferenceCategory::MandateTypes => "mandate_types",
        }
    }

    /// Every category, in a stable order
    pub fn all() -> &'static [ReferenceCategory] {
        &[
            ReferenceCategory::AttributeTypes,
            ReferenceCategory::PreferenceTypes,
            ReferenceCategory::ContactMechanismTypes,
            ReferenceCategory::ContactMechanismRoles,
            ReferenceCategory::PhysicalAddressTypes,
            ReferenceCategory::IdentificationTypes,
            ReferenceCategory::MaritalStatuses,
            ReferenceCategory::Genders,
            ReferenceCategory::RoleTypes,
            ReferenceCategory::StatusTypes,
            ReferenceCategory::LockTypes,
            ReferenceCategory::TaxNumberTypes,
            ReferenceCategory::ConsentTypes,
            ReferenceCategory::SegmentTypes,
            ReferenceCategory::AssociationTypes,
            ReferenceCategory::MandateTypes,
        ]
    }
}

impl fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ReferenceCategory {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceCategory::all()
            .iter()
            .find(|category| category.code() == s)
            .copied()
            .ok_or_else(|| ReferenceError::UnknownCategory(s.to_string()))
    }
}
