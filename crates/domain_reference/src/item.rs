//! Reference items
//!
//! One [`ReferenceItem`] describes a single entry of one code list for one
//! locale: a marital status, an identification type, a role type. Identity
//! is `(category, code, locale, scope)`, so the same code can exist globally
//! and again as a tenant-owned row, and in several locales, without
//! ambiguity.
//!
//! Items are loaded once per snapshot and never mutated; reference-data
//! administration happens outside this system.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use core_kernel::{LocaleId, PartyKind, Scope, UnitType, ValueType};

use crate::category::ReferenceCategory;

/// A field of a physical address
///
/// Address-type reference rows declare which of these are required and which
/// are allowed for addresses of that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    StreetName,
    HouseNumber,
    PoBox,
    City,
    StateOrProvince,
    PostalCode,
    Country,
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressField::StreetName => "street_name",
            AddressField::HouseNumber => "house_number",
            AddressField::PoBox => "po_box",
            AddressField::City => "city",
            AddressField::StateOrProvince => "state_or_province",
            AddressField::PostalCode => "postal_code",
            AddressField::Country => "country",
        };
        write!(f, "{}", name)
    }
}

/// Category-specific payload of a reference item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDetail {
    /// No extra fields beyond the common ones
    None,
    /// An attribute type declares the representation of its values and,
    /// for quantitative attributes, the kind of unit they carry
    AttributeType {
        value_type: ValueType,
        unit_type: Option<UnitType>,
    },
    /// A preference type declares the representation of its values
    PreferenceType { value_type: ValueType },
    /// An identification type may be bound to an issuing country
    IdentificationType { country_of_issue: Option<String> },
    /// A contact mechanism role applies to one mechanism type (the
    /// secondary key used by role-for-mechanism validity checks)
    ContactMechanismRole { mechanism_type: String },
    /// An address type declares the shape of addresses carrying it
    PhysicalAddressType {
        required_fields: BTreeSet<AddressField>,
        allowed_fields: BTreeSet<AddressField>,
    },
}

impl Default for ItemDetail {
    fn default() -> Self {
        ItemDetail::None
    }
}

/// One reference data entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItem {
    /// The code list this entry belongs to
    pub category: ReferenceCategory,
    /// The entry's code, unique within (category, locale, scope)
    pub code: String,
    /// The locale this row is localized for
    pub locale: LocaleId,
    /// Global default or tenant-owned addition
    pub scope: Scope,
    /// Position in picker lists; rows without one sort after rows with one
    pub sort_index: Option<u32>,
    /// Localized display name
    pub name: String,
    /// Localized long description
    pub description: Option<String>,
    /// Party kinds this entry applies to; empty means all
    #[serde(default)]
    pub applicable_party_kinds: BTreeSet<PartyKind>,
    /// Category-specific fields
    #[serde(default)]
    pub detail: ItemDetail,
}

impl ReferenceItem {
    /// Creates a new item with the common fields; details are added with
    /// the `with_*` builders
    pub fn new(
        category: ReferenceCategory,
        code: impl Into<String>,
        locale: LocaleId,
        scope: Scope,
        name: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code: code.into(),
            locale,
            scope,
            sort_index: None,
            name: name.into(),
            description: None,
            applicable_party_kinds: BTreeSet::new(),
            detail: ItemDetail::None,
        }
    }

    pub fn with_sort_index(mut self, sort_index: u32) -> Self {
        self.sort_index = Some(sort_index);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_detail(mut self, detail: ItemDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Restricts this entry to the given party kinds
    pub fn for_party_kinds(mut self, kinds: impl IntoIterator<Item = PartyKind>) -> Self {
        self.applicable_party_kinds = kinds.into_iter().collect();
        self
    }

    /// Whether this entry applies to parties of the given kind
    ///
    /// An entry with no declared kinds applies to every party.
    pub fn applies_to(&self, kind: PartyKind) -> bool {
        self.applicable_party_kinds.is_empty() || self.applicable_party_kinds.contains(&kind)
    }

    /// The declared value representation, for attribute and preference types
    pub fn declared_value_type(&self) -> Option<ValueType> {
        match &self.detail {
            ItemDetail::AttributeType { value_type, .. } => Some(*value_type),
            ItemDetail::PreferenceType { value_type } => Some(*value_type),
            _ => None,
        }
    }

    /// The declared unit kind, for quantitative attribute types
    pub fn declared_unit_type(&self) -> Option<UnitType> {
        match &self.detail {
            ItemDetail::AttributeType { unit_type, .. } => *unit_type,
            _ => None,
        }
    }
}
