//! Physical addresses
//!
//! Which fields an address must and may carry is declared by its
//! address-type reference row, so the struct keeps every field optional and
//! exposes the populated set for validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use domain_reference::AddressField;

/// A physical address of a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalAddress {
    /// The address type code, defined in reference data
    pub address_type: String,
    pub street_name: Option<String>,
    pub house_number: Option<String>,
    pub po_box: Option<String>,
    pub city: Option<String>,
    pub state_or_province: Option<String>,
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country: Option<String>,
    /// Whether this is the party's primary address
    pub primary: bool,
}

impl PhysicalAddress {
    pub fn new(address_type: impl Into<String>) -> Self {
        Self {
            address_type: address_type.into(),
            street_name: None,
            house_number: None,
            po_box: None,
            city: None,
            state_or_province: None,
            postal_code: None,
            country: None,
            primary: false,
        }
    }

    pub fn with_street_name(mut self, street_name: impl Into<String>) -> Self {
        self.street_name = Some(street_name.into());
        self
    }

    pub fn with_house_number(mut self, house_number: impl Into<String>) -> Self {
        self.house_number = Some(house_number.into());
        self
    }

    pub fn with_po_box(mut self, po_box: impl Into<String>) -> Self {
        self.po_box = Some(po_box.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state_or_province(mut self, state_or_province: impl Into<String>) -> Self {
        self.state_or_province = Some(state_or_province.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn as_primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Reads one field by its reference-data name
    pub fn field(&self, field: AddressField) -> Option<&str> {
        match field {
            AddressField::StreetName => self.street_name.as_deref(),
            AddressField::HouseNumber => self.house_number.as_deref(),
            AddressField::PoBox => self.po_box.as_deref(),
            AddressField::City => self.city.as_deref(),
            AddressField::StateOrProvince => self.state_or_province.as_deref(),
            AddressField::PostalCode => self.postal_code.as_deref(),
            AddressField::Country => self.country.as_deref(),
        }
    }

    /// The set of fields that carry a non-blank value
    pub fn populated_fields(&self) -> BTreeSet<AddressField> {
        [
            AddressField::StreetName,
            AddressField::HouseNumber,
            AddressField::PoBox,
            AddressField::City,
            AddressField::StateOrProvince,
            AddressField::PostalCode,
            AddressField::Country,
        ]
        .into_iter()
        .filter(|field| self.field(*field).is_some_and(|value| !value.trim().is_empty()))
        .collect()
    }
}
