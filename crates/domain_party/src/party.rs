//! The Party aggregate
//!
//! A party is a person or an organization. The two kinds share one
//! collection set ([`PartyCommon`]) and add their own fields; the aggregate
//! itself is a sum type resolved by pattern matching. Cross-cutting
//! operations (display, snapshots, validation) work on the shared part and
//! match on the kind only where the kinds genuinely differ.
//!
//! Every mutation of a sub-collection goes through an operation that
//! touches `updated_at`; the collections are never reached around the
//! aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{PartyId, PartyKind, TenantId, TypedValue};

use crate::address::PhysicalAddress;
use crate::attribute::Attribute;
use crate::contact::ContactMechanism;
use crate::identification::{Identification, TaxNumber};
use crate::preference::{Consent, ExternalReference, Preference, SegmentAllocation};
use crate::role::{PartyLock, PartyRole, PartyStatus};

/// The collection set shared by every party kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyCommon {
    /// Unique party identifier
    pub id: PartyId,
    /// The tenant owning this party
    pub tenant: TenantId,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub contact_mechanisms: Vec<ContactMechanism>,
    #[serde(default)]
    pub addresses: Vec<PhysicalAddress>,
    #[serde(default)]
    pub identifications: Vec<Identification>,
    #[serde(default)]
    pub roles: Vec<PartyRole>,
    #[serde(default)]
    pub statuses: Vec<PartyStatus>,
    #[serde(default)]
    pub locks: Vec<PartyLock>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub tax_numbers: Vec<TaxNumber>,
    #[serde(default)]
    pub external_references: Vec<ExternalReference>,
    #[serde(default)]
    pub consents: Vec<Consent>,
    #[serde(default)]
    pub segment_allocations: Vec<SegmentAllocation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartyCommon {
    fn new(tenant: TenantId) -> Self {
        let now = Utc::now();
        Self {
            id: PartyId::new_v7(),
            tenant,
            attributes: Vec::new(),
            contact_mechanisms: Vec::new(),
            addresses: Vec::new(),
            identifications: Vec::new(),
            roles: Vec::new(),
            statuses: Vec::new(),
            locks: Vec::new(),
            preferences: Vec::new(),
            tax_numbers: Vec::new(),
            external_references: Vec::new(),
            consents: Vec::new(),
            segment_allocations: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // --- attributes ---

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
        self.touch();
    }

    pub fn attribute_with_type(&self, attribute_type: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.attribute_type == attribute_type)
    }

    pub fn has_attribute_with_type(&self, attribute_type: &str) -> bool {
        self.attribute_with_type(attribute_type).is_some()
    }

    /// Removes the attribute of the given type
    ///
    /// Returns whether an attribute was removed.
    pub fn remove_attribute_with_type(&mut self, attribute_type: &str) -> bool {
        let before = self.attributes.len();
        self.attributes
            .retain(|attribute| attribute.attribute_type != attribute_type);
        let removed = self.attributes.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Sets the value of the attribute of the given type, creating the
    /// attribute when it does not exist yet
    pub fn set_attribute_value(&mut self, attribute_type: &str, value: TypedValue) {
        match self
            .attributes
            .iter_mut()
            .find(|attribute| attribute.attribute_type == attribute_type)
        {
            Some(attribute) => attribute.value = Some(value),
            None => self
                .attributes
                .push(Attribute::new(attribute_type).with_value(value)),
        }
        self.touch();
    }

    // --- preferences ---

    pub fn add_preference(&mut self, preference: Preference) {
        self.preferences.push(preference);
        self.touch();
    }

    pub fn preference_with_type(&self, preference_type: &str) -> Option<&Preference> {
        self.preferences
            .iter()
            .find(|preference| preference.preference_type == preference_type)
    }

    pub fn has_preference_with_type(&self, preference_type: &str) -> bool {
        self.preference_with_type(preference_type).is_some()
    }

    pub fn remove_preference_with_type(&mut self, preference_type: &str) -> bool {
        let before = self.preferences.len();
        self.preferences
            .retain(|preference| preference.preference_type != preference_type);
        let removed = self.preferences.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    // --- roles ---

    pub fn add_role(&mut self, role: PartyRole) {
        self.roles.push(role);
        self.touch();
    }

    /// Whether the party currently holds the role
    pub fn has_active_role(&self, role_type: &str) -> bool {
        self.roles
            .iter()
            .any(|role| role.role_type == role_type && role.is_active())
    }

    pub fn remove_role(&mut self, role_type: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|role| role.role_type != role_type);
        let removed = self.roles.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// The distinct role types currently held, in stable order
    pub fn active_role_types(&self) -> BTreeSet<&str> {
        self.roles
            .iter()
            .filter(|role| role.is_active())
            .map(|role| role.role_type.as_str())
            .collect()
    }

    // --- addresses ---

    pub fn add_address(&mut self, address: PhysicalAddress) {
        self.addresses.push(address);
        self.touch();
    }

    pub fn primary_address(&self) -> Option<&PhysicalAddress> {
        self.addresses.iter().find(|address| address.primary)
    }

    // --- contact mechanisms ---

    pub fn add_contact_mechanism(&mut self, mechanism: ContactMechanism) {
        self.contact_mechanisms.push(mechanism);
        self.touch();
    }

    // --- identifications ---

    pub fn add_identification(&mut self, identification: Identification) {
        self.identifications.push(identification);
        self.touch();
    }

    // --- statuses and locks ---

    pub fn add_status(&mut self, status: PartyStatus) {
        self.statuses.push(status);
        self.touch();
    }

    pub fn add_lock(&mut self, lock: PartyLock) {
        self.locks.push(lock);
        self.touch();
    }

    pub fn remove_lock(&mut self, lock_type: &str) -> bool {
        let before = self.locks.len();
        self.locks.retain(|lock| lock.lock_type != lock_type);
        let removed = self.locks.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn is_locked(&self) -> bool {
        !self.locks.is_empty()
    }

    // --- remaining collections ---

    pub fn add_tax_number(&mut self, tax_number: TaxNumber) {
        self.tax_numbers.push(tax_number);
        self.touch();
    }

    pub fn add_external_reference(&mut self, reference: ExternalReference) {
        self.external_references.push(reference);
        self.touch();
    }

    pub fn add_consent(&mut self, consent: Consent) {
        self.consents.push(consent);
        self.touch();
    }

    pub fn add_segment_allocation(&mut self, allocation: SegmentAllocation) {
        self.segment_allocations.push(allocation);
        self.touch();
    }
}

/// A natural person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub common: PartyCommon,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    /// Gender code, defined in reference data
    pub gender: Option<String>,
    /// Marital status code, defined in reference data
    pub marital_status: Option<String>,
    /// Nationality (ISO 3166-1 alpha-2)
    pub nationality: Option<String>,
}

impl Person {
    pub fn new(
        tenant: impl Into<TenantId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            common: PartyCommon::new(tenant.into()),
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            birth_date: None,
            gender: None,
            marital_status: None,
            nationality: None,
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_marital_status(mut self, marital_status: impl Into<String>) -> Self {
        self.marital_status = Some(marital_status.into());
        self
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    /// Full name in "First Middle Last" form
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// A legal entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub common: PartyCommon,
    pub legal_name: String,
    pub registration_number: Option<String>,
    /// Free-form legal form (BV, GmbH, Inc, …)
    pub legal_form: Option<String>,
    pub incorporation_date: Option<NaiveDate>,
    /// Country of incorporation (ISO 3166-1 alpha-2)
    pub incorporation_country: Option<String>,
}

impl Organization {
    pub fn new(tenant: impl Into<TenantId>, legal_name: impl Into<String>) -> Self {
        Self {
            common: PartyCommon::new(tenant.into()),
            legal_name: legal_name.into(),
            registration_number: None,
            legal_form: None,
            incorporation_date: None,
            incorporation_country: None,
        }
    }

    pub fn with_registration_number(mut self, registration_number: impl Into<String>) -> Self {
        self.registration_number = Some(registration_number.into());
        self
    }

    pub fn with_legal_form(mut self, legal_form: impl Into<String>) -> Self {
        self.legal_form = Some(legal_form.into());
        self
    }

    pub fn with_incorporation_date(mut self, incorporation_date: NaiveDate) -> Self {
        self.incorporation_date = Some(incorporation_date);
        self
    }

    pub fn with_incorporation_country(mut self, country: impl Into<String>) -> Self {
        self.incorporation_country = Some(country.into());
        self
    }
}

/// A party: a person or an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Party {
    Person(Person),
    Organization(Organization),
}

impl Party {
    /// Creates a person party with the mandatory fields
    pub fn new_person(
        tenant: impl Into<TenantId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Party::Person(Person::new(tenant, first_name, last_name))
    }

    /// Creates an organization party with the mandatory fields
    pub fn new_organization(
        tenant: impl Into<TenantId>,
        legal_name: impl Into<String>,
    ) -> Self {
        Party::Organization(Organization::new(tenant, legal_name))
    }

    pub fn id(&self) -> PartyId {
        self.common().id
    }

    pub fn tenant(&self) -> &TenantId {
        &self.common().tenant
    }

    pub fn kind(&self) -> PartyKind {
        match self {
            Party::Person(_) => PartyKind::Person,
            Party::Organization(_) => PartyKind::Organization,
        }
    }

    /// The shared collection set
    pub fn common(&self) -> &PartyCommon {
        match self {
            Party::Person(person) => &person.common,
            Party::Organization(organization) => &organization.common,
        }
    }

    /// The shared collection set, for mutation
    pub fn common_mut(&mut self) -> &mut PartyCommon {
        match self {
            Party::Person(person) => &mut person.common,
            Party::Organization(organization) => &mut organization.common,
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Party::Person(person) => Some(person),
            Party::Organization(_) => None,
        }
    }

    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Party::Person(_) => None,
            Party::Organization(organization) => Some(organization),
        }
    }

    /// A human-readable name for the party
    pub fn display_name(&self) -> String {
        match self {
            Party::Person(person) => person.full_name(),
            Party::Organization(organization) => organization.legal_name.clone(),
        }
    }
}

impl From<Person> for Party {
    fn from(person: Person) -> Self {
        Party::Person(person)
    }
}

impl From<Organization> for Party {
    fn from(organization: Organization) -> Self {
        Party::Organization(organization)
    }
}
