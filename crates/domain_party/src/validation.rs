//! Party validation
//!
//! Validation runs in three phases and always runs all of them to
//! completion:
//!
//! 1. **Structural** - mandatory fields, string shape, date consistency.
//! 2. **Typed-value integrity** - every typed entry's code must exist in
//!    the effective reference data for the party's tenant and kind, its
//!    value must match the declared representation, and its unit must
//!    belong to the declared unit kind.
//! 3. **Role-driven** - every constraint registered for a role the party
//!    holds is evaluated against the corresponding attribute or
//!    preference.
//!
//! Violations accumulate into one set keyed by `(field path, kind)`;
//! callers rely on exact counts, so nothing short-circuits. The engine
//! pins a single reference snapshot for the whole pass, so a concurrent
//! reload cannot make the phases disagree with each other.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;
use validator::ValidateEmail;

use core_kernel::{LocaleId, PartyKind};
use domain_reference::{
    ConstraintKind, ConstraintOutcome, EvaluationContext, ItemDetail, ReferenceCategory,
    ReferenceItem, ReferenceSnapshot, ReferenceStore,
};

use crate::association::{Association, Mandate};
use crate::attribute::Property;
use crate::error::PartyError;
use crate::party::Party;

/// What a violation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    Required,
    Pattern,
    Reference,
    MaxSize,
    MinValue,
    MaxValue,
    UnknownTypeCode,
    ValueTypeMismatch,
    UnitMismatch,
    InvalidCharacters,
    InvalidDateRange,
    FieldNotAllowed,
    InvalidFormat,
}

impl From<ConstraintKind> for ViolationKind {
    fn from(kind: ConstraintKind) -> Self {
        match kind {
            ConstraintKind::Required => ViolationKind::Required,
            ConstraintKind::Pattern => ViolationKind::Pattern,
            ConstraintKind::Reference => ViolationKind::Reference,
            ConstraintKind::MaxSize => ViolationKind::MaxSize,
            ConstraintKind::MinValue => ViolationKind::MinValue,
            ConstraintKind::MaxValue => ViolationKind::MaxValue,
        }
    }
}

/// One rule failure on one field
///
/// Identity - equality, ordering, set membership - is the `(path, kind)`
/// pair; the message is diagnostics and does not split keys.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl PartialEq for Violation {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.kind == other.kind
    }
}

impl Eq for Violation {}

impl PartialOrd for Violation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Violation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.path, self.kind).cmp(&(&other.path, other.kind))
    }
}

impl std::hash::Hash for Violation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.kind.hash(state);
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}: {}", self.path, self.kind, self.message)
    }
}

/// The locale under which reference data is resolved during validation
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub locale: LocaleId,
}

impl ValidationContext {
    pub fn new(locale: LocaleId) -> Self {
        Self { locale }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            locale: LocaleId::default_locale(),
        }
    }
}

static NAME_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A[\p{L}\p{M}][\p{L}\p{M} .'\-]*\z").expect("name shape pattern is well-formed")
});

/// Validates party aggregates against reference data and constraint tables
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    store: Arc<ReferenceStore>,
}

impl ValidationEngine {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Validates a party in the module default locale
    pub fn validate(&self, party: &Party) -> Result<BTreeSet<Violation>, PartyError> {
        self.validate_with(party, &ValidationContext::default())
    }

    /// Validates a party, accumulating every violation
    ///
    /// # Errors
    ///
    /// Only infrastructure failures: an unsupported validation locale or an
    /// unavailable reference source. Rule failures are returned in the set.
    pub fn validate_with(
        &self,
        party: &Party,
        ctx: &ValidationContext,
    ) -> Result<BTreeSet<Violation>, PartyError> {
        let snapshot = self.store.snapshot();
        let eval_ctx = EvaluationContext::new(Some(party.tenant().clone()), ctx.locale.clone());
        let mut violations = BTreeSet::new();

        validate_structure(party, &mut violations);
        validate_typed_entries(&snapshot, party, &eval_ctx, &mut violations)?;
        validate_role_constraints(&snapshot, party, &eval_ctx, &mut violations);

        debug!(
            party = %party.id(),
            kind = %party.kind(),
            violations = violations.len(),
            "validated party"
        );
        Ok(violations)
    }

    /// Validates an association in the module default locale
    pub fn validate_association(
        &self,
        association: &Association,
    ) -> Result<BTreeSet<Violation>, PartyError> {
        self.validate_association_with(association, &ValidationContext::default())
    }

    /// Validates an association: type code, property integrity, and the
    /// property constraints registered for its association type
    pub fn validate_association_with(
        &self,
        association: &Association,
        ctx: &ValidationContext,
    ) -> Result<BTreeSet<Violation>, PartyError> {
        let snapshot = self.store.snapshot();
        let eval_ctx =
            EvaluationContext::new(Some(association.tenant.clone()), ctx.locale.clone());
        let mut violations = BTreeSet::new();

        if !snapshot.is_valid(
            ReferenceCategory::AssociationTypes,
            eval_ctx.tenant.as_ref(),
            &eval_ctx.locale,
            &association.association_type,
        )? {
            violations.insert(Violation::new(
                "association_type",
                ViolationKind::UnknownTypeCode,
                format!("'{}' is not a known association type", association.association_type),
            ));
        }

        validate_properties(&snapshot, &association.properties, &eval_ctx, &mut violations)?;

        for constraint in snapshot.association_property_constraints_for(&association.association_type)
        {
            let candidate = association
                .property_with_type(&constraint.property_type)
                .and_then(|property| property.value.as_ref());
            if let ConstraintOutcome::Violated(message) =
                snapshot.evaluate(&constraint.rule, candidate, &eval_ctx)
            {
                violations.insert(Violation::new(
                    format!("properties[{}]", constraint.property_type),
                    constraint.rule.kind.into(),
                    message,
                ));
            }
        }

        Ok(violations)
    }

    /// Validates a mandate in the module default locale
    pub fn validate_mandate(&self, mandate: &Mandate) -> Result<BTreeSet<Violation>, PartyError> {
        self.validate_mandate_with(mandate, &ValidationContext::default())
    }

    /// Validates a mandate, mirroring association validation keyed by the
    /// mandate type
    pub fn validate_mandate_with(
        &self,
        mandate: &Mandate,
        ctx: &ValidationContext,
    ) -> Result<BTreeSet<Violation>, PartyError> {
        let snapshot = self.store.snapshot();
        let eval_ctx = EvaluationContext::new(Some(mandate.tenant.clone()), ctx.locale.clone());
        let mut violations = BTreeSet::new();

        if !snapshot.is_valid(
            ReferenceCategory::MandateTypes,
            eval_ctx.tenant.as_ref(),
            &eval_ctx.locale,
            &mandate.mandate_type,
        )? {
            violations.insert(Violation::new(
                "mandate_type",
                ViolationKind::UnknownTypeCode,
                format!("'{}' is not a known mandate type", mandate.mandate_type),
            ));
        }

        validate_properties(&snapshot, &mandate.properties, &eval_ctx, &mut violations)?;

        for constraint in snapshot.mandate_property_constraints_for(&mandate.mandate_type) {
            let candidate = mandate
                .property_with_type(&constraint.property_type)
                .and_then(|property| property.value.as_ref());
            if let ConstraintOutcome::Violated(message) =
                snapshot.evaluate(&constraint.rule, candidate, &eval_ctx)
            {
                violations.insert(Violation::new(
                    format!("properties[{}]", constraint.property_type),
                    constraint.rule.kind.into(),
                    message,
                ));
            }
        }

        Ok(violations)
    }
}

// --- phase 1: structure ---

fn validate_structure(party: &Party, violations: &mut BTreeSet<Violation>) {
    match party {
        Party::Person(person) => {
            validate_person_name(&person.first_name, "person.first_name", violations);
            validate_person_name(&person.last_name, "person.last_name", violations);
            if let Some(birth_date) = person.birth_date {
                if birth_date > Utc::now().date_naive() {
                    violations.insert(Violation::new(
                        "person.birth_date",
                        ViolationKind::InvalidDateRange,
                        "birth date cannot be in the future",
                    ));
                }
            }
            if let Some(nationality) = &person.nationality {
                if nationality.len() != 2 {
                    violations.insert(Violation::new(
                        "person.nationality",
                        ViolationKind::InvalidFormat,
                        "nationality must be a 2-letter ISO country code",
                    ));
                }
            }
        }
        Party::Organization(organization) => {
            if organization.legal_name.trim().is_empty() {
                violations.insert(Violation::new(
                    "organization.legal_name",
                    ViolationKind::Required,
                    "legal name is required",
                ));
            } else if organization.legal_name.chars().any(char::is_control) {
                violations.insert(Violation::new(
                    "organization.legal_name",
                    ViolationKind::InvalidCharacters,
                    "legal name contains control characters",
                ));
            }
            if let Some(incorporation_date) = organization.incorporation_date {
                if incorporation_date > Utc::now().date_naive() {
                    violations.insert(Violation::new(
                        "organization.incorporation_date",
                        ViolationKind::InvalidDateRange,
                        "incorporation date cannot be in the future",
                    ));
                }
            }
            if let Some(country) = &organization.incorporation_country {
                if country.len() != 2 {
                    violations.insert(Violation::new(
                        "organization.incorporation_country",
                        ViolationKind::InvalidFormat,
                        "incorporation country must be a 2-letter ISO country code",
                    ));
                }
            }
        }
    }

    let common = party.common();
    for (index, mechanism) in common.contact_mechanisms.iter().enumerate() {
        if mechanism.value.trim().is_empty() {
            violations.insert(Violation::new(
                format!("contact_mechanisms[{}].value", index),
                ViolationKind::Required,
                "contact mechanism value is required",
            ));
        } else if mechanism.mechanism_type == "EMAIL" && !mechanism.value.validate_email() {
            violations.insert(Violation::new(
                format!("contact_mechanisms[{}].value", index),
                ViolationKind::InvalidFormat,
                format!("'{}' is not a valid email address", mechanism.value),
            ));
        }
    }

    for (index, identification) in common.identifications.iter().enumerate() {
        if identification.number.trim().is_empty() {
            violations.insert(Violation::new(
                format!("identifications[{}].number", index),
                ViolationKind::Required,
                "identification number is required",
            ));
        }
        if let (Some(issue), Some(expiry)) =
            (identification.issue_date, identification.expiry_date)
        {
            if issue > expiry {
                violations.insert(Violation::new(
                    format!("identifications[{}].expiry_date", index),
                    ViolationKind::InvalidDateRange,
                    "issue date must not be after expiry date",
                ));
            }
        }
    }

    for (index, tax_number) in common.tax_numbers.iter().enumerate() {
        if tax_number.number.trim().is_empty() {
            violations.insert(Violation::new(
                format!("tax_numbers[{}].number", index),
                ViolationKind::Required,
                "tax number is required",
            ));
        }
    }
}

fn validate_person_name(name: &str, path: &str, violations: &mut BTreeSet<Violation>) {
    if name.trim().is_empty() {
        violations.insert(Violation::new(path, ViolationKind::Required, "name is required"));
    } else if !NAME_SHAPE.is_match(name) {
        violations.insert(Violation::new(
            path,
            ViolationKind::InvalidCharacters,
            format!("'{}' contains characters not allowed in names", name),
        ));
    }
}

// --- phase 2: typed-value integrity ---

fn effective_items(
    snapshot: &ReferenceSnapshot,
    category: ReferenceCategory,
    ctx: &EvaluationContext,
) -> Result<Vec<ReferenceItem>, PartyError> {
    Ok(snapshot.resolve(category, ctx.tenant.as_ref(), &ctx.locale)?)
}

fn find_for_kind<'a>(
    items: &'a [ReferenceItem],
    code: &str,
    kind: PartyKind,
) -> Option<&'a ReferenceItem> {
    items
        .iter()
        .filter(|item| item.applies_to(kind))
        .find(|item| item.code == code)
}

fn find_any<'a>(items: &'a [ReferenceItem], code: &str) -> Option<&'a ReferenceItem> {
    items.iter().find(|item| item.code == code)
}

fn validate_typed_entries(
    snapshot: &ReferenceSnapshot,
    party: &Party,
    ctx: &EvaluationContext,
    violations: &mut BTreeSet<Violation>,
) -> Result<(), PartyError> {
    let kind = party.kind();
    let common = party.common();

    if !common.attributes.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::AttributeTypes, ctx)?;
        for attribute in &common.attributes {
            let path = format!("attributes[{}]", attribute.attribute_type);
            match find_for_kind(&items, &attribute.attribute_type, kind) {
                None => {
                    violations.insert(Violation::new(
                        path,
                        ViolationKind::UnknownTypeCode,
                        format!(
                            "'{}' is not a known attribute type for {} parties",
                            attribute.attribute_type, kind
                        ),
                    ));
                }
                Some(item) => {
                    if let (Some(declared), Some(value)) =
                        (item.declared_value_type(), &attribute.value)
                    {
                        if value.value_type() != declared {
                            violations.insert(Violation::new(
                                path.clone(),
                                ViolationKind::ValueTypeMismatch,
                                format!(
                                    "attribute '{}' declares {} values, got {}",
                                    attribute.attribute_type,
                                    declared,
                                    value.value_type()
                                ),
                            ));
                        }
                    }
                    match (item.declared_unit_type(), attribute.unit) {
                        (Some(declared), Some(unit)) if unit.unit_type() != declared => {
                            violations.insert(Violation::new(
                                path,
                                ViolationKind::UnitMismatch,
                                format!(
                                    "unit {} measures {}, attribute '{}' declares {}",
                                    unit,
                                    unit.unit_type(),
                                    attribute.attribute_type,
                                    declared
                                ),
                            ));
                        }
                        (None, Some(unit)) => {
                            violations.insert(Violation::new(
                                path,
                                ViolationKind::UnitMismatch,
                                format!(
                                    "attribute '{}' declares no unit type but carries unit {}",
                                    attribute.attribute_type, unit
                                ),
                            ));
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    if !common.preferences.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::PreferenceTypes, ctx)?;
        for preference in &common.preferences {
            let path = format!("preferences[{}]", preference.preference_type);
            match find_for_kind(&items, &preference.preference_type, kind) {
                None => {
                    violations.insert(Violation::new(
                        path,
                        ViolationKind::UnknownTypeCode,
                        format!(
                            "'{}' is not a known preference type for {} parties",
                            preference.preference_type, kind
                        ),
                    ));
                }
                Some(item) => {
                    if let (Some(declared), Some(value)) =
                        (item.declared_value_type(), &preference.value)
                    {
                        if value.value_type() != declared {
                            violations.insert(Violation::new(
                                path,
                                ViolationKind::ValueTypeMismatch,
                                format!(
                                    "preference '{}' declares {} values, got {}",
                                    preference.preference_type,
                                    declared,
                                    value.value_type()
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }

    if !common.roles.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::RoleTypes, ctx)?;
        for role in &common.roles {
            if find_for_kind(&items, &role.role_type, kind).is_none() {
                violations.insert(Violation::new(
                    format!("roles[{}]", role.role_type),
                    ViolationKind::UnknownTypeCode,
                    format!(
                        "'{}' is not a known role type for {} parties",
                        role.role_type, kind
                    ),
                ));
            }
        }
    }

    if !common.statuses.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::StatusTypes, ctx)?;
        for status in &common.statuses {
            if find_for_kind(&items, &status.status_type, kind).is_none() {
                violations.insert(Violation::new(
                    format!("statuses[{}]", status.status_type),
                    ViolationKind::UnknownTypeCode,
                    format!("'{}' is not a known status type", status.status_type),
                ));
            }
        }
    }

    if !common.locks.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::LockTypes, ctx)?;
        for lock in &common.locks {
            if find_for_kind(&items, &lock.lock_type, kind).is_none() {
                violations.insert(Violation::new(
                    format!("locks[{}]", lock.lock_type),
                    ViolationKind::UnknownTypeCode,
                    format!("'{}' is not a known lock type", lock.lock_type),
                ));
            }
        }
    }

    if !common.consents.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::ConsentTypes, ctx)?;
        for consent in &common.consents {
            if find_for_kind(&items, &consent.consent_type, kind).is_none() {
                violations.insert(Violation::new(
                    format!("consents[{}]", consent.consent_type),
                    ViolationKind::UnknownTypeCode,
                    format!("'{}' is not a known consent type", consent.consent_type),
                ));
            }
        }
    }

    if !common.tax_numbers.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::TaxNumberTypes, ctx)?;
        for (index, tax_number) in common.tax_numbers.iter().enumerate() {
            if find_for_kind(&items, &tax_number.tax_number_type, kind).is_none() {
                violations.insert(Violation::new(
                    format!("tax_numbers[{}].tax_number_type", index),
                    ViolationKind::UnknownTypeCode,
                    format!(
                        "'{}' is not a known tax number type",
                        tax_number.tax_number_type
                    ),
                ));
            }
        }
    }

    if !common.segment_allocations.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::SegmentTypes, ctx)?;
        for allocation in &common.segment_allocations {
            if find_for_kind(&items, &allocation.segment, kind).is_none() {
                violations.insert(Violation::new(
                    format!("segment_allocations[{}]", allocation.segment),
                    ViolationKind::UnknownTypeCode,
                    format!("'{}' is not a known segment", allocation.segment),
                ));
            }
        }
    }

    if !common.contact_mechanisms.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::ContactMechanismTypes, ctx)?;
        for (index, mechanism) in common.contact_mechanisms.iter().enumerate() {
            if find_for_kind(&items, &mechanism.mechanism_type, kind).is_none() {
                violations.insert(Violation::new(
                    format!("contact_mechanisms[{}].mechanism_type", index),
                    ViolationKind::UnknownTypeCode,
                    format!(
                        "'{}' is not a known contact mechanism type",
                        mechanism.mechanism_type
                    ),
                ));
            }
            if let Some(role) = &mechanism.role {
                let valid = snapshot.is_valid_contact_mechanism_role(
                    ctx.tenant.as_ref(),
                    &ctx.locale,
                    role,
                    &mechanism.mechanism_type,
                )?;
                if !valid {
                    violations.insert(Violation::new(
                        format!("contact_mechanisms[{}].role", index),
                        ViolationKind::UnknownTypeCode,
                        format!(
                            "'{}' is not a known role for {} mechanisms",
                            role, mechanism.mechanism_type
                        ),
                    ));
                }
            }
        }
    }

    if !common.identifications.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::IdentificationTypes, ctx)?;
        for (index, identification) in common.identifications.iter().enumerate() {
            match find_for_kind(&items, &identification.identification_type, kind) {
                None => {
                    violations.insert(Violation::new(
                        format!("identifications[{}].identification_type", index),
                        ViolationKind::UnknownTypeCode,
                        format!(
                            "'{}' is not a known identification type for {} parties",
                            identification.identification_type, kind
                        ),
                    ));
                }
                Some(item) => {
                    if let ItemDetail::IdentificationType {
                        country_of_issue: Some(declared),
                    } = &item.detail
                    {
                        if let Some(country) = &identification.country_of_issue {
                            if country != declared {
                                violations.insert(Violation::new(
                                    format!("identifications[{}].country_of_issue", index),
                                    ViolationKind::InvalidFormat,
                                    format!(
                                        "'{}' documents are issued by {}, not {}",
                                        identification.identification_type, declared, country
                                    ),
                                ));
                            }
                        }
                    }
                }
            }
        }
    }

    if !common.addresses.is_empty() {
        let items = effective_items(snapshot, ReferenceCategory::PhysicalAddressTypes, ctx)?;
        for (index, address) in common.addresses.iter().enumerate() {
            match find_for_kind(&items, &address.address_type, kind) {
                None => {
                    violations.insert(Violation::new(
                        format!("addresses[{}].address_type", index),
                        ViolationKind::UnknownTypeCode,
                        format!("'{}' is not a known address type", address.address_type),
                    ));
                }
                Some(item) => {
                    if let ItemDetail::PhysicalAddressType {
                        required_fields,
                        allowed_fields,
                    } = &item.detail
                    {
                        let populated = address.populated_fields();
                        for field in required_fields {
                            if !populated.contains(field) {
                                violations.insert(Violation::new(
                                    format!("addresses[{}].{}", index, field),
                                    ViolationKind::Required,
                                    format!(
                                        "{} is required on {} addresses",
                                        field, address.address_type
                                    ),
                                ));
                            }
                        }
                        for field in &populated {
                            if !required_fields.contains(field) && !allowed_fields.contains(field) {
                                violations.insert(Violation::new(
                                    format!("addresses[{}].{}", index, field),
                                    ViolationKind::FieldNotAllowed,
                                    format!(
                                        "{} is not valid on {} addresses",
                                        field, address.address_type
                                    ),
                                ));
                            }
                        }
                    }
                }
            }
        }
    }

    if let Party::Person(person) = party {
        if let Some(gender) = &person.gender {
            let items = effective_items(snapshot, ReferenceCategory::Genders, ctx)?;
            if find_any(&items, gender).is_none() {
                violations.insert(Violation::new(
                    "person.gender",
                    ViolationKind::UnknownTypeCode,
                    format!("'{}' is not a known gender code", gender),
                ));
            }
        }
        if let Some(marital_status) = &person.marital_status {
            let items = effective_items(snapshot, ReferenceCategory::MaritalStatuses, ctx)?;
            if find_any(&items, marital_status).is_none() {
                violations.insert(Violation::new(
                    "person.marital_status",
                    ViolationKind::UnknownTypeCode,
                    format!("'{}' is not a known marital status", marital_status),
                ));
            }
        }
    }

    Ok(())
}

fn validate_properties(
    snapshot: &ReferenceSnapshot,
    properties: &[Property],
    ctx: &EvaluationContext,
    violations: &mut BTreeSet<Violation>,
) -> Result<(), PartyError> {
    if properties.is_empty() {
        return Ok(());
    }
    // Property definitions (value type, unit kind) live in the attribute
    // type list
    let items = effective_items(snapshot, ReferenceCategory::AttributeTypes, ctx)?;
    for property in properties {
        let path = format!("properties[{}]", property.property_type);
        match find_any(&items, &property.property_type) {
            None => {
                violations.insert(Violation::new(
                    path,
                    ViolationKind::UnknownTypeCode,
                    format!("'{}' is not a known property type", property.property_type),
                ));
            }
            Some(item) => {
                if let (Some(declared), Some(value)) =
                    (item.declared_value_type(), &property.value)
                {
                    if value.value_type() != declared {
                        violations.insert(Violation::new(
                            path.clone(),
                            ViolationKind::ValueTypeMismatch,
                            format!(
                                "property '{}' declares {} values, got {}",
                                property.property_type,
                                declared,
                                value.value_type()
                            ),
                        ));
                    }
                }
                match (item.declared_unit_type(), property.unit) {
                    (Some(declared), Some(unit)) if unit.unit_type() != declared => {
                        violations.insert(Violation::new(
                            path,
                            ViolationKind::UnitMismatch,
                            format!(
                                "unit {} measures {}, property '{}' declares {}",
                                unit,
                                unit.unit_type(),
                                property.property_type,
                                declared
                            ),
                        ));
                    }
                    (None, Some(unit)) => {
                        violations.insert(Violation::new(
                            path,
                            ViolationKind::UnitMismatch,
                            format!(
                                "property '{}' declares no unit type but carries unit {}",
                                property.property_type, unit
                            ),
                        ));
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

// --- phase 3: role-driven constraints ---

fn validate_role_constraints(
    snapshot: &ReferenceSnapshot,
    party: &Party,
    ctx: &EvaluationContext,
    violations: &mut BTreeSet<Violation>,
) {
    let common = party.common();
    for role_type in common.active_role_types() {
        for constraint in snapshot.attribute_constraints_for(role_type) {
            let candidate = common
                .attribute_with_type(&constraint.attribute_type)
                .and_then(|attribute| attribute.value.as_ref());
            if let ConstraintOutcome::Violated(message) =
                snapshot.evaluate(&constraint.rule, candidate, ctx)
            {
                violations.insert(Violation::new(
                    format!("attributes[{}]", constraint.attribute_type),
                    constraint.rule.kind.into(),
                    message,
                ));
            }
        }
        for constraint in snapshot.preference_constraints_for(role_type) {
            let candidate = common
                .preference_with_type(&constraint.preference_type)
                .and_then(|preference| preference.value.as_ref());
            if let ConstraintOutcome::Violated(message) =
                snapshot.evaluate(&constraint.rule, candidate, ctx)
            {
                violations.insert(Violation::new(
                    format!("preferences[{}]", constraint.preference_type),
                    constraint.rule.kind.into(),
                    message,
                ));
            }
        }
    }
}
