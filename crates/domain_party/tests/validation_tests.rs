//! Validation engine integration tests
//!
//! Exercises the three validation phases against a realistic reference
//! dataset: typed-value integrity, role-driven constraint counts that track
//! the constraint table exactly, address shape rules, and determinism.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{LocaleId, PartyKind, Scope, UnitOfMeasure, UnitType, ValueType};
use domain_party::{
    Attribute, ContactMechanism, Identification, Party, PartyRole, PhysicalAddress, Preference,
    ValidationEngine, Violation, ViolationKind,
};
use domain_reference::{
    AddressField, AttributeConstraint, ConstraintRule, ItemDetail, PreferenceConstraint,
    ReferenceCategory, ReferenceDataSet, ReferenceItem, ReferenceStore,
};
use rust_decimal_macros::dec;

fn locale() -> LocaleId {
    LocaleId::default_locale()
}

fn item(category: ReferenceCategory, code: &str) -> ReferenceItem {
    ReferenceItem::new(category, code, locale(), Scope::Global, code)
}

fn base_dataset() -> ReferenceDataSet {
    let mut items = vec![
        item(ReferenceCategory::RoleTypes, "test_person_role")
            .for_party_kinds([PartyKind::Person]),
        item(ReferenceCategory::RoleTypes, "employer")
            .for_party_kinds([PartyKind::Organization]),
        item(ReferenceCategory::RoleTypes, "customer"),
        item(ReferenceCategory::AttributeTypes, "weight").with_detail(ItemDetail::AttributeType {
            value_type: ValueType::Decimal,
            unit_type: Some(UnitType::Mass),
        }),
        item(ReferenceCategory::AttributeTypes, "eye_color").with_detail(
            ItemDetail::AttributeType {
                value_type: ValueType::String,
                unit_type: None,
            },
        ),
        item(ReferenceCategory::AttributeTypes, "employee_count").with_detail(
            ItemDetail::AttributeType {
                value_type: ValueType::Integer,
                unit_type: None,
            },
        ),
        item(ReferenceCategory::PreferenceTypes, "correspondence_language").with_detail(
            ItemDetail::PreferenceType {
                value_type: ValueType::String,
            },
        ),
        item(ReferenceCategory::PhysicalAddressTypes, "STREET").with_detail(
            ItemDetail::PhysicalAddressType {
                required_fields: [
                    AddressField::StreetName,
                    AddressField::City,
                    AddressField::Country,
                    AddressField::PostalCode,
                ]
                .into_iter()
                .collect(),
                allowed_fields: [AddressField::HouseNumber, AddressField::StateOrProvince]
                    .into_iter()
                    .collect(),
            },
        ),
        item(ReferenceCategory::PhysicalAddressTypes, "PO_BOX").with_detail(
            ItemDetail::PhysicalAddressType {
                required_fields: [
                    AddressField::PoBox,
                    AddressField::City,
                    AddressField::Country,
                    AddressField::PostalCode,
                ]
                .into_iter()
                .collect(),
                allowed_fields: BTreeSet::new(),
            },
        ),
        item(ReferenceCategory::ContactMechanismTypes, "EMAIL"),
        item(ReferenceCategory::ContactMechanismTypes, "PHONE"),
        item(ReferenceCategory::ContactMechanismRoles, "WORK").with_detail(
            ItemDetail::ContactMechanismRole {
                mechanism_type: "PHONE".to_string(),
            },
        ),
        item(ReferenceCategory::IdentificationTypes, "PASSPORT")
            .for_party_kinds([PartyKind::Person]),
        item(ReferenceCategory::Genders, "FEMALE"),
        item(ReferenceCategory::Genders, "MALE"),
        item(ReferenceCategory::MaritalStatuses, "SINGLE"),
        item(ReferenceCategory::MaritalStatuses, "MARRIED"),
    ];
    items.push(
        item(ReferenceCategory::AttributeTypes, "vat_registered").with_detail(
            ItemDetail::AttributeType {
                value_type: ValueType::Boolean,
                unit_type: None,
            },
        ),
    );
    ReferenceDataSet {
        items,
        ..Default::default()
    }
}

fn engine_for(dataset: ReferenceDataSet) -> ValidationEngine {
    ValidationEngine::new(Arc::new(ReferenceStore::from_dataset(dataset)))
}

fn valid_person() -> Party {
    let mut party = Party::new_person("acme", "Ada", "Lovelace");
    if let Party::Person(person) = &mut party {
        person.birth_date = NaiveDate::from_ymd_opt(1815, 12, 10);
        person.gender = Some("FEMALE".to_string());
        person.marital_status = Some("SINGLE".to_string());
    }
    party
}

fn count_of_kind(violations: &BTreeSet<Violation>, kind: ViolationKind) -> usize {
    violations.iter().filter(|violation| violation.kind == kind).count()
}

#[test]
fn valid_person_has_no_violations() {
    let engine = engine_for(base_dataset());
    let violations = engine.validate(&valid_person()).unwrap();
    assert!(violations.is_empty(), "unexpected: {:?}", violations);
}

#[test]
fn required_violation_count_tracks_the_constraint_table() {
    // Register a block of REQUIRED constraints for one role and hold only
    // that role: the violation count must equal the table size exactly.
    let sizes = [50usize, 57];
    for size in sizes {
        let mut dataset = base_dataset();
        for i in 0..size {
            let attribute_type = format!("mandatory_{:02}", i);
            dataset.items.push(
                item(ReferenceCategory::AttributeTypes, &attribute_type).with_detail(
                    ItemDetail::AttributeType {
                        value_type: ValueType::String,
                        unit_type: None,
                    },
                ),
            );
            dataset.attribute_constraints.push(AttributeConstraint::new(
                "test_person_role",
                attribute_type,
                ConstraintRule::required(),
            ));
        }
        let engine = engine_for(dataset);

        let mut party = valid_person();
        party.common_mut().add_role(PartyRole::new("test_person_role"));

        let violations = engine.validate(&party).unwrap();
        assert_eq!(violations.len(), size);
        assert_eq!(count_of_kind(&violations, ViolationKind::Required), size);
    }
}

#[test]
fn constraints_of_other_roles_do_not_leak() {
    let mut dataset = base_dataset();
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "eye_color",
        ConstraintRule::required(),
    ));
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "employer",
        "employee_count",
        ConstraintRule::required(),
    ));
    let engine = engine_for(dataset);

    let mut party = valid_person();
    party.common_mut().add_role(PartyRole::new("test_person_role"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(violations.len(), 1);
    let violation = violations.iter().next().unwrap();
    assert_eq!(violation.path, "attributes[eye_color]");
}

#[test]
fn unit_mismatch_yields_exactly_one_extra_violation() {
    let engine = engine_for(base_dataset());

    let mut party = valid_person();
    party.common_mut().add_attribute(
        Attribute::decimal("weight", dec!(82.6)).with_unit(UnitOfMeasure::CustomaryFoot),
    );

    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::UnitMismatch), 1);
    assert_eq!(violations.len(), 1);

    // A correct unit clears it
    let mut party = valid_person();
    party
        .common_mut()
        .add_attribute(Attribute::decimal("weight", dec!(82.6)).with_unit(UnitOfMeasure::Kilogram));
    assert!(engine.validate(&party).unwrap().is_empty());
}

#[test]
fn street_address_missing_required_fields_yields_four_violations() {
    let engine = engine_for(base_dataset());

    let mut party = valid_person();
    party.common_mut().add_address(PhysicalAddress::new("STREET"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(violations.len(), 4);
    assert_eq!(count_of_kind(&violations, ViolationKind::Required), 4);
    for field in ["street_name", "city", "country", "postal_code"] {
        assert!(
            violations
                .iter()
                .any(|violation| violation.path == format!("addresses[0].{}", field)),
            "missing violation for {}",
            field
        );
    }
}

#[test]
fn populating_a_disallowed_field_adds_but_never_removes_violations() {
    let engine = engine_for(base_dataset());

    // Still missing all four required fields, now with a field STREET
    // addresses do not carry
    let mut party = valid_person();
    party
        .common_mut()
        .add_address(PhysicalAddress::new("STREET").with_po_box("PO 42"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::Required), 4);
    assert_eq!(count_of_kind(&violations, ViolationKind::FieldNotAllowed), 1);
    assert_eq!(violations.len(), 5);
}

#[test]
fn fully_populated_street_address_is_clean() {
    let engine = engine_for(base_dataset());

    let mut party = valid_person();
    party.common_mut().add_address(
        PhysicalAddress::new("STREET")
            .with_street_name("Main Street")
            .with_house_number("221b")
            .with_city("Springfield")
            .with_state_or_province("IL")
            .with_postal_code("12345")
            .with_country("US"),
    );

    assert!(engine.validate(&party).unwrap().is_empty());
}

#[test]
fn unknown_type_codes_are_reported_per_entry() {
    let engine = engine_for(base_dataset());

    let mut party = valid_person();
    party
        .common_mut()
        .add_attribute(Attribute::text("shoe_size", "43"));
    party
        .common_mut()
        .add_preference(Preference::text("favourite_color", "green"));
    party.common_mut().add_role(PartyRole::new("astronaut"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(violations.len(), 3);
    assert_eq!(count_of_kind(&violations, ViolationKind::UnknownTypeCode), 3);
}

#[test]
fn party_kind_restricts_type_codes() {
    let engine = engine_for(base_dataset());

    // employer is an organization role; a person holding it is invalid
    let mut party = valid_person();
    party.common_mut().add_role(PartyRole::new("employer"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::UnknownTypeCode), 1);

    let mut organization = Party::new_organization("acme", "Analytical Engines Ltd");
    organization.common_mut().add_role(PartyRole::new("employer"));
    assert!(engine.validate(&organization).unwrap().is_empty());
}

#[test]
fn value_type_mismatch_is_flagged() {
    let engine = engine_for(base_dataset());

    let mut party = valid_person();
    // employee_count declares integer values
    party
        .common_mut()
        .add_attribute(Attribute::text("employee_count", "fifteen"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::ValueTypeMismatch), 1);
}

#[test]
fn pattern_and_range_constraints_apply_through_roles() {
    let mut dataset = base_dataset();
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "eye_color",
        ConstraintRule::pattern("[a-z]+"),
    ));
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "weight",
        ConstraintRule::min_value(dec!(0.1)),
    ));
    dataset.preference_constraints.push(PreferenceConstraint::new(
        "test_person_role",
        "correspondence_language",
        ConstraintRule::max_size(2),
    ));
    let engine = engine_for(dataset);

    let mut party = valid_person();
    party.common_mut().add_role(PartyRole::new("test_person_role"));
    party
        .common_mut()
        .add_attribute(Attribute::text("eye_color", "GREEN"));
    party
        .common_mut()
        .add_attribute(Attribute::decimal("weight", dec!(0)).with_unit(UnitOfMeasure::Kilogram));
    party
        .common_mut()
        .add_preference(Preference::text("correspondence_language", "dutch"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::Pattern), 1);
    assert_eq!(count_of_kind(&violations, ViolationKind::MinValue), 1);
    assert_eq!(count_of_kind(&violations, ViolationKind::MaxSize), 1);
    assert_eq!(violations.len(), 3);
}

#[test]
fn reference_constraint_resolves_against_tenant_overlay() {
    let mut dataset = base_dataset();
    dataset.items.push(
        ReferenceItem::new(
            ReferenceCategory::SegmentTypes,
            "PREMIUM",
            locale(),
            Scope::tenant("acme"),
            "Premium",
        ),
    );
    dataset.items.push(item(ReferenceCategory::SegmentTypes, "RETAIL"));
    dataset.items.push(
        item(ReferenceCategory::AttributeTypes, "segment_code").with_detail(
            ItemDetail::AttributeType {
                value_type: ValueType::String,
                unit_type: None,
            },
        ),
    );
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "segment_code",
        ConstraintRule::reference("segment_types"),
    ));
    let engine = engine_for(dataset);

    // acme sees its overlay row, so PREMIUM is a valid code for acme
    let mut party = valid_person();
    party.common_mut().add_role(PartyRole::new("test_person_role"));
    party
        .common_mut()
        .add_attribute(Attribute::text("segment_code", "PREMIUM"));
    assert!(engine.validate(&party).unwrap().is_empty());

    // globex does not
    let mut party = Party::new_person("globex", "Grace", "Hopper");
    party.common_mut().add_role(PartyRole::new("test_person_role"));
    party
        .common_mut()
        .add_attribute(Attribute::text("segment_code", "PREMIUM"));
    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::Reference), 1);
}

#[test]
fn structural_violations_accumulate_with_other_phases() {
    let mut dataset = base_dataset();
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "weight",
        ConstraintRule::required(),
    ));
    let engine = engine_for(dataset);

    let mut party = Party::new_person("acme", "", "Lovelace");
    if let Party::Person(person) = &mut party {
        person.birth_date = NaiveDate::from_ymd_opt(2999, 1, 1);
    }
    party.common_mut().add_role(PartyRole::new("test_person_role"));
    party
        .common_mut()
        .add_contact_mechanism(ContactMechanism::email("not-an-email"));
    party.common_mut().add_identification(
        Identification::new("PASSPORT", "X1")
            .with_issue_date(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
            .with_expiry_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
    );

    let violations = engine.validate(&party).unwrap();
    // one per phase and field: empty first name, future birth date, bad
    // email, inverted dates, missing required weight
    assert_eq!(count_of_kind(&violations, ViolationKind::Required), 2);
    assert_eq!(count_of_kind(&violations, ViolationKind::InvalidDateRange), 2);
    assert_eq!(count_of_kind(&violations, ViolationKind::InvalidFormat), 1);
    assert_eq!(violations.len(), 5);
}

#[test]
fn contact_mechanism_role_is_checked_against_its_mechanism_type() {
    let engine = engine_for(base_dataset());

    // WORK is declared for PHONE mechanisms only
    let mut party = valid_person();
    party
        .common_mut()
        .add_contact_mechanism(ContactMechanism::phone("+15551234").with_role("WORK"));
    assert!(engine.validate(&party).unwrap().is_empty());

    let mut party = valid_person();
    party
        .common_mut()
        .add_contact_mechanism(ContactMechanism::email("ada@example.com").with_role("WORK"));
    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::UnknownTypeCode), 1);
}

#[test]
fn auxiliary_collections_validate_against_their_categories() {
    let mut dataset = base_dataset();
    dataset.items.push(item(ReferenceCategory::StatusTypes, "ACTIVE"));
    dataset.items.push(item(ReferenceCategory::LockTypes, "FRAUD_REVIEW"));
    dataset.items.push(item(ReferenceCategory::ConsentTypes, "MARKETING"));
    dataset.items.push(item(ReferenceCategory::TaxNumberTypes, "VAT"));
    dataset.items.push(item(ReferenceCategory::SegmentTypes, "RETAIL"));
    let engine = engine_for(dataset);

    use domain_party::{Consent, PartyLock, PartyStatus, SegmentAllocation, TaxNumber};

    let mut party = valid_person();
    party.common_mut().add_status(PartyStatus::new("ACTIVE"));
    party.common_mut().add_lock(PartyLock::new("FRAUD_REVIEW"));
    party.common_mut().add_consent(Consent::granted("MARKETING"));
    party
        .common_mut()
        .add_tax_number(TaxNumber::new("VAT", "GB123456789"));
    party
        .common_mut()
        .add_segment_allocation(SegmentAllocation::new("RETAIL"));
    assert!(engine.validate(&party).unwrap().is_empty());

    let mut party = valid_person();
    party.common_mut().add_status(PartyStatus::new("DORMANT"));
    party.common_mut().add_lock(PartyLock::new("UNKNOWN_LOCK"));
    party.common_mut().add_consent(Consent::withheld("TELEMETRY"));
    party
        .common_mut()
        .add_tax_number(TaxNumber::new("PAYROLL", "X"));
    party
        .common_mut()
        .add_segment_allocation(SegmentAllocation::new("WHOLESALE"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(count_of_kind(&violations, ViolationKind::UnknownTypeCode), 5);
    assert_eq!(violations.len(), 5);
}

#[test]
fn validation_locale_selects_the_localized_code_set() {
    use domain_party::ValidationContext;

    let dutch = LocaleId::parse("nl-NL").unwrap();
    let mut dataset = base_dataset();
    dataset.items.push(
        ReferenceItem::new(
            ReferenceCategory::MaritalStatuses,
            "SINGLE",
            dutch.clone(),
            Scope::Global,
            "Ongehuwd",
        ),
    );
    let engine = engine_for(dataset);

    // The Dutch localization carries the same code, so the Dutch context
    // accepts it
    let mut party = Party::new_person("acme", "Ada", "Lovelace");
    if let Party::Person(person) = &mut party {
        person.marital_status = Some("SINGLE".to_string());
    }
    let violations = engine
        .validate_with(&party, &ValidationContext::new(dutch))
        .unwrap();
    assert!(violations.is_empty(), "unexpected: {:?}", violations);
}

#[test]
fn validation_is_idempotent() {
    let mut dataset = base_dataset();
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "weight",
        ConstraintRule::required(),
    ));
    let engine = engine_for(dataset);

    let mut party = valid_person();
    party.common_mut().add_role(PartyRole::new("test_person_role"));
    party.common_mut().add_address(PhysicalAddress::new("STREET"));

    let first = engine.validate(&party).unwrap();
    let second = engine.validate(&party).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialization_round_trip_scores_identically() {
    let mut dataset = base_dataset();
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "weight",
        ConstraintRule::required(),
    ));
    let engine = engine_for(dataset);

    let mut party = valid_person();
    party.common_mut().add_role(PartyRole::new("test_person_role"));
    party
        .common_mut()
        .add_attribute(Attribute::text("eye_color", "green"));
    party.common_mut().add_address(PhysicalAddress::new("STREET"));

    let json = serde_json::to_string(&party).unwrap();
    let restored: Party = serde_json::from_str(&json).unwrap();

    assert_eq!(party, restored);
    assert_eq!(
        engine.validate(&party).unwrap(),
        engine.validate(&restored).unwrap()
    );
}

#[test]
fn removing_an_attribute_changes_exactly_one_required_violation() {
    let mut dataset = base_dataset();
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "weight",
        ConstraintRule::required(),
    ));
    dataset.attribute_constraints.push(AttributeConstraint::new(
        "test_person_role",
        "eye_color",
        ConstraintRule::required(),
    ));
    let engine = engine_for(dataset);

    let mut party = valid_person();
    party.common_mut().add_role(PartyRole::new("test_person_role"));
    party
        .common_mut()
        .add_attribute(Attribute::decimal("weight", dec!(82.6)).with_unit(UnitOfMeasure::Kilogram));
    party
        .common_mut()
        .add_attribute(Attribute::text("eye_color", "green"));

    assert!(engine.validate(&party).unwrap().is_empty());

    assert!(party.common_mut().remove_attribute_with_type("weight"));
    assert!(!party.common().has_attribute_with_type("weight"));

    let violations = engine.validate(&party).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(count_of_kind(&violations, ViolationKind::Required), 1);
}
