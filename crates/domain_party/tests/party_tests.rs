//! Party aggregate integration tests

use chrono::NaiveDate;
use core_kernel::{PartyKind, TypedValue, UnitOfMeasure};
use domain_party::{
    Association, Attribute, ContactMechanism, ExternalReference, Identification, Mandate, Party,
    PartyLock, PartyRole, PhysicalAddress, Preference, Property, TaxNumber,
};
use rust_decimal_macros::dec;

fn sample_person() -> Party {
    let mut party = Party::new_person("acme", "Ada", "Lovelace");
    if let Party::Person(person) = &mut party {
        person.birth_date = NaiveDate::from_ymd_opt(1815, 12, 10);
    }
    party
}

#[test]
fn person_and_organization_report_their_kind() {
    assert_eq!(sample_person().kind(), PartyKind::Person);
    let organization = Party::new_organization("acme", "Analytical Engines Ltd");
    assert_eq!(organization.kind(), PartyKind::Organization);
    assert_eq!(organization.tenant().as_str(), "acme");
}

#[test]
fn kind_accessors_return_the_concrete_variant() {
    let person = sample_person();
    assert!(person.as_person().is_some());
    assert!(person.as_organization().is_none());

    let organization = Party::new_organization("acme", "Analytical Engines Ltd")
        .as_organization()
        .map(|organization| organization.legal_name.clone());
    assert_eq!(organization.as_deref(), Some("Analytical Engines Ltd"));
}

#[test]
fn attribute_constructors_pick_the_matching_slot() {
    let birthday = NaiveDate::from_ymd_opt(1815, 12, 10).unwrap();
    let entries = [
        (Attribute::boolean("vat_registered", true), "boolean"),
        (Attribute::date("joined_on", birthday), "date"),
        (Attribute::integer("employee_count", 42), "integer"),
        (Attribute::double("response_rate", 0.87), "double"),
        (Attribute::text("eye_color", "green"), "string"),
    ];
    for (attribute, expected) in entries {
        let value = attribute.value.expect("constructor sets a value");
        assert_eq!(value.value_type().to_string(), expected);
    }
}

#[test]
fn collections_are_reachable_through_the_shared_part() {
    let mut party = sample_person();
    let common = party.common_mut();

    common.add_attribute(Attribute::decimal("weight", dec!(82.6)).with_unit(UnitOfMeasure::Kilogram));
    common.add_preference(Preference::text("correspondence_language", "en"));
    common.add_contact_mechanism(ContactMechanism::email("ada@example.com").as_preferred());
    common.add_address(
        PhysicalAddress::new("STREET")
            .with_street_name("Main Street")
            .with_city("Springfield")
            .as_primary(),
    );
    common.add_identification(Identification::new("PASSPORT", "X123").with_country_of_issue("GB"));
    common.add_role(PartyRole::new("customer"));
    common.add_tax_number(TaxNumber::new("VAT", "GB123456789").with_country("GB"));
    common.add_lock(PartyLock::new("FRAUD_REVIEW").with_reason("manual check"));
    common.add_external_reference(ExternalReference::new("legacy_crm", "CUST-0042"));

    assert!(common.has_attribute_with_type("weight"));
    assert!(common.has_preference_with_type("correspondence_language"));
    assert!(common.primary_address().is_some());
    assert!(common.has_active_role("customer"));
    assert!(common.is_locked());
    assert!(common.remove_lock("FRAUD_REVIEW"));
    assert!(!common.is_locked());
}

#[test]
fn removal_reduces_serialized_count_by_exactly_one() {
    let mut party = sample_person();
    party.common_mut().add_attribute(Attribute::text("eye_color", "green"));
    party
        .common_mut()
        .add_attribute(Attribute::decimal("weight", dec!(82.6)));

    let before = serde_json::to_value(&party).unwrap();
    let attribute_count = |value: &serde_json::Value| {
        value["common"]["attributes"].as_array().map_or(0, Vec::len)
    };
    assert_eq!(attribute_count(&before), 2);

    assert!(party.common_mut().remove_attribute_with_type("eye_color"));
    let after = serde_json::to_value(&party).unwrap();
    assert_eq!(attribute_count(&after), 1);
    assert!(!party.common().has_attribute_with_type("eye_color"));
}

#[test]
fn snapshot_round_trip_reproduces_the_aggregate() {
    let mut party = sample_person();
    party
        .common_mut()
        .add_attribute(Attribute::decimal("weight", dec!(82.60)));
    party
        .common_mut()
        .add_role(PartyRole::new("customer"));

    let json = serde_json::to_string(&party).unwrap();
    let restored: Party = serde_json::from_str(&json).unwrap();
    assert_eq!(party, restored);

    // Decimal values survive with numeric equality regardless of rendering
    let weight = restored
        .common()
        .attribute_with_type("weight")
        .and_then(|attribute| attribute.value.clone());
    assert_eq!(weight, Some(TypedValue::Decimal(dec!(82.6))));
}

#[test]
fn association_properties_support_the_full_operation_set() {
    let owner = sample_person();
    let company = Party::new_organization("acme", "Analytical Engines Ltd");
    let mut association =
        Association::new("acme", "employment", owner.id(), company.id());

    association.set_property_value("job_title", TypedValue::Text("Engineer".into()));
    association.add_property(Property::integer("hours_per_week", 38));
    assert!(association.has_property_with_type("job_title"));
    assert_eq!(association.properties.len(), 2);

    assert!(association.remove_property_with_type("hours_per_week"));
    assert!(!association.has_property_with_type("hours_per_week"));
    assert_eq!(association.properties.len(), 1);
}

#[test]
fn mandate_carries_its_own_type_and_parties() {
    let account_holder = sample_person();
    let broker = Party::new_organization("acme", "Broker BV");
    let mut mandate = Mandate::new(
        "acme",
        "payment_mandate",
        account_holder.id(),
        broker.id(),
    );
    mandate.add_property(Property::text("iban", "NL91ABNA0417164300"));

    assert!(mandate.is_active());
    assert_eq!(mandate.party, account_holder.id());
    assert_eq!(mandate.authorized_party, broker.id());
    assert!(mandate.has_property_with_type("iban"));
}
