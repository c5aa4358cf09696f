//! Pre-built Test Fixtures
//!
//! Ready-to-use reference datasets and parties, consistent and predictable
//! across the test suite. The standard dataset carries two locales and one
//! tenant overlay so overlay and fallback behavior is exercisable without
//! per-test setup.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeSet;

use core_kernel::{LocaleId, PartyKind, Scope, UnitType, ValueType};
use domain_party::{Attribute, Organization, Party, PartyRole, Person};
use domain_reference::{
    AddressField, AttributeConstraint, ConstraintRule, ItemDetail, ReferenceCategory,
    ReferenceDataSet, ReferenceItem,
};
use rust_decimal_macros::dec;

/// Fixture for reference data
pub struct ReferenceFixtures;

impl ReferenceFixtures {
    /// The locale every standard row is localized for
    pub fn locale() -> LocaleId {
        LocaleId::default_locale()
    }

    /// A second locale carried by a subset of the standard rows
    pub fn dutch() -> LocaleId {
        LocaleId::parse("nl-NL").expect("fixture locale is well-formed")
    }

    /// The tenant owning the overlay rows of the standard dataset
    pub fn overlay_tenant() -> &'static str {
        "acme"
    }

    fn global(category: ReferenceCategory, code: &str) -> ReferenceItem {
        ReferenceItem::new(category, code, Self::locale(), Scope::Global, code)
    }

    /// The standard dataset: global rows in two locales plus an `acme`
    /// overlay on the marital status list
    pub fn standard_dataset() -> ReferenceDataSet {
        let items = vec![
            // role types
            Self::global(ReferenceCategory::RoleTypes, "customer"),
            Self::global(ReferenceCategory::RoleTypes, "test_person_role")
                .for_party_kinds([PartyKind::Person]),
            Self::global(ReferenceCategory::RoleTypes, "employer")
                .for_party_kinds([PartyKind::Organization]),
            // attribute types
            Self::global(ReferenceCategory::AttributeTypes, "weight").with_detail(
                ItemDetail::AttributeType {
                    value_type: ValueType::Decimal,
                    unit_type: Some(UnitType::Mass),
                },
            ),
            Self::global(ReferenceCategory::AttributeTypes, "eye_color").with_detail(
                ItemDetail::AttributeType {
                    value_type: ValueType::String,
                    unit_type: None,
                },
            ),
            Self::global(ReferenceCategory::AttributeTypes, "employee_count").with_detail(
                ItemDetail::AttributeType {
                    value_type: ValueType::Integer,
                    unit_type: None,
                },
            ),
            // preference types
            Self::global(ReferenceCategory::PreferenceTypes, "correspondence_language")
                .with_detail(ItemDetail::PreferenceType {
                    value_type: ValueType::String,
                }),
            // genders and marital statuses, with sort indexes
            Self::global(ReferenceCategory::Genders, "FEMALE").with_sort_index(1),
            Self::global(ReferenceCategory::Genders, "MALE").with_sort_index(2),
            Self::global(ReferenceCategory::MaritalStatuses, "SINGLE").with_sort_index(1),
            Self::global(ReferenceCategory::MaritalStatuses, "MARRIED").with_sort_index(2),
            ReferenceItem::new(
                ReferenceCategory::MaritalStatuses,
                "COHABITING",
                Self::locale(),
                Scope::tenant(Self::overlay_tenant()),
                "Cohabiting",
            ),
            // a Dutch localization of the marital statuses
            ReferenceItem::new(
                ReferenceCategory::MaritalStatuses,
                "SINGLE",
                Self::dutch(),
                Scope::Global,
                "Ongehuwd",
            )
            .with_sort_index(1),
            ReferenceItem::new(
                ReferenceCategory::MaritalStatuses,
                "MARRIED",
                Self::dutch(),
                Scope::Global,
                "Gehuwd",
            )
            .with_sort_index(2),
            // contact mechanisms and their roles
            Self::global(ReferenceCategory::ContactMechanismTypes, "EMAIL"),
            Self::global(ReferenceCategory::ContactMechanismTypes, "PHONE"),
            Self::global(ReferenceCategory::ContactMechanismRoles, "WORK").with_detail(
                ItemDetail::ContactMechanismRole {
                    mechanism_type: "PHONE".to_string(),
                },
            ),
            // identifications
            Self::global(ReferenceCategory::IdentificationTypes, "PASSPORT")
                .with_description("Machine-readable travel document")
                .for_party_kinds([PartyKind::Person]),
            // address shapes
            Self::global(ReferenceCategory::PhysicalAddressTypes, "STREET").with_detail(
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
            Self::global(ReferenceCategory::PhysicalAddressTypes, "PO_BOX").with_detail(
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
            // remaining code lists
            Self::global(ReferenceCategory::StatusTypes, "ACTIVE"),
            Self::global(ReferenceCategory::LockTypes, "FRAUD_REVIEW"),
            Self::global(ReferenceCategory::TaxNumberTypes, "VAT"),
            Self::global(ReferenceCategory::ConsentTypes, "MARKETING"),
            Self::global(ReferenceCategory::SegmentTypes, "RETAIL"),
            Self::global(ReferenceCategory::AssociationTypes, "employment"),
            Self::global(ReferenceCategory::MandateTypes, "payment_mandate"),
            Self::global(ReferenceCategory::AttributeTypes, "job_title").with_detail(
                ItemDetail::AttributeType {
                    value_type: ValueType::String,
                    unit_type: None,
                },
            ),
        ];
        ReferenceDataSet {
            items,
            ..Default::default()
        }
    }

    /// The standard dataset plus a block of REQUIRED attribute constraints
    /// for the given role; the block size is what tests track
    pub fn dataset_with_required_block(role_type: &str, size: usize) -> ReferenceDataSet {
        let mut dataset = Self::standard_dataset();
        for i in 0..size {
            let attribute_type = format!("mandatory_{:02}", i);
            dataset.items.push(
                Self::global(ReferenceCategory::AttributeTypes, &attribute_type).with_detail(
                    ItemDetail::AttributeType {
                        value_type: ValueType::String,
                        unit_type: None,
                    },
                ),
            );
            dataset.attribute_constraints.push(AttributeConstraint::new(
                role_type,
                attribute_type,
                ConstraintRule::required(),
            ));
        }
        dataset
    }

}

/// Fixture for parties
pub struct PartyFixtures;

impl PartyFixtures {
    /// A structurally valid person under the overlay tenant
    pub fn valid_person() -> Party {
        Person::new(ReferenceFixtures::overlay_tenant(), "Ada", "Lovelace")
            .with_birth_date(NaiveDate::from_ymd_opt(1815, 12, 10).expect("fixture date is valid"))
            .with_gender("FEMALE")
            .with_marital_status("SINGLE")
            .with_nationality("GB")
            .into()
    }

    /// A structurally valid organization under the overlay tenant
    pub fn valid_organization() -> Party {
        Organization::new(ReferenceFixtures::overlay_tenant(), "Analytical Engines Ltd")
            .with_registration_number("REG-1843")
            .with_legal_form("Ltd")
            .with_incorporation_date(
                NaiveDate::from_ymd_opt(1843, 7, 1).expect("fixture date is valid"),
            )
            .with_incorporation_country("GB")
            .into()
    }

    /// A person holding a role, with one weight attribute set
    pub fn person_with_role(role_type: &str) -> Party {
        let mut party = Self::valid_person();
        party.common_mut().add_role(PartyRole::new(role_type));
        party.common_mut().add_attribute(
            Attribute::decimal("weight", dec!(82.6))
                .with_unit(core_kernel::UnitOfMeasure::Kilogram),
        );
        party
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Start of the fixture day
    pub fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap()
    }

    /// Midday of the fixture day
    pub fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// End of the fixture day
    pub fn evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap()
    }
}
