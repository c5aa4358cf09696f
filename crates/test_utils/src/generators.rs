//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants, plus fake-backed name generation.

use fake::faker::company::en::CompanyName;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{TypedValue, UnitOfMeasure};

/// Strategy for reference-style codes (lower snake case)
pub fn code_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{2,14}"
}

/// Strategy for decimal magnitudes with varying scale
pub fn decimal_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64, 0u32..6)
        .prop_map(|(magnitude, scale)| Decimal::new(magnitude, scale))
}

/// Strategy producing the same decimal in two textual renderings
///
/// Useful for checking that equality is numeric, never textual.
pub fn decimal_text_pair_strategy() -> impl Strategy<Value = (String, String)> {
    decimal_strategy().prop_map(|decimal| {
        let plain = decimal.to_string();
        let padded = if plain.contains('.') {
            format!("{}0", plain)
        } else {
            format!("{}.0", plain)
        };
        (plain, padded)
    })
}

/// Strategy over every typed value representation
pub fn typed_value_strategy() -> impl Strategy<Value = TypedValue> {
    prop_oneof![
        any::<bool>().prop_map(TypedValue::Boolean),
        (1970i32..2100, 1u32..13, 1u32..29).prop_map(|(y, m, d)| {
            TypedValue::Date(chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap())
        }),
        decimal_strategy().prop_map(TypedValue::Decimal),
        (-1_000_000.0f64..1_000_000.0).prop_map(TypedValue::Double),
        any::<i64>().prop_map(TypedValue::Integer),
        "[a-zA-Z ]{0,24}".prop_map(TypedValue::Text),
    ]
}

/// Strategy over the unit list
pub fn unit_strategy() -> impl Strategy<Value = UnitOfMeasure> {
    prop_oneof![
        Just(UnitOfMeasure::Meter),
        Just(UnitOfMeasure::Centimeter),
        Just(UnitOfMeasure::CustomaryFoot),
        Just(UnitOfMeasure::CustomaryInch),
        Just(UnitOfMeasure::Kilogram),
        Just(UnitOfMeasure::Gram),
        Just(UnitOfMeasure::Pound),
        Just(UnitOfMeasure::Liter),
        Just(UnitOfMeasure::Milliliter),
        Just(UnitOfMeasure::Second),
        Just(UnitOfMeasure::Day),
        Just(UnitOfMeasure::Celsius),
        Just(UnitOfMeasure::Fahrenheit),
    ]
}

/// A generated person name pair
pub fn fake_person_name() -> (String, String) {
    (FirstName().fake(), LastName().fake())
}

/// A generated organization name
pub fn fake_company_name() -> String {
    CompanyName().fake()
}
