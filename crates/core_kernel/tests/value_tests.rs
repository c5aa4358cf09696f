//! Unit tests for the kernel value types
//!
//! Covers the typed value union, identifier behavior, tenancy scoping,
//! and locale handling through the public crate surface.

use core_kernel::{
    AssociationId, CoreError, LocaleId, PartyId, Scope, TenantId, TypedValue, UnitOfMeasure,
    UnitType, ValueType,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

mod identifier_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(PartyId::new(), PartyId::new());
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let first = PartyId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = PartyId::new_v7();
        let a: Uuid = first.into();
        let b: Uuid = second.into();
        assert!(a.as_bytes() < b.as_bytes());
    }

    #[test]
    fn test_prefixes_differ_per_entity() {
        assert_ne!(PartyId::prefix(), AssociationId::prefix());
        assert!(PartyId::new().to_string().starts_with("PTY-"));
    }

    #[test]
    fn test_prefixed_and_bare_forms_parse() {
        let id = PartyId::new();
        let prefixed: PartyId = id.to_string().parse().unwrap();
        let bare: PartyId = id.as_uuid().to_string().parse().unwrap();
        assert_eq!(prefixed, id);
        assert_eq!(bare, id);
    }
}

mod typed_value_tests {
    use super::*;

    #[test]
    fn test_decimal_magnitude_equality_across_renderings() {
        let a = TypedValue::decimal_from_str("82.6").unwrap();
        let b = TypedValue::Decimal(dec!(82.60));
        let c = TypedValue::decimal_from_str("82.600").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_every_constructor_lands_in_the_decimal_slot() {
        for value in [
            TypedValue::decimal(Decimal::new(5, 0)),
            TypedValue::decimal_from_i64(5),
            TypedValue::decimal_from_f64(5.0).unwrap(),
            TypedValue::decimal_from_str("5").unwrap(),
        ] {
            assert_eq!(value.value_type(), ValueType::Decimal);
            assert_eq!(value.decimal_value(), Some(dec!(5)));
        }
    }

    #[test]
    fn test_malformed_decimal_text_is_invalid_argument() {
        let err = TypedValue::decimal_from_str("eighty-two").unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    proptest! {
        #[test]
        fn prop_wrong_slot_always_reads_none(magnitude in -1_000_000i64..1_000_000) {
            let value = TypedValue::Integer(magnitude);
            prop_assert!(value.text().is_none());
            prop_assert!(value.boolean().is_none());
            prop_assert!(value.date().is_none());
            prop_assert!(value.double().is_none());
            prop_assert_eq!(value.integer(), Some(magnitude));
        }

        #[test]
        fn prop_numeric_value_unifies_integer_and_decimal(magnitude in -1_000_000i64..1_000_000) {
            let integer = TypedValue::Integer(magnitude);
            let decimal = TypedValue::decimal_from_i64(magnitude);
            prop_assert_eq!(integer.numeric_value(), decimal.numeric_value());
        }
    }
}

mod unit_tests {
    use super::*;

    #[test]
    fn test_units_group_into_kinds() {
        assert_eq!(UnitOfMeasure::Pound.unit_type(), UnitType::Mass);
        assert_eq!(UnitOfMeasure::CustomaryInch.unit_type(), UnitType::Length);
        assert_eq!(UnitOfMeasure::Liter.unit_type(), UnitType::Volume);
    }

    #[test]
    fn test_every_code_round_trips() {
        for unit in [
            UnitOfMeasure::Meter,
            UnitOfMeasure::Centimeter,
            UnitOfMeasure::CustomaryFoot,
            UnitOfMeasure::CustomaryInch,
            UnitOfMeasure::Kilogram,
            UnitOfMeasure::Gram,
            UnitOfMeasure::Pound,
            UnitOfMeasure::Liter,
            UnitOfMeasure::Milliliter,
            UnitOfMeasure::Second,
            UnitOfMeasure::Day,
            UnitOfMeasure::Celsius,
            UnitOfMeasure::Fahrenheit,
        ] {
            let parsed: UnitOfMeasure = unit.code().parse().unwrap();
            assert_eq!(parsed, unit);
        }
    }
}

mod tenancy_tests {
    use super::*;

    #[test]
    fn test_overlay_visibility_rules() {
        let acme = TenantId::new("acme");
        let globex = TenantId::new("globex");

        assert!(Scope::Global.is_visible_to(None));
        assert!(Scope::Global.is_visible_to(Some(&acme)));
        assert!(Scope::tenant("acme").is_visible_to(Some(&acme)));
        assert!(!Scope::tenant("acme").is_visible_to(Some(&globex)));
        assert!(!Scope::tenant("acme").is_visible_to(None));
    }

    #[test]
    fn test_scope_serializes_as_optional_tenant() {
        assert_eq!(serde_json::to_string(&Scope::Global).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Scope::tenant("acme")).unwrap(),
            "\"acme\""
        );
    }
}

mod locale_tests {
    use super::*;

    #[test]
    fn test_locale_parse_and_default() {
        assert_eq!(LocaleId::parse("EN-us").unwrap().to_string(), "en-US");
        assert_eq!(LocaleId::default_locale().to_string(), "en-US");
    }

    #[test]
    fn test_malformed_locale_fails_before_any_lookup() {
        assert!(matches!(
            LocaleId::parse("no such locale"),
            Err(CoreError::InvalidArgument(_))
        ));
    }
}
