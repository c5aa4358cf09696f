//! Typed attributes and properties
//!
//! An attribute binds a type code to at most one typed value and an
//! optional unit. The same shape, keyed differently, appears on
//! associations and mandates as a property.
//!
//! Decimal values always end up in the precision-preserving representation
//! no matter how they were supplied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, TypedValue, UnitOfMeasure};

/// A typed attribute of a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute type code, defined in reference data
    pub attribute_type: String,
    /// The current value; an attribute can exist without one
    pub value: Option<TypedValue>,
    /// Unit of the value, for quantitative attribute types
    pub unit: Option<UnitOfMeasure>,
}

impl Attribute {
    /// Creates an attribute with no value yet
    pub fn new(attribute_type: impl Into<String>) -> Self {
        Self {
            attribute_type: attribute_type.into(),
            value: None,
            unit: None,
        }
    }

    pub fn boolean(attribute_type: impl Into<String>, value: bool) -> Self {
        Self::new(attribute_type).with_value(TypedValue::Boolean(value))
    }

    pub fn date(attribute_type: impl Into<String>, value: chrono::NaiveDate) -> Self {
        Self::new(attribute_type).with_value(TypedValue::Date(value))
    }

    pub fn integer(attribute_type: impl Into<String>, value: i64) -> Self {
        Self::new(attribute_type).with_value(TypedValue::Integer(value))
    }

    pub fn double(attribute_type: impl Into<String>, value: f64) -> Self {
        Self::new(attribute_type).with_value(TypedValue::Double(value))
    }

    pub fn text(attribute_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(attribute_type).with_value(TypedValue::Text(value.into()))
    }

    pub fn decimal(attribute_type: impl Into<String>, value: Decimal) -> Self {
        Self::new(attribute_type).with_value(TypedValue::Decimal(value))
    }

    /// Creates a decimal attribute from an integer magnitude
    pub fn decimal_from_i64(attribute_type: impl Into<String>, value: i64) -> Self {
        Self::new(attribute_type).with_value(TypedValue::decimal_from_i64(value))
    }

    /// Creates a decimal attribute from a float magnitude
    pub fn decimal_from_f64(
        attribute_type: impl Into<String>,
        value: f64,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(attribute_type).with_value(TypedValue::decimal_from_f64(value)?))
    }

    /// Creates a decimal attribute from its textual form
    pub fn decimal_from_str(
        attribute_type: impl Into<String>,
        value: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(attribute_type).with_value(TypedValue::decimal_from_str(value)?))
    }

    pub fn with_value(mut self, value: TypedValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_unit(mut self, unit: UnitOfMeasure) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Whether the attribute currently carries a value
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// A typed property of an association or mandate
///
/// Same value semantics as [`Attribute`]; the distinction keeps the two
/// constraint tables (role-keyed versus association/mandate-keyed) from
/// mixing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// The property type code, defined in reference data
    pub property_type: String,
    pub value: Option<TypedValue>,
    pub unit: Option<UnitOfMeasure>,
}

impl Property {
    pub fn new(property_type: impl Into<String>) -> Self {
        Self {
            property_type: property_type.into(),
            value: None,
            unit: None,
        }
    }

    pub fn text(property_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property_type).with_value(TypedValue::Text(value.into()))
    }

    pub fn integer(property_type: impl Into<String>, value: i64) -> Self {
        Self::new(property_type).with_value(TypedValue::Integer(value))
    }

    pub fn decimal_from_str(
        property_type: impl Into<String>,
        value: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(property_type).with_value(TypedValue::decimal_from_str(value)?))
    }

    pub fn with_value(mut self, value: TypedValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_unit(mut self, unit: UnitOfMeasure) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}
