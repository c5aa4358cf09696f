//! Typed attribute values
//!
//! Attributes, preferences, and association/mandate properties all carry one
//! value out of a closed set of representations. The value is a single
//! tagged union, so "exactly one active representation" is structural: there
//! is one tag and one payload, and reading through the wrong accessor yields
//! `None` rather than an error.
//!
//! Decimal values are held as arbitrary-precision [`Decimal`] regardless of
//! how they were supplied (integer, float, string, or decimal), and compare
//! by numeric value: `"82.6"` equals `82.60`.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::CoreError;

/// The concrete kind of a party
///
/// Lives in the kernel so reference rows can declare applicability without
/// depending on the party aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    Person,
    Organization,
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyKind::Person => write!(f, "person"),
            PartyKind::Organization => write!(f, "organization"),
        }
    }
}

/// The declared value representation of an attribute or preference type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Boolean,
    Date,
    Decimal,
    Double,
    Integer,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::Decimal => "decimal",
            ValueType::Double => "double",
            ValueType::Integer => "integer",
            ValueType::String => "string",
        };
        write!(f, "{}", code)
    }
}

/// A typed attribute value
///
/// One tag, one payload. Accessors for the five non-matching slots return
/// `None`, mirroring the "wrong slot reads as null" contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Boolean(bool),
    Date(NaiveDate),
    Decimal(Decimal),
    Double(f64),
    Integer(i64),
    Text(String),
}

impl TypedValue {
    /// Creates a decimal value from anything convertible to `Decimal`
    pub fn decimal(value: impl Into<Decimal>) -> Self {
        TypedValue::Decimal(value.into())
    }

    /// Creates a decimal value from an integer magnitude
    pub fn decimal_from_i64(value: i64) -> Self {
        TypedValue::Decimal(Decimal::from(value))
    }

    /// Creates a decimal value from a float, preserving the numeric magnitude
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the float has no decimal representation
    /// (NaN or infinite).
    pub fn decimal_from_f64(value: f64) -> Result<Self, CoreError> {
        Decimal::from_f64(value)
            .map(TypedValue::Decimal)
            .ok_or_else(|| {
                CoreError::invalid_argument(format!("{} cannot be represented as a decimal", value))
            })
    }

    /// Creates a decimal value from its textual form
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the text does not parse as a decimal.
    pub fn decimal_from_str(value: &str) -> Result<Self, CoreError> {
        value
            .parse::<Decimal>()
            .map(TypedValue::Decimal)
            .map_err(|_| CoreError::invalid_argument(format!("not a decimal: {}", value)))
    }

    /// Returns the declared representation of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedValue::Boolean(_) => ValueType::Boolean,
            TypedValue::Date(_) => ValueType::Date,
            TypedValue::Decimal(_) => ValueType::Decimal,
            TypedValue::Double(_) => ValueType::Double,
            TypedValue::Integer(_) => ValueType::Integer,
            TypedValue::Text(_) => ValueType::String,
        }
    }

    /// Reads the boolean slot
    pub fn boolean(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads the date slot
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            TypedValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Reads the decimal slot
    pub fn decimal_value(&self) -> Option<Decimal> {
        match self {
            TypedValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Reads the double slot
    pub fn double(&self) -> Option<f64> {
        match self {
            TypedValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Reads the integer slot
    pub fn integer(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Reads the text slot
    pub fn text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Unifies the three numeric representations for range comparison
    ///
    /// Returns `None` for non-numeric values and for floats with no decimal
    /// representation.
    pub fn numeric_value(&self) -> Option<Decimal> {
        match self {
            TypedValue::Decimal(d) => Some(*d),
            TypedValue::Integer(i) => Some(Decimal::from(*i)),
            TypedValue::Double(d) => Decimal::from_f64(*d),
            _ => None,
        }
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypedValue::Boolean(a), TypedValue::Boolean(b)) => a == b,
            (TypedValue::Date(a), TypedValue::Date(b)) => a == b,
            // Decimal equality is numeric, not textual: 82.6 == 82.60
            (TypedValue::Decimal(a), TypedValue::Decimal(b)) => a == b,
            (TypedValue::Double(a), TypedValue::Double(b)) => a == b,
            (TypedValue::Integer(a), TypedValue::Integer(b)) => a == b,
            (TypedValue::Text(a), TypedValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for TypedValue {
    /// Orders within a representation; the three numeric representations
    /// compare against each other through their decimal magnitude.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (TypedValue::Boolean(a), TypedValue::Boolean(b)) => a.partial_cmp(b),
            (TypedValue::Date(a), TypedValue::Date(b)) => a.partial_cmp(b),
            (TypedValue::Text(a), TypedValue::Text(b)) => a.partial_cmp(b),
            _ => match (self.numeric_value(), other.numeric_value()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }
}

impl fmt::Display for TypedValue {
    /// Canonical text form, used by pattern and reference constraints
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            TypedValue::Decimal(d) => write!(f, "{}", d),
            TypedValue::Double(d) => write!(f, "{}", d),
            TypedValue::Integer(i) => write!(f, "{}", i),
            TypedValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl From<NaiveDate> for TypedValue {
    fn from(value: NaiveDate) -> Self {
        TypedValue::Date(value)
    }
}

impl From<Decimal> for TypedValue {
    fn from(value: Decimal) -> Self {
        TypedValue::Decimal(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Integer(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Text(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}
