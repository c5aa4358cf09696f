//! Units of measure for quantitative attributes
//!
//! Attribute types can declare the kind of unit their values carry (a weight
//! attribute declares `Mass`); the unit stored on an attribute must belong
//! to that kind. The unit list is a closed set of codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The kind of quantity a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Length,
    Mass,
    Volume,
    Duration,
    Temperature,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            UnitType::Length => "length",
            UnitType::Mass => "mass",
            UnitType::Volume => "volume",
            UnitType::Duration => "duration",
            UnitType::Temperature => "temperature",
        };
        write!(f, "{}", code)
    }
}

/// A concrete unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitOfMeasure {
    Meter,
    Centimeter,
    CustomaryFoot,
    CustomaryInch,
    Kilogram,
    Gram,
    Pound,
    Liter,
    Milliliter,
    Second,
    Day,
    Celsius,
    Fahrenheit,
}

impl UnitOfMeasure {
    /// Returns the kind of quantity this unit measures
    pub fn unit_type(&self) -> UnitType {
        match self {
            UnitOfMeasure::Meter
            | UnitOfMeasure::Centimeter
            | UnitOfMeasure::CustomaryFoot
            | UnitOfMeasure::CustomaryInch => UnitType::Length,
            UnitOfMeasure::Kilogram | UnitOfMeasure::Gram | UnitOfMeasure::Pound => UnitType::Mass,
            UnitOfMeasure::Liter | UnitOfMeasure::Milliliter => UnitType::Volume,
            UnitOfMeasure::Second | UnitOfMeasure::Day => UnitType::Duration,
            UnitOfMeasure::Celsius | UnitOfMeasure::Fahrenheit => UnitType::Temperature,
        }
    }

    /// Returns the wire code for this unit
    pub fn code(&self) -> &'static str {
        match self {
            UnitOfMeasure::Meter => "METER",
            UnitOfMeasure::Centimeter => "CENTIMETER",
            UnitOfMeasure::CustomaryFoot => "CUSTOMARY_FOOT",
            UnitOfMeasure::CustomaryInch => "CUSTOMARY_INCH",
            UnitOfMeasure::Kilogram => "KILOGRAM",
            UnitOfMeasure::Gram => "GRAM",
            UnitOfMeasure::Pound => "POUND",
            UnitOfMeasure::Liter => "LITER",
            UnitOfMeasure::Milliliter => "MILLILITER",
            UnitOfMeasure::Second => "SECOND",
            UnitOfMeasure::Day => "DAY",
            UnitOfMeasure::Celsius => "CELSIUS",
            UnitOfMeasure::Fahrenheit => "FAHRENHEIT",
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for UnitOfMeasure {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "METER" => Ok(UnitOfMeasure::Meter),
            "CENTIMETER" => Ok(UnitOfMeasure::Centimeter),
            "CUSTOMARY_FOOT" => Ok(UnitOfMeasure::CustomaryFoot),
            "CUSTOMARY_INCH" => Ok(UnitOfMeasure::CustomaryInch),
            "KILOGRAM" => Ok(UnitOfMeasure::Kilogram),
            "GRAM" => Ok(UnitOfMeasure::Gram),
            "POUND" => Ok(UnitOfMeasure::Pound),
            "LITER" => Ok(UnitOfMeasure::Liter),
            "MILLILITER" => Ok(UnitOfMeasure::Milliliter),
            "SECOND" => Ok(UnitOfMeasure::Second),
            "DAY" => Ok(UnitOfMeasure::Day),
            "CELSIUS" => Ok(UnitOfMeasure::Celsius),
            "FAHRENHEIT" => Ok(UnitOfMeasure::Fahrenheit),
            other => Err(CoreError::invalid_argument(format!(
                "unknown unit of measure: {}",
                other
            ))),
        }
    }
}
