//! Constraint rows
//!
//! Business rules are data, not code: each row binds a rule to a lookup key
//! (a role type, an association type, or a mandate type) and a target
//! attribute, preference, or property type. The evaluator in
//! [`crate::engine`] interprets the closed set of rule kinds.
//!
//! Constraint rows are tenant-agnostic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of check a constraint row expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    /// The target must carry a value
    Required,
    /// The target's string form must fully match a regular expression
    Pattern,
    /// The target's value must be a valid code in a named reference category
    Reference,
    /// The target's text must not exceed a character count
    MaxSize,
    /// The target's numeric value must not be below a bound
    MinValue,
    /// The target's numeric value must not exceed a bound
    MaxValue,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ConstraintKind::Required => "REQUIRED",
            ConstraintKind::Pattern => "PATTERN",
            ConstraintKind::Reference => "REFERENCE",
            ConstraintKind::MaxSize => "MAX_SIZE",
            ConstraintKind::MinValue => "MIN_VALUE",
            ConstraintKind::MaxValue => "MAX_VALUE",
        };
        write!(f, "{}", code)
    }
}

/// The rule part shared by every constraint table
///
/// `qualifier` distinguishes several rules on the same (key, target) pair
/// and participates in row identity; it is not a lookup filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRule {
    pub qualifier: Option<String>,
    pub kind: ConstraintKind,
    /// Kind-specific operand: the pattern, the referenced category name,
    /// or the numeric/size bound. `Required` carries none.
    pub value: Option<String>,
}

impl ConstraintRule {
    pub fn required() -> Self {
        Self {
            qualifier: None,
            kind: ConstraintKind::Required,
            value: None,
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            kind: ConstraintKind::Pattern,
            value: Some(pattern.into()),
        }
    }

    pub fn reference(category_code: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            kind: ConstraintKind::Reference,
            value: Some(category_code.into()),
        }
    }

    pub fn max_size(size: usize) -> Self {
        Self {
            qualifier: None,
            kind: ConstraintKind::MaxSize,
            value: Some(size.to_string()),
        }
    }

    pub fn min_value(bound: impl fmt::Display) -> Self {
        Self {
            qualifier: None,
            kind: ConstraintKind::MinValue,
            value: Some(bound.to_string()),
        }
    }

    pub fn max_value(bound: impl fmt::Display) -> Self {
        Self {
            qualifier: None,
            kind: ConstraintKind::MaxValue,
            value: Some(bound.to_string()),
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}

/// A rule on an attribute of parties holding a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeConstraint {
    pub role_type: String,
    pub attribute_type: String,
    #[serde(flatten)]
    pub rule: ConstraintRule,
}

impl AttributeConstraint {
    pub fn new(
        role_type: impl Into<String>,
        attribute_type: impl Into<String>,
        rule: ConstraintRule,
    ) -> Self {
        Self {
            role_type: role_type.into(),
            attribute_type: attribute_type.into(),
            rule,
        }
    }
}

/// A rule on a preference of parties holding a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceConstraint {
    pub role_type: String,
    pub preference_type: String,
    #[serde(flatten)]
    pub rule: ConstraintRule,
}

impl PreferenceConstraint {
    pub fn new(
        role_type: impl Into<String>,
        preference_type: impl Into<String>,
        rule: ConstraintRule,
    ) -> Self {
        Self {
            role_type: role_type.into(),
            preference_type: preference_type.into(),
            rule,
        }
    }
}

/// A rule on a property of associations of a given type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationPropertyConstraint {
    pub association_type: String,
    pub property_type: String,
    #[serde(flatten)]
    pub rule: ConstraintRule,
}

impl AssociationPropertyConstraint {
    pub fn new(
        association_type: impl Into<String>,
        property_type: impl Into<String>,
        rule: ConstraintRule,
    ) -> Self {
        Self {
            association_type: association_type.into(),
            property_type: property_type.into(),
            rule,
        }
    }
}

/// A rule on a property of mandates of a given type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatePropertyConstraint {
    pub mandate_type: String,
    pub property_type: String,
    #[serde(flatten)]
    pub rule: ConstraintRule,
}

impl MandatePropertyConstraint {
    pub fn new(
        mandate_type: impl Into<String>,
        property_type: impl Into<String>,
        rule: ConstraintRule,
    ) -> Self {
        Self {
            mandate_type: mandate_type.into(),
            property_type: property_type.into(),
            rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_constructors_carry_operands() {
        assert_eq!(ConstraintRule::required().value, None);
        assert_eq!(
            ConstraintRule::max_size(64).value.as_deref(),
            Some("64")
        );
        assert_eq!(
            ConstraintRule::reference("marital_statuses").value.as_deref(),
            Some("marital_statuses")
        );
    }

    #[test]
    fn test_kind_serde_codes() {
        let json = serde_json::to_string(&ConstraintKind::MinValue).unwrap();
        assert_eq!(json, "\"MIN_VALUE\"");
    }

    #[test]
    fn test_constraint_serde_flattens_rule() {
        let constraint = AttributeConstraint::new(
            "employer",
            "employee_count",
            ConstraintRule::min_value(1),
        );
        let json = serde_json::to_value(&constraint).unwrap();
        assert_eq!(json["role_type"], "employer");
        assert_eq!(json["kind"], "MIN_VALUE");
        assert_eq!(json["value"], "1");
    }
}
