//! Constraint evaluation
//!
//! The engine is a small interpreter over the closed set of constraint
//! kinds. Lookups are exact-match on the key column; evaluation is a pure
//! function of the rule, the candidate value, and the evaluation context.
//! Only the `Reference` kind re-enters overlay resolution, on the same
//! snapshot the lookup came from.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use core_kernel::{LocaleId, TenantId, TypedValue};

use crate::category::ReferenceCategory;
use crate::constraint::{
    AssociationPropertyConstraint, AttributeConstraint, ConstraintKind, ConstraintRule,
    MandatePropertyConstraint, PreferenceConstraint,
};
use crate::store::{ReferenceSnapshot, ReferenceStore};

/// Tenant and locale under which reference-backed rules are resolved
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    pub tenant: Option<TenantId>,
    pub locale: LocaleId,
}

impl EvaluationContext {
    pub fn new(tenant: Option<TenantId>, locale: LocaleId) -> Self {
        Self { tenant, locale }
    }

    /// Global scope, module default locale
    pub fn global_default() -> Self {
        Self {
            tenant: None,
            locale: LocaleId::default_locale(),
        }
    }
}

/// The outcome of evaluating one rule against one candidate value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOutcome {
    Satisfied,
    Violated(String),
}

impl ConstraintOutcome {
    fn violated(message: impl Into<String>) -> Self {
        ConstraintOutcome::Violated(message.into())
    }

    pub fn is_violated(&self) -> bool {
        matches!(self, ConstraintOutcome::Violated(_))
    }

    /// The violation message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ConstraintOutcome::Satisfied => None,
            ConstraintOutcome::Violated(message) => Some(message),
        }
    }
}

impl ReferenceSnapshot {
    /// Evaluates one rule against a candidate value
    ///
    /// An absent candidate fails `Required` and vacuously satisfies every
    /// other kind. Malformed rule rows (bad pattern, unknown referenced
    /// category, unparseable bound) count as violations: bad data never
    /// passes silently.
    pub fn evaluate(
        &self,
        rule: &ConstraintRule,
        candidate: Option<&TypedValue>,
        ctx: &EvaluationContext,
    ) -> ConstraintOutcome {
        let value = match candidate {
            Some(value) => value,
            None => {
                return match rule.kind {
                    ConstraintKind::Required => ConstraintOutcome::violated("value is required"),
                    _ => ConstraintOutcome::Satisfied,
                };
            }
        };

        match rule.kind {
            ConstraintKind::Required => ConstraintOutcome::Satisfied,
            ConstraintKind::Pattern => self.evaluate_pattern(rule, value),
            ConstraintKind::Reference => self.evaluate_reference(rule, value, ctx),
            ConstraintKind::MaxSize => evaluate_max_size(rule, value),
            ConstraintKind::MinValue => evaluate_bound(rule, value, BoundKind::Min),
            ConstraintKind::MaxValue => evaluate_bound(rule, value, BoundKind::Max),
        }
    }

    fn evaluate_pattern(&self, rule: &ConstraintRule, value: &TypedValue) -> ConstraintOutcome {
        let text = match value.text() {
            Some(text) => text,
            None => {
                return ConstraintOutcome::violated(format!(
                    "pattern constraint applies to string values, got {}",
                    value.value_type()
                ));
            }
        };
        let pattern = match rule.value.as_deref() {
            Some(pattern) => pattern,
            None => return ConstraintOutcome::violated("pattern constraint carries no pattern"),
        };
        // Full match, like the stored rules assume
        match Regex::new(&format!(r"\A(?:{})\z", pattern)) {
            Ok(regex) if regex.is_match(text) => ConstraintOutcome::Satisfied,
            Ok(_) => ConstraintOutcome::violated(format!(
                "value '{}' does not match pattern '{}'",
                text, pattern
            )),
            Err(_) => {
                ConstraintOutcome::violated(format!("constraint pattern '{}' is invalid", pattern))
            }
        }
    }

    fn evaluate_reference(
        &self,
        rule: &ConstraintRule,
        value: &TypedValue,
        ctx: &EvaluationContext,
    ) -> ConstraintOutcome {
        let category_code = match rule.value.as_deref() {
            Some(code) => code,
            None => return ConstraintOutcome::violated("reference constraint names no category"),
        };
        let category = match ReferenceCategory::from_str(category_code) {
            Ok(category) => category,
            Err(_) => {
                return ConstraintOutcome::violated(format!(
                    "reference constraint names unknown category '{}'",
                    category_code
                ));
            }
        };
        let code = value.to_string();
        match self.is_valid(category, ctx.tenant.as_ref(), &ctx.locale, &code) {
            Ok(true) => ConstraintOutcome::Satisfied,
            Ok(false) => ConstraintOutcome::violated(format!(
                "'{}' is not a valid {} code",
                code, category
            )),
            Err(err) => ConstraintOutcome::violated(format!(
                "reference list {} could not be resolved: {}",
                category, err
            )),
        }
    }
}

enum BoundKind {
    Min,
    Max,
}

fn evaluate_max_size(rule: &ConstraintRule, value: &TypedValue) -> ConstraintOutcome {
    let text = match value.text() {
        Some(text) => text,
        None => {
            return ConstraintOutcome::violated(format!(
                "max size constraint applies to string values, got {}",
                value.value_type()
            ));
        }
    };
    let bound = match rule.value.as_deref().and_then(|raw| raw.parse::<usize>().ok()) {
        Some(bound) => bound,
        None => return ConstraintOutcome::violated("max size constraint carries no usable bound"),
    };
    let length = text.chars().count();
    if length <= bound {
        ConstraintOutcome::Satisfied
    } else {
        ConstraintOutcome::violated(format!("length {} exceeds maximum {}", length, bound))
    }
}

fn evaluate_bound(rule: &ConstraintRule, value: &TypedValue, kind: BoundKind) -> ConstraintOutcome {
    let magnitude = match value.numeric_value() {
        Some(magnitude) => magnitude,
        None => {
            return ConstraintOutcome::violated(format!(
                "range constraint applies to numeric values, got {}",
                value.value_type()
            ));
        }
    };
    let bound = match rule.value.as_deref().and_then(|raw| raw.parse::<Decimal>().ok()) {
        Some(bound) => bound,
        None => return ConstraintOutcome::violated("range constraint carries no usable bound"),
    };
    match kind {
        BoundKind::Min if magnitude < bound => {
            ConstraintOutcome::violated(format!("{} is below minimum {}", magnitude, bound))
        }
        BoundKind::Max if magnitude > bound => {
            ConstraintOutcome::violated(format!("{} exceeds maximum {}", magnitude, bound))
        }
        _ => ConstraintOutcome::Satisfied,
    }
}

/// The caller-facing constraint surface
///
/// Lookup methods answer from the current snapshot, cloned out so callers
/// are insulated from reloads. Keys match exactly; there is no prefix or
/// hierarchy matching.
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    store: Arc<ReferenceStore>,
}

impl ConstraintEngine {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Every attribute constraint, any role
    pub fn all_attribute_constraints(&self) -> Vec<AttributeConstraint> {
        self.store.snapshot().all_attribute_constraints().to_vec()
    }

    /// Every preference constraint, any role
    pub fn all_preference_constraints(&self) -> Vec<PreferenceConstraint> {
        self.store.snapshot().all_preference_constraints().to_vec()
    }

    /// Attribute constraints for exactly this role type
    pub fn attribute_constraints_for(&self, role_type: &str) -> Vec<AttributeConstraint> {
        self.store
            .snapshot()
            .attribute_constraints_for(role_type)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Attribute constraints for one role and one attribute type
    pub fn attribute_constraints_for_type(
        &self,
        role_type: &str,
        attribute_type: &str,
    ) -> Vec<AttributeConstraint> {
        self.store
            .snapshot()
            .attribute_constraints_for(role_type)
            .into_iter()
            .filter(|constraint| constraint.attribute_type == attribute_type)
            .cloned()
            .collect()
    }

    /// Preference constraints for exactly this role type
    pub fn preference_constraints_for(&self, role_type: &str) -> Vec<PreferenceConstraint> {
        self.store
            .snapshot()
            .preference_constraints_for(role_type)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Preference constraints for one role and one preference type
    pub fn preference_constraints_for_type(
        &self,
        role_type: &str,
        preference_type: &str,
    ) -> Vec<PreferenceConstraint> {
        self.store
            .snapshot()
            .preference_constraints_for(role_type)
            .into_iter()
            .filter(|constraint| constraint.preference_type == preference_type)
            .cloned()
            .collect()
    }

    /// Property constraints for one association type
    pub fn association_property_constraints_for(
        &self,
        association_type: &str,
    ) -> Vec<AssociationPropertyConstraint> {
        self.store
            .snapshot()
            .association_property_constraints_for(association_type)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Property constraints for one mandate type
    pub fn mandate_property_constraints_for(
        &self,
        mandate_type: &str,
    ) -> Vec<MandatePropertyConstraint> {
        self.store
            .snapshot()
            .mandate_property_constraints_for(mandate_type)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Evaluates one rule against a candidate value
    pub fn evaluate(
        &self,
        rule: &ConstraintRule,
        candidate: Option<&TypedValue>,
        ctx: &EvaluationContext,
    ) -> ConstraintOutcome {
        self.store.snapshot().evaluate(rule, candidate, ctx)
    }
}
