//! Preferences, consents, segments, and external references

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::TypedValue;

/// A typed preference of a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    /// The preference type code, defined in reference data
    pub preference_type: String,
    pub value: Option<TypedValue>,
}

impl Preference {
    pub fn new(preference_type: impl Into<String>) -> Self {
        Self {
            preference_type: preference_type.into(),
            value: None,
        }
    }

    pub fn text(preference_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(preference_type).with_value(TypedValue::Text(value.into()))
    }

    pub fn boolean(preference_type: impl Into<String>, value: bool) -> Self {
        Self::new(preference_type).with_value(TypedValue::Boolean(value))
    }

    pub fn with_value(mut self, value: TypedValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// A recorded consent decision of a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consent {
    /// The consent type code, defined in reference data
    pub consent_type: String,
    pub granted: bool,
    pub recorded_at: DateTime<Utc>,
}

impl Consent {
    pub fn granted(consent_type: impl Into<String>) -> Self {
        Self {
            consent_type: consent_type.into(),
            granted: true,
            recorded_at: Utc::now(),
        }
    }

    pub fn withheld(consent_type: impl Into<String>) -> Self {
        Self {
            consent_type: consent_type.into(),
            granted: false,
            recorded_at: Utc::now(),
        }
    }
}

/// An allocation of a party to a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAllocation {
    /// The segment code, defined in reference data
    pub segment: String,
    pub allocated_at: DateTime<Utc>,
}

impl SegmentAllocation {
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            allocated_at: Utc::now(),
        }
    }
}

/// The party's identity in an external system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Name of the external system
    pub system: String,
    /// The party's key in that system
    pub reference: String,
}

impl ExternalReference {
    pub fn new(system: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            reference: reference.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_value_slot() {
        let preference = Preference::text("correspondence_language", "nl");
        assert!(preference.has_value());
        assert_eq!(
            preference.value.as_ref().and_then(TypedValue::text),
            Some("nl")
        );
    }

    #[test]
    fn test_boolean_preference() {
        let preference = Preference::boolean("paperless_billing", true);
        assert_eq!(
            preference.value.as_ref().and_then(TypedValue::boolean),
            Some(true)
        );
    }

    #[test]
    fn test_consent_constructors() {
        assert!(Consent::granted("MARKETING").granted);
        assert!(!Consent::withheld("MARKETING").granted);
    }
}
