//! Associations and mandates
//!
//! An association links two parties in a typed relationship (employment,
//! household, brokerage); a mandate authorizes one party to act for
//! another. Both carry typed properties validated against the
//! association/mandate constraint tables, the same way role constraints
//! govern party attributes.

use serde::{Deserialize, Serialize};

use core_kernel::{AssociationId, MandateId, PartyId, TenantId, TypedValue, ValidPeriod};

use crate::attribute::Property;

/// A typed relationship between two parties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub id: AssociationId,
    pub tenant: TenantId,
    /// The association type code, defined in reference data
    pub association_type: String,
    pub from_party: PartyId,
    pub to_party: PartyId,
    pub period: ValidPeriod,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Association {
    pub fn new(
        tenant: impl Into<TenantId>,
        association_type: impl Into<String>,
        from_party: PartyId,
        to_party: PartyId,
    ) -> Self {
        Self {
            id: AssociationId::new_v7(),
            tenant: tenant.into(),
            association_type: association_type.into(),
            from_party,
            to_party,
            period: ValidPeriod::current(),
            properties: Vec::new(),
        }
    }

    pub fn with_period(mut self, period: ValidPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn property_with_type(&self, property_type: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|property| property.property_type == property_type)
    }

    pub fn has_property_with_type(&self, property_type: &str) -> bool {
        self.property_with_type(property_type).is_some()
    }

    /// Removes the property of the given type
    ///
    /// Returns whether a property was removed.
    pub fn remove_property_with_type(&mut self, property_type: &str) -> bool {
        let before = self.properties.len();
        self.properties
            .retain(|property| property.property_type != property_type);
        self.properties.len() != before
    }

    /// Sets the value of the property of the given type, creating the
    /// property when it does not exist yet
    pub fn set_property_value(&mut self, property_type: &str, value: TypedValue) {
        match self
            .properties
            .iter_mut()
            .find(|property| property.property_type == property_type)
        {
            Some(property) => property.value = Some(value),
            None => self
                .properties
                .push(Property::new(property_type).with_value(value)),
        }
    }
}

/// An authorization of one party to act for another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mandate {
    pub id: MandateId,
    pub tenant: TenantId,
    /// The mandate type code, defined in reference data
    pub mandate_type: String,
    /// The party the mandate is over
    pub party: PartyId,
    /// The party authorized to act
    pub authorized_party: PartyId,
    pub period: ValidPeriod,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Mandate {
    pub fn new(
        tenant: impl Into<TenantId>,
        mandate_type: impl Into<String>,
        party: PartyId,
        authorized_party: PartyId,
    ) -> Self {
        Self {
            id: MandateId::new_v7(),
            tenant: tenant.into(),
            mandate_type: mandate_type.into(),
            party,
            authorized_party,
            period: ValidPeriod::current(),
            properties: Vec::new(),
        }
    }

    pub fn with_period(mut self, period: ValidPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn property_with_type(&self, property_type: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|property| property.property_type == property_type)
    }

    pub fn has_property_with_type(&self, property_type: &str) -> bool {
        self.property_with_type(property_type).is_some()
    }

    pub fn remove_property_with_type(&mut self, property_type: &str) -> bool {
        let before = self.properties.len();
        self.properties
            .retain(|property| property.property_type != property_type);
        self.properties.len() != before
    }

    /// Whether the mandate authorizes anything right now
    pub fn is_active(&self) -> bool {
        self.period.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn association() -> Association {
        Association::new("acme", "employment", PartyId::new(), PartyId::new())
    }

    #[test]
    fn test_property_removal_round_trip() {
        let mut association = association();
        association.add_property(Property::text("job_title", "Engineer"));
        association.add_property(Property::integer("hours_per_week", 38));
        assert_eq!(association.properties.len(), 2);
        assert!(association.has_property_with_type("job_title"));

        assert!(association.remove_property_with_type("job_title"));
        assert_eq!(association.properties.len(), 1);
        assert!(!association.has_property_with_type("job_title"));
        assert!(!association.remove_property_with_type("job_title"));
    }

    #[test]
    fn test_set_property_value_creates_then_replaces() {
        let mut association = association();
        association.set_property_value("job_title", TypedValue::Text("Engineer".into()));
        association.set_property_value("job_title", TypedValue::Text("Senior Engineer".into()));
        assert_eq!(association.properties.len(), 1);
        assert_eq!(
            association
                .property_with_type("job_title")
                .and_then(|property| property.value.as_ref())
                .and_then(TypedValue::text),
            Some("Senior Engineer")
        );
    }

    #[test]
    fn test_fresh_mandate_is_active() {
        let mandate = Mandate::new("acme", "payment_mandate", PartyId::new(), PartyId::new());
        assert!(mandate.is_active());
    }

    #[test]
    fn test_ended_mandate_is_inactive() {
        use chrono::TimeZone;
        let start = chrono::Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let mandate = Mandate::new("acme", "payment_mandate", PartyId::new(), PartyId::new())
            .with_period(ValidPeriod::bounded(start, end).unwrap());
        assert!(!mandate.is_active());

        let association = association()
            .with_period(ValidPeriod::bounded(start, end).unwrap());
        assert!(!association.period.is_active());
    }
}
