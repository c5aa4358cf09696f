//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use std::sync::Arc;

use core_kernel::{LocaleId, Scope, TypedValue, UnitOfMeasure};
use domain_party::{Attribute, Party, PartyRole, PhysicalAddress, Preference};
use domain_reference::{
    AssociationPropertyConstraint, AttributeConstraint, ConstraintRule, ItemDetail,
    MandatePropertyConstraint, PreferenceConstraint, ReferenceCategory, ReferenceDataSet,
    ReferenceItem, ReferenceStore,
};

/// Builder for reference datasets
#[derive(Default)]
pub struct DatasetBuilder {
    dataset: ReferenceDataSet,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a global row in the default locale
    pub fn with_global_item(mut self, category: ReferenceCategory, code: &str) -> Self {
        self.dataset.items.push(ReferenceItem::new(
            category,
            code,
            LocaleId::default_locale(),
            Scope::Global,
            code,
        ));
        self
    }

    /// Adds a tenant-owned row in the default locale
    pub fn with_tenant_item(
        mut self,
        category: ReferenceCategory,
        code: &str,
        tenant: &str,
    ) -> Self {
        self.dataset.items.push(ReferenceItem::new(
            category,
            code,
            LocaleId::default_locale(),
            Scope::tenant(tenant),
            code,
        ));
        self
    }

    /// Adds a fully specified row
    pub fn with_item(mut self, item: ReferenceItem) -> Self {
        self.dataset.items.push(item);
        self
    }

    /// Adds a detailed global attribute type row
    pub fn with_attribute_type(mut self, code: &str, detail: ItemDetail) -> Self {
        self.dataset.items.push(
            ReferenceItem::new(
                ReferenceCategory::AttributeTypes,
                code,
                LocaleId::default_locale(),
                Scope::Global,
                code,
            )
            .with_detail(detail),
        );
        self
    }

    pub fn with_attribute_constraint(
        mut self,
        role_type: &str,
        attribute_type: &str,
        rule: ConstraintRule,
    ) -> Self {
        self.dataset
            .attribute_constraints
            .push(AttributeConstraint::new(role_type, attribute_type, rule));
        self
    }

    pub fn with_preference_constraint(
        mut self,
        role_type: &str,
        preference_type: &str,
        rule: ConstraintRule,
    ) -> Self {
        self.dataset
            .preference_constraints
            .push(PreferenceConstraint::new(role_type, preference_type, rule));
        self
    }

    pub fn with_association_property_constraint(
        mut self,
        association_type: &str,
        property_type: &str,
        rule: ConstraintRule,
    ) -> Self {
        self.dataset.association_property_constraints.push(
            AssociationPropertyConstraint::new(association_type, property_type, rule),
        );
        self
    }

    pub fn with_mandate_property_constraint(
        mut self,
        mandate_type: &str,
        property_type: &str,
        rule: ConstraintRule,
    ) -> Self {
        self.dataset
            .mandate_property_constraints
            .push(MandatePropertyConstraint::new(mandate_type, property_type, rule));
        self
    }

    pub fn build(self) -> ReferenceDataSet {
        self.dataset
    }

    /// Builds the dataset and loads it into a store
    pub fn build_store(self) -> Arc<ReferenceStore> {
        Arc::new(ReferenceStore::from_dataset(self.dataset))
    }
}

/// Builder for test parties
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    /// Starts from a person with default names under the given tenant
    pub fn person(tenant: &str) -> Self {
        Self {
            party: Party::new_person(tenant, "Ada", "Lovelace"),
        }
    }

    /// Starts from an organization with a default name under the tenant
    pub fn organization(tenant: &str) -> Self {
        Self {
            party: Party::new_organization(tenant, "Analytical Engines Ltd"),
        }
    }

    pub fn named(mut self, first_name: &str, last_name: &str) -> Self {
        if let Party::Person(person) = &mut self.party {
            person.first_name = first_name.to_string();
            person.last_name = last_name.to_string();
        }
        self
    }

    pub fn with_role(mut self, role_type: &str) -> Self {
        self.party.common_mut().add_role(PartyRole::new(role_type));
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.party.common_mut().add_attribute(attribute);
        self
    }

    pub fn with_text_attribute(mut self, attribute_type: &str, value: &str) -> Self {
        self.party
            .common_mut()
            .add_attribute(Attribute::text(attribute_type, value));
        self
    }

    pub fn with_decimal_attribute(
        mut self,
        attribute_type: &str,
        value: &str,
        unit: Option<UnitOfMeasure>,
    ) -> Self {
        let mut attribute =
            Attribute::decimal_from_str(attribute_type, value).expect("builder decimal is valid");
        if let Some(unit) = unit {
            attribute = attribute.with_unit(unit);
        }
        self.party.common_mut().add_attribute(attribute);
        self
    }

    pub fn with_preference(mut self, preference_type: &str, value: TypedValue) -> Self {
        self.party
            .common_mut()
            .add_preference(Preference::new(preference_type).with_value(value));
        self
    }

    pub fn with_address(mut self, address: PhysicalAddress) -> Self {
        self.party.common_mut().add_address(address);
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}
