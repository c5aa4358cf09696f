//! Reference store
//!
//! All reference rows and constraint rows live in one immutable
//! [`ReferenceSnapshot`], built completely before anyone can see it and
//! swapped in with a single pointer assignment. Readers take the current
//! snapshot once per call; a concurrent reload can never expose a mix of
//! old and new rows to them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;
use unic_langid::LanguageIdentifier;

use core_kernel::LocaleId;

use crate::category::ReferenceCategory;
use crate::constraint::{
    AssociationPropertyConstraint, AttributeConstraint, MandatePropertyConstraint,
    PreferenceConstraint,
};
use crate::error::ReferenceError;
use crate::item::ReferenceItem;

/// The raw result of one load from the backing source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDataSet {
    #[serde(default)]
    pub items: Vec<ReferenceItem>,
    #[serde(default)]
    pub attribute_constraints: Vec<AttributeConstraint>,
    #[serde(default)]
    pub preference_constraints: Vec<PreferenceConstraint>,
    #[serde(default)]
    pub association_property_constraints: Vec<AssociationPropertyConstraint>,
    #[serde(default)]
    pub mandate_property_constraints: Vec<MandatePropertyConstraint>,
}

/// Port to whatever supplies the reference tables
///
/// Implementations load from a seed, a file, or an external service. A
/// failing load surfaces as `SourceUnavailable` and never yields partial
/// tables.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn load(&self) -> Result<ReferenceDataSet, ReferenceError>;
}

/// One immutable generation of all loaded tables, with lookup indexes
#[derive(Debug)]
pub struct ReferenceSnapshot {
    generation: u64,
    items: Vec<ReferenceItem>,
    by_category_locale: HashMap<(ReferenceCategory, LocaleId), Vec<usize>>,
    supported_locales: Vec<LocaleId>,
    supported_langids: Vec<LanguageIdentifier>,
    attribute_constraints: Vec<AttributeConstraint>,
    attributes_by_role: HashMap<String, Vec<usize>>,
    preference_constraints: Vec<PreferenceConstraint>,
    preferences_by_role: HashMap<String, Vec<usize>>,
    association_property_constraints: Vec<AssociationPropertyConstraint>,
    association_properties_by_type: HashMap<String, Vec<usize>>,
    mandate_property_constraints: Vec<MandatePropertyConstraint>,
    mandate_properties_by_type: HashMap<String, Vec<usize>>,
}

impl ReferenceSnapshot {
    /// Builds a snapshot and its indexes from a loaded data set
    pub fn build(generation: u64, dataset: ReferenceDataSet) -> Self {
        let mut by_category_locale: HashMap<(ReferenceCategory, LocaleId), Vec<usize>> =
            HashMap::new();
        let mut supported_locales: Vec<LocaleId> = Vec::new();
        for (index, item) in dataset.items.iter().enumerate() {
            by_category_locale
                .entry((item.category, item.locale.clone()))
                .or_default()
                .push(index);
            if !supported_locales.contains(&item.locale) {
                supported_locales.push(item.locale.clone());
            }
        }
        let supported_langids = supported_locales
            .iter()
            .map(|locale| locale.as_langid().clone())
            .collect();

        let mut attributes_by_role: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, constraint) in dataset.attribute_constraints.iter().enumerate() {
            attributes_by_role
                .entry(constraint.role_type.clone())
                .or_default()
                .push(index);
        }
        let mut preferences_by_role: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, constraint) in dataset.preference_constraints.iter().enumerate() {
            preferences_by_role
                .entry(constraint.role_type.clone())
                .or_default()
                .push(index);
        }
        let mut association_properties_by_type: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, constraint) in dataset.association_property_constraints.iter().enumerate() {
            association_properties_by_type
                .entry(constraint.association_type.clone())
                .or_default()
                .push(index);
        }
        let mut mandate_properties_by_type: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, constraint) in dataset.mandate_property_constraints.iter().enumerate() {
            mandate_properties_by_type
                .entry(constraint.mandate_type.clone())
                .or_default()
                .push(index);
        }

        Self {
            generation,
            items: dataset.items,
            by_category_locale,
            supported_locales,
            supported_langids,
            attribute_constraints: dataset.attribute_constraints,
            attributes_by_role,
            preference_constraints: dataset.preference_constraints,
            preferences_by_role,
            association_property_constraints: dataset.association_property_constraints,
            association_properties_by_type,
            mandate_property_constraints: dataset.mandate_property_constraints,
            mandate_properties_by_type,
        }
    }

    /// The generation number of this snapshot; reloads increase it
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of reference items in this snapshot
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The locales any row is localized for, in first-seen order
    pub fn supported_locales(&self) -> &[LocaleId] {
        &self.supported_locales
    }

    pub(crate) fn supported_langids(&self) -> &[LanguageIdentifier] {
        &self.supported_langids
    }

    /// Rows of one category and locale, in load order, any scope
    pub(crate) fn rows<'a>(
        &'a self,
        category: ReferenceCategory,
        locale: &LocaleId,
    ) -> impl Iterator<Item = &'a ReferenceItem> + 'a {
        self.by_category_locale
            .get(&(category, locale.clone()))
            .into_iter()
            .flatten()
            .map(move |index| &self.items[*index])
    }

    pub fn all_attribute_constraints(&self) -> &[AttributeConstraint] {
        &self.attribute_constraints
    }

    pub fn all_preference_constraints(&self) -> &[PreferenceConstraint] {
        &self.preference_constraints
    }

    /// Attribute constraints whose role type exactly equals the argument
    pub fn attribute_constraints_for(&self, role_type: &str) -> Vec<&AttributeConstraint> {
        self.attributes_by_role
            .get(role_type)
            .into_iter()
            .flatten()
            .map(|index| &self.attribute_constraints[*index])
            .collect()
    }

    /// Preference constraints whose role type exactly equals the argument
    pub fn preference_constraints_for(&self, role_type: &str) -> Vec<&PreferenceConstraint> {
        self.preferences_by_role
            .get(role_type)
            .into_iter()
            .flatten()
            .map(|index| &self.preference_constraints[*index])
            .collect()
    }

    /// Property constraints for one association type
    pub fn association_property_constraints_for(
        &self,
        association_type: &str,
    ) -> Vec<&AssociationPropertyConstraint> {
        self.association_properties_by_type
            .get(association_type)
            .into_iter()
            .flatten()
            .map(|index| &self.association_property_constraints[*index])
            .collect()
    }

    /// Property constraints for one mandate type
    pub fn mandate_property_constraints_for(
        &self,
        mandate_type: &str,
    ) -> Vec<&MandatePropertyConstraint> {
        self.mandate_properties_by_type
            .get(mandate_type)
            .into_iter()
            .flatten()
            .map(|index| &self.mandate_property_constraints[*index])
            .collect()
    }

}

/// The shared, atomically swappable handle to the current snapshot
///
/// The lock guards only the pointer: readers clone the `Arc` and drop the
/// guard immediately, so they never block a reload and a reload never
/// blocks them for longer than the swap itself.
pub struct ReferenceStore {
    current: RwLock<Arc<ReferenceSnapshot>>,
}

impl ReferenceStore {
    /// Loads the initial snapshot from the source
    ///
    /// # Errors
    ///
    /// `SourceUnavailable` when the source cannot deliver the tables; no
    /// store is created in that case.
    pub async fn load(source: &dyn ReferenceSource) -> Result<Self, ReferenceError> {
        let dataset = source.load().await?;
        let snapshot = ReferenceSnapshot::build(1, dataset);
        info!(
            generation = snapshot.generation(),
            items = snapshot.item_count(),
            locales = snapshot.supported_locales().len(),
            "reference store loaded"
        );
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Creates a store directly from an already-built data set
    pub fn from_dataset(dataset: ReferenceDataSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(ReferenceSnapshot::build(1, dataset))),
        }
    }

    /// Replaces the current snapshot with a freshly loaded one
    ///
    /// The next snapshot is built completely off-lock; the previous one
    /// stays in place when the source fails, and in-flight readers keep
    /// whatever snapshot they already hold.
    pub async fn reload(&self, source: &dyn ReferenceSource) -> Result<(), ReferenceError> {
        let dataset = source.load().await?;
        let next_generation = self.snapshot().generation() + 1;
        let next = Arc::new(ReferenceSnapshot::build(next_generation, dataset));
        info!(
            generation = next.generation(),
            items = next.item_count(),
            "reference store reloaded"
        );
        let mut guard = self.current.write().unwrap_or_else(|err| err.into_inner());
        *guard = next;
        Ok(())
    }

    /// The current snapshot; callers hold it for the duration of one call
    pub fn snapshot(&self) -> Arc<ReferenceSnapshot> {
        self.current
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }
}

impl std::fmt::Debug for ReferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("ReferenceStore")
            .field("generation", &snapshot.generation())
            .field("items", &snapshot.item_count())
            .finish()
    }
}
