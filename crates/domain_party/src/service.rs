//! Party service
//!
//! Orchestrates party mutations: every create, update, and delete goes
//! through the directory and appends the serialized state to the snapshot
//! log, so the history is complete by construction. Validation is offered
//! alongside but never gates a mutation here - the caller decides what to
//! do with a violating party.

use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

use core_kernel::{PartyId, TenantId};
use domain_reference::ReferenceStore;

use crate::error::PartyError;
use crate::party::Party;
use crate::ports::{EntityType, PartyStore, SnapshotLog, SnapshotPage, SnapshotQuery};
use crate::validation::{ValidationContext, ValidationEngine, Violation};

/// Application service over the party directory and snapshot log
pub struct PartyService {
    parties: Arc<dyn PartyStore>,
    snapshots: Arc<dyn SnapshotLog>,
    validation: ValidationEngine,
}

impl PartyService {
    pub fn new(
        parties: Arc<dyn PartyStore>,
        snapshots: Arc<dyn SnapshotLog>,
        reference: Arc<ReferenceStore>,
    ) -> Self {
        Self {
            parties,
            snapshots,
            validation: ValidationEngine::new(reference),
        }
    }

    /// Creates a party and appends its first snapshot
    pub async fn create_party(&self, party: Party) -> Result<PartyId, PartyError> {
        let id = party.id();
        let entity_id = *id.as_uuid();
        let data = serde_json::to_value(&party)?;
        self.parties.insert(party).await?;
        self.snapshots
            .append(EntityType::Party, entity_id, Utc::now(), data)
            .await?;
        info!(party = %id, "party created");
        Ok(id)
    }

    /// Fetches a party by tenant and id
    pub async fn get_party(&self, tenant: &TenantId, id: PartyId) -> Result<Party, PartyError> {
        self.parties.fetch(tenant, id).await
    }

    /// Lists every party of a tenant
    pub async fn list_parties(&self, tenant: &TenantId) -> Result<Vec<Party>, PartyError> {
        self.parties.list(tenant).await
    }

    /// Stores the new state of a party and appends a snapshot
    pub async fn update_party(&self, party: Party) -> Result<(), PartyError> {
        let id = party.id();
        let entity_id = *id.as_uuid();
        let data = serde_json::to_value(&party)?;
        self.parties.update(party).await?;
        self.snapshots
            .append(EntityType::Party, entity_id, Utc::now(), data)
            .await?;
        info!(party = %id, "party updated");
        Ok(())
    }

    /// Deletes a party, cascading over its owned sub-collections, and
    /// appends a final tombstone snapshot
    pub async fn delete_party(&self, tenant: &TenantId, id: PartyId) -> Result<(), PartyError> {
        self.parties.remove(tenant, id).await?;
        self.snapshots
            .append(
                EntityType::Party,
                *id.as_uuid(),
                Utc::now(),
                serde_json::Value::Null,
            )
            .await?;
        info!(party = %id, tenant = %tenant, "party deleted");
        Ok(())
    }

    /// Queries the snapshot history of one entity
    pub async fn history(
        &self,
        entity_type: EntityType,
        id: PartyId,
        query: SnapshotQuery,
    ) -> Result<SnapshotPage, PartyError> {
        self.snapshots.query(entity_type, *id.as_uuid(), query).await
    }

    /// Validates a party in the module default locale
    pub fn validate(&self, party: &Party) -> Result<BTreeSet<Violation>, PartyError> {
        self.validation.validate(party)
    }

    /// Validates a party under an explicit locale
    pub fn validate_with(
        &self,
        party: &Party,
        ctx: &ValidationContext,
    ) -> Result<BTreeSet<Violation>, PartyError> {
        self.validation.validate_with(party, ctx)
    }
}
