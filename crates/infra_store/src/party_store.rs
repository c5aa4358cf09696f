//! In-memory party directory
//!
//! A tenant-scoped map standing in for the external persistence layer.
//! Serialization of writers per aggregate is the caller's concern, exactly
//! as it is with the real store; this adapter only guarantees that each
//! operation is atomic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

use core_kernel::{PartyId, TenantId};
use domain_party::{Party, PartyError, PartyStore};

/// In-memory implementation of the party directory port
#[derive(Default)]
pub struct MemoryPartyStore {
    parties: RwLock<HashMap<(TenantId, PartyId), Party>>,
}

impl MemoryPartyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parties across all tenants
    pub fn len(&self) -> usize {
        self.parties
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PartyStore for MemoryPartyStore {
    async fn insert(&self, party: Party) -> Result<(), PartyError> {
        let key = (party.tenant().clone(), party.id());
        let mut parties = self.parties.write().unwrap_or_else(|err| err.into_inner());
        if parties.contains_key(&key) {
            return Err(PartyError::DuplicateParty(party.id()));
        }
        debug!(party = %party.id(), tenant = %key.0, "party inserted");
        parties.insert(key, party);
        Ok(())
    }

    async fn fetch(&self, tenant: &TenantId, id: PartyId) -> Result<Party, PartyError> {
        self.parties
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .get(&(tenant.clone(), id))
            .cloned()
            .ok_or_else(|| PartyError::not_found(tenant, id))
    }

    async fn update(&self, party: Party) -> Result<(), PartyError> {
        let key = (party.tenant().clone(), party.id());
        let mut parties = self.parties.write().unwrap_or_else(|err| err.into_inner());
        match parties.get_mut(&key) {
            Some(stored) => {
                *stored = party;
                Ok(())
            }
            None => Err(PartyError::not_found(&key.0, key.1)),
        }
    }

    async fn remove(&self, tenant: &TenantId, id: PartyId) -> Result<Party, PartyError> {
        self.parties
            .write()
            .unwrap_or_else(|err| err.into_inner())
            .remove(&(tenant.clone(), id))
            .ok_or_else(|| PartyError::not_found(tenant, id))
    }

    async fn list(&self, tenant: &TenantId) -> Result<Vec<Party>, PartyError> {
        let parties = self.parties.read().unwrap_or_else(|err| err.into_inner());
        let mut matching: Vec<Party> = parties
            .iter()
            .filter(|((owner, _), _)| owner == tenant)
            .map(|(_, party)| party.clone())
            .collect();
        matching.sort_by_key(|party| (party.common().created_at, party.id()));
        Ok(matching)
    }
}
