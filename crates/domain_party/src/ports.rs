//! Party Domain Ports
//!
//! Port interfaces the party domain needs from its surroundings: a party
//! directory and an append-only snapshot log. Adapters implement these
//! against whatever actually stores the data; the domain never sees the
//! difference.
//!
//! The snapshot log is strictly append-only: corrections are new records,
//! and no update or delete operation exists on it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use core_kernel::{PartyId, SnapshotId, TenantId};

use crate::error::PartyError;
use crate::party::Party;

/// The kind of entity a snapshot records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Party,
    Association,
    Mandate,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Party => "party",
            EntityType::Association => "association",
            EntityType::Mandate => "mandate",
        };
        write!(f, "{}", name)
    }
}

/// Sort direction for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

/// One appended record of serialized entity state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: SnapshotId,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    /// Insertion sequence, the tie-break for records sharing a timestamp
    pub sequence: u64,
    /// The serialized entity state; `null` marks a deletion
    pub data: serde_json::Value,
}

/// Parameters of a history query
#[derive(Debug, Clone, Default)]
pub struct SnapshotQuery {
    /// Inclusive lower timestamp bound
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper timestamp bound
    pub to: Option<DateTime<Utc>>,
    pub direction: SortDirection,
    pub page_index: usize,
    pub page_size: usize,
}

impl SnapshotQuery {
    pub fn page(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
            ..Default::default()
        }
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Descending;
        self
    }
}

/// One page of a history query result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPage {
    pub records: Vec<SnapshotRecord>,
    pub page_index: usize,
    pub page_size: usize,
    /// Matching records across all pages
    pub total: usize,
}

/// Port to the append-only history log
#[async_trait]
pub trait SnapshotLog: Send + Sync {
    /// Appends one record; the log assigns id and sequence
    async fn append(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
        recorded_at: DateTime<Utc>,
        data: serde_json::Value,
    ) -> Result<SnapshotRecord, PartyError>;

    /// Queries records of one entity, filtered and paged
    async fn query(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
        query: SnapshotQuery,
    ) -> Result<SnapshotPage, PartyError>;
}

/// Port to the party directory
///
/// All addressing is tenant-scoped: an id that exists under another tenant
/// is `NotFound` here.
#[async_trait]
pub trait PartyStore: Send + Sync {
    async fn insert(&self, party: Party) -> Result<(), PartyError>;

    async fn fetch(&self, tenant: &TenantId, id: PartyId) -> Result<Party, PartyError>;

    async fn update(&self, party: Party) -> Result<(), PartyError>;

    /// Removes and returns the party; owned sub-collections go with it
    async fn remove(&self, tenant: &TenantId, id: PartyId) -> Result<Party, PartyError>;

    async fn list(&self, tenant: &TenantId) -> Result<Vec<Party>, PartyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let from = Utc::now();
        let to = from + chrono::Duration::hours(1);
        let query = SnapshotQuery::page(2, 25).between(from, to).descending();
        assert_eq!(query.page_index, 2);
        assert_eq!(query.page_size, 25);
        assert_eq!(query.direction, SortDirection::Descending);
        assert_eq!(query.from, Some(from));
    }

    #[test]
    fn test_default_direction_is_ascending() {
        assert_eq!(SnapshotQuery::default().direction, SortDirection::Ascending);
    }
}
