//! Append-only snapshot log
//!
//! Every mutation of a party appends its serialized state here; nothing is
//! ever updated or deleted, corrections are new records. Queries filter by
//! entity and an inclusive time range, order by timestamp with the
//! insertion sequence as the tie-break, and page stably.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use core_kernel::SnapshotId;
use domain_party::{
    EntityType, PartyError, SnapshotLog, SnapshotPage, SnapshotQuery, SnapshotRecord,
    SortDirection,
};

#[derive(Default)]
struct LogState {
    records: Vec<SnapshotRecord>,
    next_sequence: u64,
}

/// In-memory append-only snapshot store
#[derive(Default)]
pub struct SnapshotStore {
    state: RwLock<LogState>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records ever appended
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append_record(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
        recorded_at: DateTime<Utc>,
        data: serde_json::Value,
    ) -> SnapshotRecord {
        let mut state = self.state.write().unwrap_or_else(|err| err.into_inner());
        let record = SnapshotRecord {
            id: SnapshotId::new_v7(),
            entity_type,
            entity_id,
            recorded_at,
            sequence: state.next_sequence,
            data,
        };
        state.next_sequence += 1;
        state.records.push(record.clone());
        debug!(
            entity = %entity_type,
            entity_id = %entity_id,
            sequence = record.sequence,
            "snapshot appended"
        );
        record
    }

    fn run_query(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
        query: SnapshotQuery,
    ) -> Result<SnapshotPage, PartyError> {
        if query.page_size == 0 {
            return Err(PartyError::invalid("page size must be positive"));
        }
        let state = self.state.read().unwrap_or_else(|err| err.into_inner());
        let mut matching: Vec<SnapshotRecord> = state
            .records
            .iter()
            .filter(|record| {
                record.entity_type == entity_type
                    && record.entity_id == entity_id
                    && query.from.map_or(true, |from| record.recorded_at >= from)
                    && query.to.map_or(true, |to| record.recorded_at <= to)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|record| (record.recorded_at, record.sequence));
        if query.direction == SortDirection::Descending {
            matching.reverse();
        }
        let total = matching.len();
        let records = matching
            .into_iter()
            .skip(query.page_index * query.page_size)
            .take(query.page_size)
            .collect();
        Ok(SnapshotPage {
            records,
            page_index: query.page_index,
            page_size: query.page_size,
            total,
        })
    }
}

#[async_trait]
impl SnapshotLog for SnapshotStore {
    async fn append(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
        recorded_at: DateTime<Utc>,
        data: serde_json::Value,
    ) -> Result<SnapshotRecord, PartyError> {
        Ok(self.append_record(entity_type, entity_id, recorded_at, data))
    }

    async fn query(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
        query: SnapshotQuery,
    ) -> Result<SnapshotPage, PartyError> {
        self.run_query(entity_type, entity_id, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap()
    }

    fn store_with_history(entity_id: Uuid) -> SnapshotStore {
        let store = SnapshotStore::new();
        for (hour, version) in [(8, 1), (10, 2), (12, 3), (14, 4)] {
            store.append_record(
                EntityType::Party,
                entity_id,
                at(hour),
                json!({ "version": version }),
            );
        }
        store
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let entity_id = Uuid::new_v4();
        let store = store_with_history(entity_id);

        let page = store
            .run_query(
                EntityType::Party,
                entity_id,
                SnapshotQuery::page(0, 10).between(at(10), at(12)),
            )
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.records[0].data["version"], 2);
        assert_eq!(page.records[1].data["version"], 3);
    }

    #[test]
    fn test_descending_order() {
        let entity_id = Uuid::new_v4();
        let store = store_with_history(entity_id);

        let page = store
            .run_query(
                EntityType::Party,
                entity_id,
                SnapshotQuery::page(0, 10).descending(),
            )
            .unwrap();
        let versions: Vec<i64> = page
            .records
            .iter()
            .map(|record| record.data["version"].as_i64().unwrap())
            .collect();
        assert_eq!(versions, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_equal_timestamps_break_ties_by_insertion() {
        let entity_id = Uuid::new_v4();
        let store = SnapshotStore::new();
        store.append_record(EntityType::Party, entity_id, at(9), json!({"n": 1}));
        store.append_record(EntityType::Party, entity_id, at(9), json!({"n": 2}));
        store.append_record(EntityType::Party, entity_id, at(9), json!({"n": 3}));

        let page = store
            .run_query(EntityType::Party, entity_id, SnapshotQuery::page(0, 10))
            .unwrap();
        let order: Vec<i64> = page
            .records
            .iter()
            .map(|record| record.data["n"].as_i64().unwrap())
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_pagination_is_stable() {
        let entity_id = Uuid::new_v4();
        let store = store_with_history(entity_id);

        let first = store
            .run_query(EntityType::Party, entity_id, SnapshotQuery::page(0, 3))
            .unwrap();
        let second = store
            .run_query(EntityType::Party, entity_id, SnapshotQuery::page(1, 3))
            .unwrap();
        assert_eq!(first.records.len(), 3);
        assert_eq!(second.records.len(), 1);
        assert_eq!(first.total, 4);
        assert_eq!(second.records[0].data["version"], 4);
    }

    #[test]
    fn test_entities_do_not_bleed_into_each_other() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let store = SnapshotStore::new();
        store.append_record(EntityType::Party, a, at(9), json!({}));
        store.append_record(EntityType::Party, b, at(9), json!({}));
        store.append_record(EntityType::Association, a, at(9), json!({}));

        let page = store
            .run_query(EntityType::Party, a, SnapshotQuery::page(0, 10))
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let store = SnapshotStore::new();
        let err = store
            .run_query(EntityType::Party, Uuid::new_v4(), SnapshotQuery::page(0, 0))
            .unwrap_err();
        assert!(matches!(err, PartyError::InvalidData(_)));
    }
}
