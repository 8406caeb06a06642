use async_trait::async_trait;

use crate::{
    error::HistoryError,
    snapshot::{SnapshotDraft, SnapshotField, SnapshotId, SnapshotRecord},
};

use super::{
    table::SnapshotTable,
    types::{LogTransaction, SnapshotLog},
};

/// Snapshot log kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotLog {
    table: SnapshotTable,
}

impl MemorySnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotLog for MemorySnapshotLog {
    async fn append(&mut self, draft: SnapshotDraft) -> Result<SnapshotId, HistoryError> {
        Ok(self.table.append(draft))
    }

    async fn list_keys(&self) -> Result<Vec<SnapshotId>, HistoryError> {
        Ok(self.table.keys())
    }

    async fn read_all(&self) -> Result<Vec<SnapshotRecord>, HistoryError> {
        Ok(self.table.records())
    }

    async fn update_field(
        &mut self,
        id: SnapshotId,
        field: SnapshotField,
    ) -> Result<(), HistoryError> {
        self.table.update(id, field)
    }

    async fn delete_many(&mut self, ids: &[SnapshotId]) -> Result<(), HistoryError> {
        self.table.delete(ids);
        Ok(())
    }

    async fn commit(&mut self, txn: LogTransaction) -> Result<SnapshotId, HistoryError> {
        self.table.apply(txn)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
