use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::{
    error::HistoryError,
    snapshot::{SnapshotDraft, SnapshotField, SnapshotId, SnapshotRecord},
};

/// Every log write that one `record` call needs, grouped so a log can apply them together.
#[derive(Debug, Clone)]
pub struct LogTransaction {
    /// Snapshot to append; it receives the highest id.
    pub append: SnapshotDraft,
    /// Existing snapshot whose focus index is rewritten.
    pub focus_patch: Option<(SnapshotId, usize)>,
    /// Snapshots to drop.
    pub deletions: BTreeSet<SnapshotId>,
}

impl LogTransaction {
    pub fn append(draft: SnapshotDraft) -> Self {
        Self {
            append: draft,
            focus_patch: None,
            deletions: BTreeSet::new(),
        }
    }
}

/// Persistent, id-ordered log of snapshot records.
#[async_trait]
pub trait SnapshotLog: Send + Sync {
    /// Stores a snapshot and returns the id it was assigned.
    async fn append(&mut self, draft: SnapshotDraft) -> Result<SnapshotId, HistoryError>;

    /// Ids of all stored snapshots, oldest first.
    async fn list_keys(&self) -> Result<Vec<SnapshotId>, HistoryError>;

    /// All stored snapshots, oldest first.
    async fn read_all(&self) -> Result<Vec<SnapshotRecord>, HistoryError>;

    async fn update_field(&mut self, id: SnapshotId, field: SnapshotField)
        -> Result<(), HistoryError>;

    /// Drops the given snapshots. Ids that are not stored are ignored.
    async fn delete_many(&mut self, ids: &[SnapshotId]) -> Result<(), HistoryError>;

    /// Applies a transaction and returns the id of the appended snapshot.
    ///
    /// This default runs the patch, then the deletions, then the append, one call each.
    /// It is not atomic; logs that can apply everything at once should override it.
    async fn commit(&mut self, txn: LogTransaction) -> Result<SnapshotId, HistoryError> {
        if let Some((id, index)) = txn.focus_patch {
            self.update_field(id, SnapshotField::FocusIndex(index)).await?;
        }
        if !txn.deletions.is_empty() {
            let ids: Vec<SnapshotId> = txn.deletions.into_iter().collect();
            self.delete_many(&ids).await?;
        }
        self.append(txn.append).await
    }

    fn name(&self) -> &'static str;
}
