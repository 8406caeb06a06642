use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::HistoryError,
    snapshot::{SnapshotDraft, SnapshotField, SnapshotId, SnapshotRecord},
};

use super::types::LogTransaction;

const FIRST_ID: u64 = 1;

/// Ordered snapshot storage shared by the log implementations.
#[derive(Debug, Clone)]
pub(super) struct SnapshotTable {
    next_id: u64,
    records: BTreeMap<SnapshotId, SnapshotRecord>,
}

impl Default for SnapshotTable {
    fn default() -> Self {
        Self {
            next_id: FIRST_ID,
            records: BTreeMap::new(),
        }
    }
}

impl SnapshotTable {
    pub(super) fn append(&mut self, draft: SnapshotDraft) -> SnapshotId {
        let id = SnapshotId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.records.insert(id, draft.into_record(id));
        id
    }

    pub(super) fn keys(&self) -> Vec<SnapshotId> {
        self.records.keys().copied().collect()
    }

    pub(super) fn records(&self) -> Vec<SnapshotRecord> {
        self.records.values().cloned().collect()
    }

    pub(super) fn update(
        &mut self,
        id: SnapshotId,
        field: SnapshotField,
    ) -> Result<(), HistoryError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(HistoryError::UnknownSnapshot(id))?;
        record.apply(field);
        Ok(())
    }

    pub(super) fn delete(&mut self, ids: &[SnapshotId]) {
        for id in ids {
            self.records.remove(id);
        }
    }

    /// Applies the whole transaction, or nothing when it references a missing snapshot.
    pub(super) fn apply(&mut self, txn: LogTransaction) -> Result<SnapshotId, HistoryError> {
        if let Some((id, _)) = txn.focus_patch {
            if !self.records.contains_key(&id) {
                return Err(HistoryError::UnknownSnapshot(id));
            }
        }
        if let Some((id, index)) = txn.focus_patch {
            self.update(id, SnapshotField::FocusIndex(index))?;
        }
        for id in &txn.deletions {
            self.records.remove(id);
        }
        Ok(self.append(txn.append))
    }

    pub(super) fn to_stored(&self) -> StoredLog {
        StoredLog {
            next_id: self.next_id,
            records: self.records(),
        }
    }

    pub(super) fn from_stored(stored: StoredLog) -> Self {
        let records: BTreeMap<SnapshotId, SnapshotRecord> = stored
            .records
            .into_iter()
            .map(|record| (record.id, record))
            .collect();
        let after_last = records
            .keys()
            .next_back()
            .map(|id| id.get().saturating_add(1))
            .unwrap_or(FIRST_ID);
        Self {
            next_id: stored.next_id.max(after_last),
            records,
        }
    }
}

/// On-disk form of a snapshot table.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct StoredLog {
    pub(super) next_id: u64,
    pub(super) records: Vec<SnapshotRecord>,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;

    use super::*;
    use crate::document::Slide;

    fn draft(tag: &str) -> SnapshotDraft {
        SnapshotDraft::new(0, vec![Slide::new(json!(tag))])
    }

    #[test]
    fn ids_keep_growing_after_deletes() {
        let mut table = SnapshotTable::default();
        let a = table.append(draft("a"));
        let b = table.append(draft("b"));
        table.delete(&[b]);
        let c = table.append(draft("c"));
        assert!(a < c && b < c);
        assert_eq!(table.keys(), vec![a, c]);
    }

    #[test]
    fn duplicate_and_unknown_deletes_are_ignored() {
        let mut table = SnapshotTable::default();
        let a = table.append(draft("a"));
        let b = table.append(draft("b"));
        table.delete(&[a, a, SnapshotId::new(99)]);
        assert_eq!(table.keys(), vec![b]);
    }

    #[test]
    fn transaction_with_missing_patch_target_changes_nothing() {
        let mut table = SnapshotTable::default();
        let a = table.append(draft("a"));
        let txn = LogTransaction {
            append: draft("b"),
            focus_patch: Some((SnapshotId::new(42), 3)),
            deletions: BTreeSet::from([a]),
        };
        let err = table.apply(txn).unwrap_err();
        assert!(matches!(err, HistoryError::UnknownSnapshot(id) if id == SnapshotId::new(42)));
        assert_eq!(table.keys(), vec![a]);
    }

    #[test]
    fn stored_form_restores_next_id() {
        let mut table = SnapshotTable::default();
        table.append(draft("a"));
        let b = table.append(draft("b"));
        table.delete(&[b]);
        let mut restored = SnapshotTable::from_stored(table.to_stored());
        let c = restored.append(draft("c"));
        assert!(c > b);
    }
}
