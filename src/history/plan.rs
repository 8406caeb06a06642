use std::collections::BTreeSet;

use crate::snapshot::SnapshotId;

/// What one `record` call does to the log, worked out from the current keys.
///
/// Keys after the cursor belong to an abandoned redo branch and are dropped. If the
/// remaining keys plus the new snapshot exceed the capacity, the oldest remaining keys
/// are dropped until it fits. The newest remaining key gets its focus index patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPlan {
    pub deletions: BTreeSet<SnapshotId>,
    pub focus_target: Option<SnapshotId>,
    /// History length once the new snapshot is appended
    pub new_length: usize,
    pub truncated: usize,
    pub evicted: usize,
}

impl RecordPlan {
    /// `keys` must be in log order. `cursor` is `None` for an uninitialized history,
    /// which drops every existing key.
    pub fn new(keys: &[SnapshotId], cursor: Option<usize>, capacity: usize) -> Self {
        let keep = cursor.map_or(0, |c| c.saturating_add(1)).min(keys.len());
        let (survivors, branch) = keys.split_at(keep);
        let mut deletions: BTreeSet<SnapshotId> = branch.iter().copied().collect();

        let room = capacity.max(1) - 1;
        let evicted = survivors.len().saturating_sub(room);
        let (oldest, survivors) = survivors.split_at(evicted);
        deletions.extend(oldest.iter().copied());

        let new_length = survivors.len() + 1;
        let focus_target = if new_length >= 2 {
            survivors.last().copied()
        } else {
            None
        };

        Self {
            deletions,
            focus_target,
            new_length,
            truncated: branch.len(),
            evicted,
        }
    }
}
