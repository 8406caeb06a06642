use tokio::sync::broadcast;

use crate::{
    config::{Capacity, HistoryConfig},
    document::{SharedDocument, SharedSelection},
    error::HistoryError,
    snapshot::{SnapshotDraft, SnapshotRecord},
    store::{LogTransaction, SnapshotLog},
};

use super::{
    cursor::{HistoryCursor, HistoryStatus},
    events::{HistoryEvent, HistoryEventKind, EVENT_CHANNEL_CAPACITY},
    plan::RecordPlan,
};

/// Linear undo/redo over full document snapshots.
///
/// One controller per open document. The host must not run two operations on the same
/// controller at once; `&mut self` on every mutating call enforces that within a task.
pub struct HistoryController {
    log: Box<dyn SnapshotLog>,
    document: SharedDocument,
    selection: SharedSelection,
    cursor: HistoryCursor,
    capacity: Capacity,
    events: broadcast::Sender<HistoryEvent>,
}

impl HistoryController {
    pub fn new(
        log: Box<dyn SnapshotLog>,
        document: SharedDocument,
        selection: SharedSelection,
    ) -> Self {
        Self::with_config(log, document, selection, &HistoryConfig::default())
    }

    pub fn with_config(
        log: Box<dyn SnapshotLog>,
        document: SharedDocument,
        selection: SharedSelection,
        config: &HistoryConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            log,
            document,
            selection,
            cursor: HistoryCursor::new(),
            capacity: config.capacity(),
            events,
        }
    }

    /// Starts the history with the document as it is now.
    ///
    /// Records left in the log by an earlier use are dropped in the same commit.
    pub async fn init(&mut self) -> Result<(), HistoryError> {
        let stale = self.log.list_keys().await?;
        if !stale.is_empty() {
            log::warn!(
                "Dropping {} stale snapshot(s) from {} log on init",
                stale.len(),
                self.log.name()
            );
        }
        let mut txn = LogTransaction::append(self.capture().await);
        txn.deletions.extend(stale);
        let id = self.log.commit(txn).await?;

        self.cursor.set_cursor(0);
        self.cursor.set_length(1);
        log::info!("History initialized with snapshot {id}");
        self.emit(HistoryEventKind::Initialized);
        Ok(())
    }

    /// Captures the document after an edit.
    ///
    /// Drops any redo branch, evicts the oldest snapshots past capacity and points the
    /// previous snapshot's focus at the slide being viewed now.
    pub async fn record(&mut self) -> Result<(), HistoryError> {
        let keys = self.log.list_keys().await?;
        let plan = RecordPlan::new(&keys, self.cursor.cursor(), self.capacity.get());
        log::debug!(
            "Recording snapshot: {} key(s), truncating {}, evicting {}",
            keys.len(),
            plan.truncated,
            plan.evicted
        );

        let draft = self.capture().await;
        let focus = draft.focus_index;
        let txn = LogTransaction {
            append: draft,
            focus_patch: plan.focus_target.map(|id| (id, focus)),
            deletions: plan.deletions,
        };
        let id = self.log.commit(txn).await?;

        self.cursor.set_cursor(plan.new_length - 1);
        self.cursor.set_length(plan.new_length);
        log::debug!("Recorded snapshot {id}, history length {}", plan.new_length);
        self.emit(HistoryEventKind::Recorded);
        Ok(())
    }

    /// Steps back one snapshot. Does nothing when there is nothing to undo.
    pub async fn undo(&mut self) -> Result<(), HistoryError> {
        let Some(cursor) = self.cursor.cursor().filter(|_| self.cursor.can_undo()) else {
            return Ok(());
        };
        self.restore(cursor - 1).await?;
        self.emit(HistoryEventKind::Undone);
        Ok(())
    }

    /// Steps forward one snapshot. Does nothing when there is nothing to redo.
    pub async fn redo(&mut self) -> Result<(), HistoryError> {
        let Some(cursor) = self.cursor.cursor().filter(|_| self.cursor.can_redo()) else {
            return Ok(());
        };
        self.restore(cursor + 1).await?;
        self.emit(HistoryEventKind::Redone);
        Ok(())
    }

    async fn restore(&mut self, target: usize) -> Result<(), HistoryError> {
        let records = self.log.read_all().await?;
        let record = records.get(target).ok_or(HistoryError::Desync {
            cursor: target,
            length: records.len(),
        })?;
        let index = record.restore_index();
        log::debug!(
            "Restoring snapshot {} at position {target}, focus {index}",
            record.id
        );

        {
            let mut document = self.document.write().await;
            document.set_slides(record.content.clone());
            document.set_current_slide_index(index);
        }
        self.selection.write().await.clear_active_elements();
        self.cursor.set_cursor(target);
        Ok(())
    }

    async fn capture(&self) -> SnapshotDraft {
        let document = self.document.read().await;
        SnapshotDraft::capture(&**document)
    }

    fn emit(&self, kind: HistoryEventKind) {
        let event = HistoryEvent {
            kind,
            status: self.status(),
        };
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Receives an event for every operation that changes the history.
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    /// Every retained snapshot, oldest first.
    pub async fn snapshots(&self) -> Result<Vec<SnapshotRecord>, HistoryError> {
        self.log.read_all().await
    }

    pub fn log(&self) -> &dyn SnapshotLog {
        self.log.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.can_redo()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.cursor()
    }

    pub fn length(&self) -> usize {
        self.cursor.length()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn status(&self) -> HistoryStatus {
        self.cursor.status()
    }
}
