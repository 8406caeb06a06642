use super::cursor::HistoryStatus;

pub(super) const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Which operation changed the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEventKind {
    Initialized,
    Recorded,
    Undone,
    Redone,
}

/// Emitted after an operation has changed the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    pub kind: HistoryEventKind,
    /// Position after the operation
    pub status: HistoryStatus,
}
