//! Bounded linear undo/redo history for slide decks.
//!
//! A [`HistoryController`] keeps full snapshots of a deck in a [`SnapshotLog`] and a
//! [`HistoryCursor`] pointing at the snapshot currently shown. Hosts call
//! [`HistoryController::record`] after each edit and [`HistoryController::undo`] /
//! [`HistoryController::redo`] to navigate.

pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod snapshot;
pub mod store;

pub use config::{load_config, Capacity, HistoryConfig};
pub use document::{
    Deck, DocumentModel, Selection, SelectionState, SharedDocument, SharedSelection, Slide,
};
pub use error::HistoryError;
pub use history::{
    HistoryController, HistoryCursor, HistoryEvent, HistoryEventKind, HistoryStatus, RecordPlan,
};
pub use snapshot::{SnapshotDraft, SnapshotField, SnapshotId, SnapshotRecord};
pub use store::{JsonFileSnapshotLog, LogTransaction, MemorySnapshotLog, SnapshotLog};
