use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentModel, Slide};

/// Key assigned by a snapshot log on append. Later appends get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(u64);

impl SnapshotId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A captured document state that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDraft {
    pub focus_index: usize,
    pub content: Vec<Slide>,
    pub captured_at: DateTime<Utc>,
}

impl SnapshotDraft {
    pub fn new(focus_index: usize, content: Vec<Slide>) -> Self {
        Self {
            focus_index,
            content,
            captured_at: Utc::now(),
        }
    }

    /// Deep-copies the document's slides and focused index.
    pub fn capture(document: &dyn DocumentModel) -> Self {
        Self::new(document.current_slide_index(), document.current_slides())
    }

    pub fn into_record(self, id: SnapshotId) -> SnapshotRecord {
        SnapshotRecord {
            id,
            focus_index: self.focus_index,
            content: self.content,
            captured_at: self.captured_at,
        }
    }
}

/// A snapshot as stored in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: SnapshotId,
    /// Slide to focus when this snapshot is restored.
    pub focus_index: usize,
    pub content: Vec<Slide>,
    pub captured_at: DateTime<Utc>,
}

impl SnapshotRecord {
    /// Focus index to restore, clamped to the slides this snapshot actually has.
    pub fn restore_index(&self) -> usize {
        self.focus_index.min(self.content.len().saturating_sub(1))
    }

    pub fn apply(&mut self, field: SnapshotField) {
        match field {
            SnapshotField::FocusIndex(index) => self.focus_index = index,
        }
    }
}

/// Fields of a stored snapshot that may be rewritten in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotField {
    FocusIndex(usize),
}
