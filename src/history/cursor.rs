use serde::{Deserialize, Serialize};

/// Position in the snapshot history plus the number of snapshots retained.
///
/// The setters store values as given. Keeping `cursor < length` is up to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    cursor: Option<usize>,
    length: usize,
}

impl HistoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = Some(cursor);
    }

    pub fn set_length(&mut self, length: usize) {
        self.length = length;
    }

    /// Back to the uninitialized state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `None` until the history has been initialized.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor with `-1` standing for "uninitialized".
    pub fn cursor_index(&self) -> i64 {
        self.cursor.map_or(-1, |c| c as i64)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.length)
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            cursor: self.cursor,
            length: self.length,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

/// Read-only view of a history's position, for hosts that drive undo/redo buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStatus {
    pub cursor: Option<usize>,
    pub length: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::HistoryCursor;

    #[test]
    fn starts_uninitialized() {
        let cursor = HistoryCursor::new();
        assert_eq!(cursor.cursor(), None);
        assert_eq!(cursor.cursor_index(), -1);
        assert_eq!(cursor.length(), 0);
        assert!(!cursor.can_undo());
        assert!(!cursor.can_redo());
    }

    #[rstest]
    #[case(0, 1, false, false)]
    #[case(0, 3, false, true)]
    #[case(1, 3, true, true)]
    #[case(2, 3, true, false)]
    fn predicates_follow_position(
        #[case] position: usize,
        #[case] length: usize,
        #[case] can_undo: bool,
        #[case] can_redo: bool,
    ) {
        let mut cursor = HistoryCursor::new();
        cursor.set_cursor(position);
        cursor.set_length(length);
        assert_eq!(cursor.can_undo(), can_undo);
        assert_eq!(cursor.can_redo(), can_redo);
        let status = cursor.status();
        assert_eq!(status.cursor, Some(position));
        assert_eq!((status.can_undo, status.can_redo), (can_undo, can_redo));
    }

    #[test]
    fn reset_clears_position() {
        let mut cursor = HistoryCursor::new();
        cursor.set_cursor(4);
        cursor.set_length(5);
        cursor.reset();
        assert_eq!(cursor, HistoryCursor::default());
    }
}
