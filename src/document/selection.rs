use std::sync::{Arc, Mutex, MutexGuard};

use super::types::SelectionState;

/// Ids of the elements the user currently has selected.
///
/// Clones share the same list, so the host can keep a handle while the history
/// holds another one behind a [`SharedSelection`](super::SharedSelection).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    active: Arc<Mutex<Vec<String>>>,
}

impl Selection {
    pub fn select(&self, id: impl Into<String>) {
        let id = id.into();
        let mut active = self.lock();
        if !active.contains(&id) {
            active.push(id);
        }
    }

    pub fn active_elements(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SelectionState for Selection {
    fn clear_active_elements(&mut self) {
        self.lock().clear();
    }
}
