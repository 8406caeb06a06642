use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// An opaque slide object. History never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slide(pub serde_json::Value);

impl Slide {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Slide {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The editable document whose states are captured and restored.
pub trait DocumentModel: Send + Sync {
    fn current_slide_index(&self) -> usize;

    fn current_slides(&self) -> Vec<Slide>;

    fn set_slides(&mut self, slides: Vec<Slide>);

    fn set_current_slide_index(&mut self, index: usize);

    /// Appends a slide and focuses it.
    fn push_slide(&mut self, slide: Slide) {
        let mut slides = self.current_slides();
        slides.push(slide);
        let last = slides.len() - 1;
        self.set_slides(slides);
        self.set_current_slide_index(last);
    }

    /// Removes the slide at `index`, keeping focus on a slide that still exists.
    fn remove_slide(&mut self, index: usize) -> Option<Slide> {
        let mut slides = self.current_slides();
        if index >= slides.len() {
            return None;
        }
        let removed = slides.remove(index);
        let focus = self
            .current_slide_index()
            .min(slides.len().saturating_sub(1));
        self.set_slides(slides);
        self.set_current_slide_index(focus);
        Some(removed)
    }

    /// Moves focus, clamped to the last slide.
    fn focus(&mut self, index: usize) {
        let last = self.current_slides().len().saturating_sub(1);
        self.set_current_slide_index(index.min(last));
    }
}

/// Application state holding the currently selected element ids.
pub trait SelectionState: Send + Sync {
    fn clear_active_elements(&mut self);
}

/// Document handle shared between the host and its history.
pub type SharedDocument = Arc<RwLock<Box<dyn DocumentModel>>>;

/// Selection handle shared between the host and its history.
pub type SharedSelection = Arc<RwLock<Box<dyn SelectionState>>>;
