use serde::{Deserialize, Serialize};

use super::types::{DocumentModel, Slide};

/// A plain in-memory slide deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    slides: Vec<Slide>,
    current: usize,
}

impl Deck {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides, current: 0 }
    }

    pub fn with_focus(mut self, index: usize) -> Self {
        self.current = index;
        self
    }

    fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }
}

impl DocumentModel for Deck {
    fn current_slide_index(&self) -> usize {
        self.current
    }

    fn current_slides(&self) -> Vec<Slide> {
        self.slides.clone()
    }

    fn set_slides(&mut self, slides: Vec<Slide>) {
        self.slides = slides;
    }

    fn set_current_slide_index(&mut self, index: usize) {
        self.current = index;
    }

    fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
        self.current = self.last_index();
    }

    fn remove_slide(&mut self, index: usize) -> Option<Slide> {
        if index >= self.slides.len() {
            return None;
        }
        let removed = self.slides.remove(index);
        self.current = self.current.min(self.last_index());
        Some(removed)
    }

    fn focus(&mut self, index: usize) {
        self.current = index.min(self.last_index());
    }
}
