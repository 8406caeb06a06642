use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;
use tokio::sync::RwLock;

use crate::{
    config::HistoryConfig,
    document::{Deck, Selection, SharedDocument, SharedSelection, Slide},
    store::MemorySnapshotLog,
};

use super::HistoryController;

#[derive(Debug, Clone)]
enum Op {
    /// Append a slide, focus `focus`, record.
    Edit { focus: usize },
    /// Drop the first slide, record.
    Remove,
    Undo,
    Redo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..12).prop_map(|focus| Op::Edit { focus }),
        1 => Just(Op::Remove),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

/// Plain vector history the controller should agree with.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(usize, Vec<Slide>)>,
    cursor: usize,
}

impl Model {
    fn record(&mut self, capacity: usize, focus: usize, content: Vec<Slide>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push((focus, content));
        while self.entries.len() > capacity {
            self.entries.remove(0);
        }
        let len = self.entries.len();
        if len >= 2 {
            self.entries[len - 2].0 = focus;
        }
        self.cursor = len - 1;
    }

    fn current(&self) -> (usize, &[Slide]) {
        let (focus, content) = &self.entries[self.cursor];
        (
            (*focus).min(content.len().saturating_sub(1)),
            content.as_slice(),
        )
    }
}

async fn run_ops(capacity: usize, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let deck = Deck::new(vec![Slide::new(json!(0))]);
    let document: SharedDocument = Arc::new(RwLock::new(Box::new(deck)));
    let selection: SharedSelection = Arc::new(RwLock::new(Box::new(Selection::default())));
    let mut history = HistoryController::with_config(
        Box::new(MemorySnapshotLog::new()),
        Arc::clone(&document),
        selection,
        &HistoryConfig::with_capacity(capacity),
    );
    history.init().await.expect("init");

    let mut model = Model::default();
    model.entries.push((0, vec![Slide::new(json!(0))]));
    let mut counter = 1;

    for op in ops {
        let mut restored = false;
        match op {
            Op::Edit { focus } => {
                let content = {
                    let mut doc = document.write().await;
                    let mut slides = doc.current_slides();
                    slides.push(Slide::new(json!(counter)));
                    doc.set_slides(slides.clone());
                    doc.set_current_slide_index(focus);
                    slides
                };
                counter += 1;
                history.record().await.expect("record");
                model.record(capacity, focus, content);
            }
            Op::Remove => {
                let (focus, content) = {
                    let mut doc = document.write().await;
                    let mut slides = doc.current_slides();
                    if !slides.is_empty() {
                        slides.remove(0);
                    }
                    doc.set_slides(slides.clone());
                    (doc.current_slide_index(), slides)
                };
                history.record().await.expect("record");
                model.record(capacity, focus, content);
            }
            Op::Undo => {
                history.undo().await.expect("undo");
                if model.cursor > 0 {
                    model.cursor -= 1;
                    restored = true;
                }
            }
            Op::Redo => {
                history.redo().await.expect("redo");
                if model.cursor + 1 < model.entries.len() {
                    model.cursor += 1;
                    restored = true;
                }
            }
        }

        let length = history.length();
        let cursor = history.cursor().expect("initialized");
        let stored = history.log().list_keys().await.expect("keys").len();
        prop_assert_eq!(length, stored);
        prop_assert!(length <= capacity);
        prop_assert!(cursor < length);
        prop_assert_eq!(history.can_undo(), cursor > 0);
        prop_assert_eq!(history.can_redo(), cursor + 1 < length);
        prop_assert_eq!(length, model.entries.len());
        prop_assert_eq!(cursor, model.cursor);

        // After an edit the document keeps the focus the user chose, unclamped.
        let doc = document.read().await;
        let (focus, content) = model.current();
        let slides = doc.current_slides();
        prop_assert_eq!(slides.as_slice(), content);
        if restored {
            prop_assert_eq!(doc.current_slide_index(), focus);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn history_matches_vector_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        runtime.block_on(run_ops(capacity, ops))?;
    }
}
