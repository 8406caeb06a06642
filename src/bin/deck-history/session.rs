use deck_history::{
    HistoryController, HistoryError, Selection, SharedDocument, Slide, SnapshotRecord,
};

use crate::command::{Command, HELP};

pub enum Outcome {
    Continue(String),
    Quit,
}

/// A deck being edited, with every edit recorded in its history.
pub struct Session {
    history: HistoryController,
    document: SharedDocument,
    selection: Selection,
}

impl Session {
    pub async fn start(
        mut history: HistoryController,
        document: SharedDocument,
        selection: Selection,
    ) -> Result<Self, HistoryError> {
        history.init().await?;
        Ok(Self {
            history,
            document,
            selection,
        })
    }

    pub async fn apply(&mut self, command: Command) -> Result<Outcome, HistoryError> {
        let message = match command {
            Command::Add(slide) => self.add(slide).await?,
            Command::Remove(index) => self.remove(index).await?,
            Command::Focus(index) => self.focus(index).await,
            Command::Select(id) => {
                self.selection.select(id);
                format!("selected: {}", self.selection.active_elements().join(", "))
            }
            Command::Undo if !self.history.can_undo() => "nothing to undo".to_string(),
            Command::Undo => {
                self.history.undo().await?;
                self.status_line()
            }
            Command::Redo if !self.history.can_redo() => "nothing to redo".to_string(),
            Command::Redo => {
                self.history.redo().await?;
                self.status_line()
            }
            Command::Status => self.status_report().await?,
            Command::Show => self.show().await,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(message))
    }

    async fn add(&mut self, slide: Slide) -> Result<String, HistoryError> {
        self.document.write().await.push_slide(slide);
        self.history.record().await?;
        Ok(self.status_line())
    }

    async fn remove(&mut self, index: usize) -> Result<String, HistoryError> {
        if self.document.write().await.remove_slide(index).is_none() {
            return Ok(format!("no slide at {index}"));
        }
        self.history.record().await?;
        Ok(self.status_line())
    }

    async fn focus(&mut self, index: usize) -> String {
        let mut doc = self.document.write().await;
        doc.focus(index);
        format!("viewing slide {}", doc.current_slide_index())
    }

    async fn show(&self) -> String {
        let doc = self.document.read().await;
        let current = doc.current_slide_index();
        let slides = doc.current_slides();
        if slides.is_empty() {
            return "(empty deck)".to_string();
        }
        slides
            .iter()
            .enumerate()
            .map(|(i, slide)| {
                let marker = if i == current { '>' } else { ' ' };
                format!("{marker} {i}: {}", slide.value())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn status_line(&self) -> String {
        let status = self.history.status();
        format!(
            "history {}/{} (undo: {}, redo: {})",
            status.cursor.map_or(0, |c| c + 1),
            status.length,
            yes_no(status.can_undo),
            yes_no(status.can_redo)
        )
    }

    async fn status_report(&self) -> Result<String, HistoryError> {
        let records = self.history.snapshots().await?;
        let cursor = self.history.cursor();
        let mut lines = vec![self.status_line()];
        lines.extend(records.iter().enumerate().map(|(i, record)| {
            let marker = if Some(i) == cursor { '>' } else { ' ' };
            describe(marker, i, record)
        }));
        Ok(lines.join("\n"))
    }
}

fn describe(marker: char, position: usize, record: &SnapshotRecord) -> String {
    format!(
        "{marker} {position}: {} slides, focus {}, {} ({})",
        record.content.len(),
        record.focus_index,
        record.id,
        record.captured_at.format("%H:%M:%S")
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use deck_history::{Deck, MemorySnapshotLog, SharedSelection};
    use tokio::sync::RwLock;

    use super::*;

    async fn session() -> (Session, SharedDocument) {
        let document: SharedDocument = Arc::new(RwLock::new(Box::new(Deck::default())));
        let selection = Selection::default();
        let shared: SharedSelection = Arc::new(RwLock::new(Box::new(selection.clone())));
        let history = HistoryController::new(
            Box::new(MemorySnapshotLog::new()),
            Arc::clone(&document),
            shared,
        );
        let session = Session::start(history, Arc::clone(&document), selection)
            .await
            .expect("start");
        (session, document)
    }

    async fn run(session: &mut Session, line: &str) -> String {
        let command = Command::parse(line).expect("parse");
        match session.apply(command).await.expect("apply") {
            Outcome::Continue(message) => message,
            Outcome::Quit => "quit".to_string(),
        }
    }

    #[tokio::test]
    async fn edits_are_undoable() {
        let (mut session, document) = session().await;
        run(&mut session, "add Intro").await;
        run(&mut session, "add Agenda").await;
        assert_eq!(document.read().await.current_slides().len(), 2);

        assert_eq!(run(&mut session, "undo").await, "history 2/3 (undo: yes, redo: yes)");
        assert_eq!(document.read().await.current_slides().len(), 1);

        run(&mut session, "redo").await;
        assert_eq!(document.read().await.current_slides().len(), 2);
        assert_eq!(run(&mut session, "redo").await, "nothing to redo");
    }

    #[tokio::test]
    async fn remove_out_of_range_records_nothing() {
        let (mut session, _document) = session().await;
        run(&mut session, "add Intro").await;
        assert_eq!(run(&mut session, "remove 4").await, "no slide at 4");
        assert_eq!(session.history.length(), 2);
    }

    #[tokio::test]
    async fn removing_focused_last_slide_is_recorded() {
        let (mut session, document) = session().await;
        run(&mut session, "add A").await;
        run(&mut session, "add B").await;
        run(&mut session, "remove 1").await;
        assert_eq!(document.read().await.current_slide_index(), 0);
        assert_eq!(session.history.length(), 4);
        assert_eq!(run(&mut session, "remove 0").await, "history 5/5 (undo: yes, redo: no)");
        assert_eq!(run(&mut session, "remove 0").await, "no slide at 0");
        assert_eq!(session.history.length(), 5);
    }

    #[tokio::test]
    async fn focus_is_not_an_edit() {
        let (mut session, document) = session().await;
        run(&mut session, "add A").await;
        run(&mut session, "add B").await;
        assert_eq!(run(&mut session, "focus 9").await, "viewing slide 1");
        run(&mut session, "focus 0").await;
        assert_eq!(document.read().await.current_slide_index(), 0);
        assert_eq!(session.history.length(), 3);
    }

    #[tokio::test]
    async fn undo_clears_selection() {
        let (mut session, _document) = session().await;
        run(&mut session, "add A").await;
        run(&mut session, "select title").await;
        run(&mut session, "undo").await;
        assert!(session.selection.active_elements().is_empty());
        assert!(matches!(
            session.apply(Command::Quit).await.expect("apply"),
            Outcome::Quit
        ));
    }
}
