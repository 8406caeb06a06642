mod controller;
mod cursor;
mod events;
mod plan;

pub use controller::HistoryController;
pub use cursor::{HistoryCursor, HistoryStatus};
pub use events::{HistoryEvent, HistoryEventKind};
pub use plan::RecordPlan;

#[cfg(test)]
mod proptests;
