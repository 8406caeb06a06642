mod deck;
mod selection;
mod types;

pub use deck::Deck;
pub use selection::Selection;
pub use types::{DocumentModel, SelectionState, SharedDocument, SharedSelection, Slide};
