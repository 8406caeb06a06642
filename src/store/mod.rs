mod json_file;
mod memory;
mod table;
mod types;

pub use json_file::JsonFileSnapshotLog;
pub use memory::MemorySnapshotLog;
pub use types::{LogTransaction, SnapshotLog};
