use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    error::HistoryError,
    snapshot::{SnapshotDraft, SnapshotField, SnapshotId, SnapshotRecord},
};

use super::{
    table::{SnapshotTable, StoredLog},
    types::{LogTransaction, SnapshotLog},
};

/// Snapshot log persisted as a single JSON document.
///
/// Every write serializes the whole table to a temporary file, syncs it and renames
/// it over the log file. A failed write removes the temporary file and leaves the
/// previous log file in place. The in-memory table is only replaced once the rename
/// succeeds. The parent directory is not synced, so a crash right after the rename
/// may still surface the previous file.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotLog {
    path: PathBuf,
    table: SnapshotTable,
}

impl JsonFileSnapshotLog {
    /// Opens the log at `path`, starting empty when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let table = match fs::read(&path).await {
            Ok(data) => {
                let stored: StoredLog = serde_json::from_slice(&data)?;
                SnapshotTable::from_stored(stored)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => SnapshotTable::default(),
            Err(err) => return Err(HistoryError::Io(err)),
        };
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&mut self, next: SnapshotTable) -> Result<(), HistoryError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).await?;
            }
        }
        let payload = serde_json::to_vec_pretty(&next.to_stored())?;
        let tmp = self.tmp_path();
        let written = match write_synced(&tmp, &payload).await {
            Ok(()) => fs::rename(&tmp, &self.path).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not remove {}: {cleanup}", tmp.display());
                }
            }
            return Err(HistoryError::Io(err));
        }
        self.table = next;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn write_synced(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(payload).await?;
    file.sync_all().await
}

#[async_trait]
impl SnapshotLog for JsonFileSnapshotLog {
    async fn append(&mut self, draft: SnapshotDraft) -> Result<SnapshotId, HistoryError> {
        let mut next = self.table.clone();
        let id = next.append(draft);
        self.persist(next).await?;
        Ok(id)
    }

    async fn list_keys(&self) -> Result<Vec<SnapshotId>, HistoryError> {
        Ok(self.table.keys())
    }

    async fn read_all(&self) -> Result<Vec<SnapshotRecord>, HistoryError> {
        Ok(self.table.records())
    }

    async fn update_field(
        &mut self,
        id: SnapshotId,
        field: SnapshotField,
    ) -> Result<(), HistoryError> {
        let mut next = self.table.clone();
        next.update(id, field)?;
        self.persist(next).await
    }

    async fn delete_many(&mut self, ids: &[SnapshotId]) -> Result<(), HistoryError> {
        let mut next = self.table.clone();
        next.delete(ids);
        self.persist(next).await
    }

    async fn commit(&mut self, txn: LogTransaction) -> Result<SnapshotId, HistoryError> {
        let mut next = self.table.clone();
        let id = next.apply(txn)?;
        self.persist(next).await?;
        Ok(id)
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}
