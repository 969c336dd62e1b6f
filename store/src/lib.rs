//! Whole-file persistence of tracked records.
//!
//! The file holds a versioned JSON envelope (see [`FORMAT_VERSION`]) with
//! every record tagged by its kind. Writes go through a temp file and a
//! rename. There is no locking: one writer at a time.

mod encoding;
mod local;
mod record;

pub use crate::encoding::FORMAT_VERSION;
pub use crate::local::{LocalFileStore, SubStore};
pub use crate::record::{Record, RecordKey, RecordKind};

use std::path::{Path, PathBuf};

use displaydoc::Display;
use ferry_fs::FsError;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::record::dedup_by_key;

#[derive(Debug, Error, Display)]
pub enum StoreError {
    /// {0}
    Fs(#[from] FsError),
    /// failed to encode records: {0}
    Encode(#[source] serde_json::Error),
    /// failed to decode records: {0}
    Decode(#[source] serde_json::Error),
    /// unsupported store format version {found} (expected {expected})
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Debug, Clone)]
pub struct PersistenceLayer {
    records: Vec<Record>,
    path: PathBuf,
    local_file_store: LocalFileStore,
}

impl PersistenceLayer {
    pub fn new(records: Vec<Record>, path: impl Into<PathBuf>) -> Self {
        Self {
            records,
            path: path.into(),
            local_file_store: LocalFileStore,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records currently held in memory.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Hold `record` in memory, replacing any record with the same key.
    pub fn track(&mut self, record: impl Into<Record>) {
        let record = record.into();
        let key = record.key();
        match self.records.iter_mut().find(|tracked| tracked.key() == key) {
            Some(tracked) => *tracked = record,
            None => self.records.push(record),
        }
    }

    /// Write `records`, or the in-memory records when `None` or empty.
    ///
    /// One record is kept per (kind, ip), the first one seen.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn create(&mut self, records: Option<Vec<Record>>) -> Result<(), StoreError> {
        let records = match records {
            Some(records) if !records.is_empty() => records,
            _ => self.records.clone(),
        };
        let records = dedup_by_key(records);
        let bytes = encoding::encode(&records)?;
        self.local_file_store.write(&self.path, &bytes).await?;
        debug!(count = records.len(), "wrote records");
        Ok(())
    }

    /// Replace the in-memory records with the file's contents.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn read(&mut self) -> Result<&[Record], StoreError> {
        let bytes = self.local_file_store.read(&self.path).await?;
        self.records = encoding::decode(&bytes)?;
        debug!(count = self.records.len(), "read records");
        Ok(&self.records)
    }

    /// Merge the in-memory records with the persisted ones and write the
    /// result back. In-memory records win when both sides share a key.
    ///
    /// A store file that does not exist yet counts as empty.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn update(&mut self) -> Result<(), StoreError> {
        let persisted = match self.local_file_store.read(&self.path).await {
            Ok(bytes) => encoding::decode(&bytes)?,
            Err(error) if error.is_not_found() => Vec::new(),
            Err(error) => return Err(error.into()),
        };

        let mut merged = self.records.clone();
        for record in persisted {
            if !merged.contains(&record) {
                merged.push(record);
            }
        }
        let merged = dedup_by_key(merged);
        debug!(count = merged.len(), "merged records");

        self.create(Some(merged.clone())).await?;
        self.records = merged;
        Ok(())
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn delete(&mut self) -> Result<(), StoreError> {
        self.local_file_store.remove(&self.path).await?;
        info!("deleted store");
        Ok(())
    }
}
