use std::{fmt::Debug, path::PathBuf};

use async_trait::async_trait;
use ferry_fs::{self as fs, FsError};

/// Byte storage behind a [`crate::PersistenceLayer`].
#[async_trait]
pub trait SubStore {
    type ItemId;
    type Error: Debug;

    async fn read(&mut self, id: &Self::ItemId) -> Result<Vec<u8>, Self::Error>;

    async fn write(&mut self, id: &Self::ItemId, bytes: &[u8]) -> Result<(), Self::Error>;

    async fn remove(&mut self, id: &Self::ItemId) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Default)]
pub struct LocalFileStore;

#[async_trait]
impl SubStore for LocalFileStore {
    type ItemId = PathBuf;
    type Error = FsError;

    async fn read(&mut self, id: &Self::ItemId) -> Result<Vec<u8>, Self::Error> {
        fs::read_file(id).await
    }

    async fn write(&mut self, id: &Self::ItemId, bytes: &[u8]) -> Result<(), Self::Error> {
        fs::write_file_atomic(id, bytes).await
    }

    async fn remove(&mut self, id: &Self::ItemId) -> Result<(), Self::Error> {
        fs::remove_file(id).await
    }
}
