use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{trace, warn};

#[derive(Error, Debug)]
pub enum FsError {
    #[error("Cannot create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create file '{path}': {source}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot rename file from '{from}' to '{to}': {source}")]
    RenameFile {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot delete file '{path}': {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FsError {
    pub fn is_not_found(&self) -> bool {
        let source = match self {
            FsError::CreateDir { source, .. }
            | FsError::CreateFile { source, .. }
            | FsError::WriteFile { source, .. }
            | FsError::ReadFile { source, .. }
            | FsError::RenameFile { source, .. }
            | FsError::RemoveFile { source, .. } => source,
        };
        source.kind() == std::io::ErrorKind::NotFound
    }
}

pub async fn create_dir<P: AsRef<Path>>(path: P) -> Result<(), FsError> {
    let p = path.as_ref();
    fs::create_dir_all(p)
        .await
        .map_err(|source| FsError::CreateDir {
            path: p.to_path_buf(),
            source,
        })
}

pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, FsError> {
    let p = path.as_ref();
    fs::read(p).await.map_err(|source| FsError::ReadFile {
        path: p.to_path_buf(),
        source,
    })
}

pub async fn write_file<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), FsError> {
    let p = path.as_ref();
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(p)
        .await
        .map_err(|source| FsError::CreateFile {
            path: p.to_path_buf(),
            source,
        })?;
    let write_error = |source| FsError::WriteFile {
        path: p.to_path_buf(),
        source,
    };
    file.write_all(data).await.map_err(write_error)?;
    file.sync_all().await.map_err(write_error)
}

/// Write through a sibling `<name>.tmp` file, then rename it over `path`.
///
/// Readers see either the old contents or the new, never a partial write.
/// Missing parent directories are created.
pub async fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), FsError> {
    let p = path.as_ref();
    if let Some(parent) = p.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_dir(parent).await?;
    }

    let tmp = tmp_path(p);
    trace!(path = %p.display(), tmp = %tmp.display(), bytes = data.len(), "atomic write");
    write_file(&tmp, data).await?;
    if let Err(error) = rename_file(&tmp, p).await {
        if let Err(cleanup) = remove_file(&tmp).await {
            warn!(%cleanup, "leftover temp file");
        }
        return Err(error);
    }
    Ok(())
}

pub async fn rename_file<F: AsRef<Path>, T: AsRef<Path>>(from: F, to: T) -> Result<(), FsError> {
    let from_p = from.as_ref();
    let to_p = to.as_ref();
    fs::rename(from_p, to_p)
        .await
        .map_err(|source| FsError::RenameFile {
            from: from_p.to_path_buf(),
            to: to_p.to_path_buf(),
            source,
        })
}

pub async fn remove_file<P: AsRef<Path>>(path: P) -> Result<(), FsError> {
    let p = path.as_ref();
    fs::remove_file(p)
        .await
        .map_err(|source| FsError::RemoveFile {
            path: p.to_path_buf(),
            source,
        })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("ferry"));
    name.push(".tmp");
    path.with_file_name(name)
}
