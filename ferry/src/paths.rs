use std::{
    env::{self, VarError},
    path::{Path, PathBuf},
};
use thiserror::Error;

const PROJECT_NAME: &str = "ferry";

#[derive(Debug, Clone)]
pub struct Paths {
    data_dir: PathBuf,
}

#[derive(Error, Debug, Clone)]
pub enum PathsError {
    #[error("cannot locate data directory: {0}")]
    Var(#[from] VarError),
}

impl Paths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    #[cfg(target_os = "linux")]
    pub fn create() -> Result<Paths, PathsError> {
        let data_dir: PathBuf = Self::var("XDG_DATA_HOME")
            .or_else(|_| Self::var("HOME").map(|home| format!("{home}/.local/share")))
            .map(From::from)?;
        Ok(Paths::new(data_dir.join(PROJECT_NAME)))
    }

    #[cfg(target_os = "macos")]
    pub fn create() -> Result<Paths, PathsError> {
        let home_dir: PathBuf = Self::var("HOME").map(From::from)?;
        Ok(Paths::new(home_dir.join("Library").join(PROJECT_NAME)))
    }

    #[cfg(target_os = "windows")]
    pub fn create() -> Result<Paths, PathsError> {
        let local_app_data_dir: PathBuf = Self::var("LOCALAPPDATA").map(From::from)?;
        Ok(Paths::new(local_app_data_dir.join(PROJECT_NAME)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_file(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }

    fn var(var: &str) -> Result<String, PathsError> {
        env::var(var).map_err(From::from)
    }
}
