use ferry_migration::{GateScope, SleepDelay, VolumePolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs::read_to_string;

use crate::paths::{Paths, PathsError};

pub const CONFIG_FILE_NAME: &str = "ferry.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Paths(#[from] PathsError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    store: Option<PathBuf>,
    transfer_delay_ms: Option<u64>,
    #[serde(default)]
    policy: PolicyToml,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyToml {
    volume_allowed: Option<bool>,
    restricted_volume: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Store file. When unset, the platform data directory is used.
    pub store: Option<PathBuf>,
    pub transfer_delay: Duration,
    pub policy: VolumePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: None,
            transfer_delay: SleepDelay::DEFAULT,
            policy: VolumePolicy::default(),
        }
    }
}

impl Config {
    /// Load from a TOML file, or from `ferry.toml` inside a directory.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_owned()
        };
        let string = read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?;
        Self::parse(&string, &path)
    }

    /// Parse TOML read from `path`. Relative paths inside resolve against
    /// the file's directory.
    pub fn parse(string: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: ConfigToml = toml::from_str(string).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        let ConfigToml {
            store,
            transfer_delay_ms,
            policy,
        } = config;

        let store = store.map(|store| Self::resolve_path(path, store));
        let transfer_delay = transfer_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(SleepDelay::DEFAULT);

        let PolicyToml {
            volume_allowed,
            restricted_volume,
        } = policy;
        let policy = VolumePolicy {
            volume_allowed: volume_allowed.unwrap_or(true),
            scope: match restricted_volume {
                Some(name) => GateScope::Volume { name },
                None => GateScope::Migration,
            },
        };

        Ok(Config {
            store,
            transfer_delay,
            policy,
        })
    }

    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => Ok(Paths::create()?.store_file()),
        }
    }

    pub fn policy(&self) -> &VolumePolicy {
        &self.policy
    }

    pub fn transfer_delay(&self) -> SleepDelay {
        SleepDelay::new(self.transfer_delay)
    }

    fn resolve_path(base_path: &Path, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            return path;
        }
        match base_path.parent() {
            Some(parent) => parent.join(path),
            None => path,
        }
    }
}
