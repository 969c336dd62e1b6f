//! Run workload migrations and keep a record of them on disk.

mod config;
mod paths;

pub use crate::config::{CONFIG_FILE_NAME, Config, ConfigError};
pub use crate::paths::{Paths, PathsError};

pub use ferry_machine as machine;
pub use ferry_migration as migration;
pub use ferry_store as store;
pub use ferry_system as system;

use std::path::Path;

use ferry_machine::{MigrationTarget, Source, Workload};
use ferry_migration::{Migration, MigrationRunError, TransferDelay};
use ferry_store::{PersistenceLayer, StoreError};
use ferry_system::MountPoint;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FerryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Migration(#[from] MigrationRunError),
}

#[derive(Debug, Clone)]
pub struct Ferry {
    config: Config,
    store: PersistenceLayer,
}

impl Ferry {
    pub fn new(config: Config) -> Result<Self, FerryError> {
        let store_path = config.store_path()?;
        info!(store = %store_path.display(), "using store");
        let store = PersistenceLayer::new(Vec::new(), store_path);
        Ok(Self { config, store })
    }

    pub async fn load(config_path: &Path) -> Result<Self, FerryError> {
        let config = Config::load(config_path).await?;
        Self::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &PersistenceLayer {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PersistenceLayer {
        &mut self.store
    }

    /// A new migration governed by the configured volume policy.
    pub fn migration(
        &self,
        selected_mount_points: Vec<MountPoint>,
        source: Workload,
        migration_target: MigrationTarget,
    ) -> Migration {
        Migration::new(
            selected_mount_points,
            source,
            migration_target,
            self.config.policy().clone(),
        )
    }

    /// Run with the configured transfer delay.
    pub async fn run(&mut self, migration: &mut Migration) -> Result<(), FerryError> {
        let delay = self.config.transfer_delay();
        self.run_with(migration, &delay).await
    }

    /// Run `migration` and record the outcome, successful or rejected.
    pub async fn run_with(
        &mut self,
        migration: &mut Migration,
        delay: &dyn TransferDelay,
    ) -> Result<(), FerryError> {
        let outcome = migration.run(delay).await;
        if matches!(&outcome, Err(error) if !error.is_gate_rejection()) {
            return outcome.map_err(FerryError::from);
        }

        match Source::try_from(migration.source()) {
            Ok(source) => self.store.track(source),
            Err(error) => debug!(%error, "source workload not tracked"),
        }
        self.store.track(migration.clone());
        self.store.update().await?;

        info!(state = %migration.state(), "recorded migration");
        outcome.map_err(FerryError::from)
    }
}
