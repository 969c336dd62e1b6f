//! Moving a workload's selected mount points onto a migration target.

mod delay;
mod policy;
mod state;

pub use crate::delay::*;
pub use crate::policy::*;
pub use crate::state::*;

use std::fmt::{self, Display, Formatter};

use displaydoc::Display;
use ferry_machine::{MigrationTarget, Workload};
use ferry_system::MountPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error, Display)]
pub enum MigrationRunError {
    /// migration already ran (state: {state})
    AlreadyStarted { state: MigrationState },
    /// selected mount points missing from source: {names:?}
    MissingMountPoints { names: Vec<String> },
    /// volume policy does not permit this migration
    VolumeNotPermitted,
}

impl MigrationRunError {
    /// Whether the migration itself was rejected by its gate, as opposed to
    /// `run` being called on a migration that already ran.
    pub fn is_gate_rejection(&self) -> bool {
        !matches!(self, MigrationRunError::AlreadyStarted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    selected_mount_points: Vec<MountPoint>,
    source: Workload,
    migration_target: MigrationTarget,
    state: MigrationState,
    policy: VolumePolicy,
}

impl Migration {
    pub fn new(
        selected_mount_points: Vec<MountPoint>,
        source: Workload,
        migration_target: MigrationTarget,
        policy: VolumePolicy,
    ) -> Self {
        Self {
            selected_mount_points,
            source,
            migration_target,
            state: MigrationState::NotStarted,
            policy,
        }
    }

    pub fn selected_mount_points(&self) -> &[MountPoint] {
        &self.selected_mount_points
    }

    pub fn source(&self) -> &Workload {
        &self.source
    }

    pub fn migration_target(&self) -> &MigrationTarget {
        &self.migration_target
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    pub fn policy(&self) -> &VolumePolicy {
        &self.policy
    }

    /// Copy the selected mount points, ip and credentials of the source onto
    /// the target VM.
    ///
    /// The gate is evaluated before the target is touched, so a rejected
    /// migration leaves the target exactly as it was; only the state moves
    /// to [`MigrationState::Error`]. The target is only changed once the
    /// transfer delay has elapsed, and dropping the future before then
    /// leaves the target untouched and the state at `Error`. A migration
    /// runs at most once.
    #[instrument(skip_all, fields(source = %self.source.ip))]
    pub async fn run(&mut self, delay: &dyn TransferDelay) -> Result<(), MigrationRunError> {
        if self.state != MigrationState::NotStarted {
            return Err(MigrationRunError::AlreadyStarted { state: self.state });
        }

        info!(
            target_ip = %self.migration_target.target_vm().ip,
            cloud = %self.migration_target.cloud_type(),
            "starting migration"
        );
        let gate = self.check_gate();
        let state = RunGuard::start(&mut self.state);

        if let Err(error) = gate {
            warn!(%error, "migration rejected");
            state.finish(MigrationState::Error);
            return Err(error);
        }

        let copied: Vec<MountPoint> = self
            .source
            .storage
            .iter()
            .filter(|mount_point| {
                self.selected_mount_points
                    .iter()
                    .any(|selected| selected.name == mount_point.name)
            })
            .inspect(|mount_point| {
                debug!(mount_point = %mount_point.name, size = %mount_point.size, "copying")
            })
            .cloned()
            .collect();

        delay.wait().await;

        let target_vm = self.migration_target.target_vm_mut();
        target_vm.storage.extend(copied);
        target_vm.ip = self.source.ip.clone();
        target_vm.credentials = self.source.credentials.clone();
        state.finish(MigrationState::Success);

        info!("migration succeeded");
        Ok(())
    }

    fn check_gate(&self) -> Result<(), MigrationRunError> {
        let missing: Vec<String> = self
            .selected_mount_points
            .iter()
            .filter(|selected| self.source.mount_point(&selected.name).is_none())
            .map(|selected| selected.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(MigrationRunError::MissingMountPoints { names: missing });
        }

        if !self.policy.permits(&self.selected_mount_points) {
            return Err(MigrationRunError::VolumeNotPermitted);
        }

        Ok(())
    }
}

/// Holds a migration in `Running` and moves it to `Error` if dropped before
/// [`RunGuard::finish`].
struct RunGuard<'a> {
    state: &'a mut MigrationState,
}

impl<'a> RunGuard<'a> {
    fn start(state: &'a mut MigrationState) -> Self {
        *state = MigrationState::Running;
        Self { state }
    }

    fn finish(self, state: MigrationState) {
        *self.state = state;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.state.is_terminal() {
            warn!("migration cancelled before completing");
            *self.state = MigrationState::Error;
        }
    }
}

impl Display for Migration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "migration:[")?;
        for (index, mount_point) in self.selected_mount_points.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(mount_point, f)?;
        }
        write!(
            f,
            "]:{}:{}:{}",
            self.source, self.migration_target, self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_system::Credentials;
    use std::time::Duration;

    fn source() -> Workload {
        Workload::new(
            "192.168.1.1",
            Credentials::new("name", "pass", "sourcedomain"),
            vec![
                MountPoint::new("c:", 10),
                MountPoint::new("d:", 10),
                MountPoint::new("e:", 10),
            ],
        )
    }

    fn target() -> MigrationTarget {
        let target_vm = Workload::new(
            "192.168.1.2",
            Credentials::new("targetname", "targetpass", "targetdomain"),
            vec![],
        );
        MigrationTarget::new(
            "aws",
            Credentials::new("cloudname", "cloudpass", "clouddomain"),
            target_vm,
        )
        .unwrap()
    }

    fn migration(selected: Vec<MountPoint>, policy: VolumePolicy) -> Migration {
        Migration::new(selected, source(), target(), policy)
    }

    #[test]
    fn starts_not_started() {
        let m = migration(vec![MountPoint::new("c:", 10)], VolumePolicy::default());
        assert_eq!(m.state(), MigrationState::NotStarted);
        assert_eq!(m.selected_mount_points(), &[MountPoint::new("c:", 10)]);
        assert_eq!(m.source(), &source());
        assert_eq!(m.migration_target(), &target());
    }

    #[tokio::test]
    async fn copies_only_selected() {
        let mut m = migration(vec![MountPoint::new("c:", 10)], VolumePolicy::allow_all());

        m.run(&NoDelay).await.unwrap();

        assert_eq!(m.state(), MigrationState::Success);
        let target_vm = m.migration_target().target_vm();
        assert_eq!(target_vm.storage, vec![MountPoint::new("c:", 10)]);
        assert_eq!(target_vm.ip, source().ip);
        assert_eq!(target_vm.credentials, source().credentials);
        // source is left untouched
        assert_eq!(m.source(), &source());
    }

    #[tokio::test]
    async fn appends_to_existing_target_storage() {
        let target_vm = Workload::new(
            "192.168.1.2",
            Credentials::new("t", "p", "d"),
            vec![MountPoint::new("f:", 10), MountPoint::new("g:", 10)],
        );
        let target = MigrationTarget::new("azure", Credentials::new("c", "p", "d"), target_vm)
            .unwrap();
        let mut m = Migration::new(
            vec![MountPoint::new("d:", 10)],
            source(),
            target,
            VolumePolicy::default(),
        );

        m.run(&NoDelay).await.unwrap();

        assert_eq!(
            m.migration_target().target_vm().storage,
            vec![
                MountPoint::new("f:", 10),
                MountPoint::new("g:", 10),
                MountPoint::new("d:", 10),
            ]
        );
    }

    #[tokio::test]
    async fn copies_in_source_order() {
        let mut m = migration(
            vec![MountPoint::new("e:", 10), MountPoint::new("c:", 10)],
            VolumePolicy::allow_all(),
        );

        m.run(&NoDelay).await.unwrap();

        let names: Vec<_> = m.migration_target().target_vm().mount_point_names().collect();
        assert_eq!(names, vec!["c:", "e:"]);
    }

    #[tokio::test]
    async fn copies_source_entry_not_selected_entry() {
        // selection matches by name; the size comes from the source volume
        let mut m = migration(vec![MountPoint::new("d:", 999)], VolumePolicy::allow_all());

        m.run(&NoDelay).await.unwrap();

        assert_eq!(
            m.migration_target().target_vm().storage,
            vec![MountPoint::new("d:", 10)]
        );
    }

    #[tokio::test]
    async fn missing_mount_point_is_rejected() {
        let mut m = migration(
            vec![MountPoint::new("c:", 10), MountPoint::new("z:", 10)],
            VolumePolicy::allow_all(),
        );

        let err = m.run(&NoDelay).await.unwrap_err();

        assert_eq!(
            err,
            MigrationRunError::MissingMountPoints {
                names: vec!["z:".to_owned()]
            }
        );
        assert!(err.is_gate_rejection());
        assert_eq!(m.state(), MigrationState::Error);
        assert_eq!(m.migration_target(), &target());
    }

    #[tokio::test]
    async fn denied_volume_blocks_whole_migration() {
        let mut m = migration(vec![MountPoint::new("d:", 10)], VolumePolicy::deny_all());

        let err = m.run(&NoDelay).await.unwrap_err();

        assert_eq!(err, MigrationRunError::VolumeNotPermitted);
        assert_eq!(m.state(), MigrationState::Error);
        assert_eq!(m.migration_target(), &target());
    }

    #[tokio::test]
    async fn volume_scope_only_blocks_named_volume() {
        let mut unrelated = migration(vec![MountPoint::new("d:", 10)], VolumePolicy::deny_volume("c:"));
        unrelated.run(&NoDelay).await.unwrap();
        assert_eq!(unrelated.state(), MigrationState::Success);

        let mut restricted = migration(
            vec![MountPoint::new("c:", 10), MountPoint::new("d:", 10)],
            VolumePolicy::deny_volume("c:"),
        );
        let err = restricted.run(&NoDelay).await.unwrap_err();
        assert_eq!(err, MigrationRunError::VolumeNotPermitted);
        assert!(restricted.migration_target().target_vm().storage.is_empty());
    }

    #[tokio::test]
    async fn runs_once() {
        let mut m = migration(vec![MountPoint::new("c:", 10)], VolumePolicy::allow_all());
        m.run(&NoDelay).await.unwrap();

        let err = m.run(&NoDelay).await.unwrap_err();

        assert_eq!(
            err,
            MigrationRunError::AlreadyStarted {
                state: MigrationState::Success
            }
        );
        assert!(!err.is_gate_rejection());
        assert_eq!(m.state(), MigrationState::Success);
        assert_eq!(m.migration_target().target_vm().storage.len(), 1);
    }

    #[tokio::test]
    async fn empty_selection_moves_identity_only() {
        let mut m = migration(vec![], VolumePolicy::allow_all());

        m.run(&NoDelay).await.unwrap();

        let target_vm = m.migration_target().target_vm();
        assert!(target_vm.storage.is_empty());
        assert_eq!(target_vm.ip, source().ip);
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_for_transfer() {
        let mut m = migration(vec![MountPoint::new("c:", 10)], VolumePolicy::allow_all());
        let started = tokio::time::Instant::now();

        m.run(&SleepDelay::default()).await.unwrap();

        assert!(started.elapsed() >= SleepDelay::DEFAULT);
        assert_eq!(m.state(), MigrationState::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_run_leaves_target_untouched() {
        let mut m = migration(vec![MountPoint::new("c:", 10)], VolumePolicy::allow_all());
        let delay = SleepDelay::new(Duration::from_secs(60));

        let timed_out = tokio::time::timeout(Duration::from_millis(10), m.run(&delay)).await;

        assert!(timed_out.is_err());
        assert_eq!(m.state(), MigrationState::Error);
        assert_eq!(m.migration_target(), &target());
        assert_eq!(
            m.run(&NoDelay).await.unwrap_err(),
            MigrationRunError::AlreadyStarted {
                state: MigrationState::Error
            }
        );
    }

    #[test]
    fn round_trips_through_json() {
        let m = migration(vec![MountPoint::new("c:", 10)], VolumePolicy::deny_volume("c:"));
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains(r#""state":"not started""#));
        let back: Migration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
