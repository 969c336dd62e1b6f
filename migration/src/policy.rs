use ferry_system::MountPoint;
use serde::{Deserialize, Serialize};

/// What a denied volume permission blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GateScope {
    /// Any migration at all.
    #[default]
    Migration,
    /// Only migrations that select the named volume.
    Volume { name: String },
}

/// Permission for migrating the restricted volume, owned by each migration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumePolicy {
    pub volume_allowed: bool,
    #[serde(default)]
    pub scope: GateScope,
}

impl Default for VolumePolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl VolumePolicy {
    pub fn allow_all() -> Self {
        Self {
            volume_allowed: true,
            scope: GateScope::Migration,
        }
    }

    pub fn deny_all() -> Self {
        Self {
            volume_allowed: false,
            scope: GateScope::Migration,
        }
    }

    pub fn deny_volume(name: impl Into<String>) -> Self {
        Self {
            volume_allowed: false,
            scope: GateScope::Volume { name: name.into() },
        }
    }

    pub fn permits(&self, selected: &[MountPoint]) -> bool {
        if self.volume_allowed {
            return true;
        }
        match &self.scope {
            GateScope::Migration => false,
            GateScope::Volume { name } => !selected.iter().any(|mp| &mp.name == name),
        }
    }
}
