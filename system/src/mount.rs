use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeSize(u64);

impl From<u64> for VolumeSize {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<VolumeSize> for u64 {
    fn from(value: VolumeSize) -> Self {
        value.0
    }
}

impl Display for VolumeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named storage volume attached to a workload, e.g. `C:\`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountPoint {
    pub name: String,
    pub size: VolumeSize,
}

impl MountPoint {
    pub fn new(name: impl Into<String>, size: impl Into<VolumeSize>) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
        }
    }
}

impl Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mountpoint:{}:{}", self.name, self.size)
    }
}
