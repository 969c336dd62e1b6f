use std::fmt::{self, Display, Formatter};

use ferry_system::{Credentials, Ip, MountPoint};
use serde::{Deserialize, Serialize};

/// A virtual machine's identity plus its attached storage.
///
/// Fields are public: a migration rewrites the target workload in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Workload {
    pub ip: Ip,
    pub credentials: Credentials,
    pub storage: Vec<MountPoint>,
}

impl Workload {
    pub fn new(ip: impl Into<Ip>, credentials: Credentials, storage: Vec<MountPoint>) -> Self {
        Self {
            ip: ip.into(),
            credentials,
            storage,
        }
    }

    pub fn mount_point(&self, name: &str) -> Option<&MountPoint> {
        self.storage.iter().find(|mount_point| mount_point.name == name)
    }

    pub fn mount_point_names(&self) -> impl Iterator<Item = &str> {
        self.storage.iter().map(|mount_point| mount_point.name.as_str())
    }
}

impl Display for Workload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "workload:{}:{}:[", self.ip, self.credentials)?;
        for (index, mount_point) in self.storage.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(mount_point, f)?;
        }
        f.write_str("]")
    }
}
