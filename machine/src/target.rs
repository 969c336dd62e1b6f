use std::fmt::{self, Display, Formatter};

use ferry_system::{CloudType, Credentials, InvalidArgument};
use serde::{Deserialize, Serialize};

use crate::Workload;

/// Where a workload is migrated to: a cloud, its credentials, and the
/// shape of the destination VM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MigrationTarget {
    cloud_type: CloudType,
    cloud_credentials: Credentials,
    target_vm: Workload,
}

impl MigrationTarget {
    /// Fails unless `cloud` is one of `aws`, `azure`, `vsphere`, `vcloud`.
    pub fn new(
        cloud: &str,
        cloud_credentials: Credentials,
        target_vm: Workload,
    ) -> Result<Self, InvalidArgument> {
        let cloud_type = cloud.parse()?;
        Ok(Self::with_cloud_type(
            cloud_type,
            cloud_credentials,
            target_vm,
        ))
    }

    pub fn with_cloud_type(
        cloud_type: CloudType,
        cloud_credentials: Credentials,
        target_vm: Workload,
    ) -> Self {
        Self {
            cloud_type,
            cloud_credentials,
            target_vm,
        }
    }

    pub fn cloud_type(&self) -> CloudType {
        self.cloud_type
    }

    pub fn cloud_credentials(&self) -> &Credentials {
        &self.cloud_credentials
    }

    pub fn target_vm(&self) -> &Workload {
        &self.target_vm
    }

    pub fn target_vm_mut(&mut self) -> &mut Workload {
        &mut self.target_vm
    }
}

impl Display for MigrationTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "migration_target:{}:{}:{}",
            self.cloud_type, self.cloud_credentials, self.target_vm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_system::MountPoint;

    fn target_vm() -> Workload {
        Workload::new(
            "192.168.1.1",
            Credentials::new("name", "pass", "domain"),
            vec![MountPoint::new("c:", 10), MountPoint::new("d:", 10)],
        )
    }

    fn cloud_credentials() -> Credentials {
        Credentials::new("cloudname", "cloudpass", "domain")
    }

    #[test]
    fn accepts_known_cloud() {
        let mt = MigrationTarget::new("aws", cloud_credentials(), target_vm()).unwrap();
        assert_eq!(mt.cloud_type(), CloudType::Aws);
        assert_eq!(mt.cloud_credentials(), &cloud_credentials());
        assert_eq!(mt.target_vm(), &target_vm());
    }

    #[test]
    fn cloud_type_not_in_set() {
        assert_eq!(
            MigrationTarget::new("google", cloud_credentials(), target_vm()),
            Err(InvalidArgument::UnknownCloudType("google".to_owned()))
        );
    }

    #[test]
    fn display() {
        let mt = MigrationTarget::with_cloud_type(
            CloudType::Vcloud,
            cloud_credentials(),
            Workload::new("10.0.0.2", Credentials::new("t", "p", "d"), vec![]),
        );
        assert_eq!(
            mt.to_string(),
            "migration_target:vcloud:credentials:cloudname:domain:workload:10.0.0.2:credentials:t:d:[]"
        );
    }
}
