use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::InvalidArgument;

/// Destination cloud of a migration. The set is closed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudType {
    Aws,
    Azure,
    Vsphere,
    Vcloud,
}

impl CloudType {
    pub const ALL: [CloudType; 4] = [
        CloudType::Aws,
        CloudType::Azure,
        CloudType::Vsphere,
        CloudType::Vcloud,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudType::Aws => "aws",
            CloudType::Azure => "azure",
            CloudType::Vsphere => "vsphere",
            CloudType::Vcloud => "vcloud",
        }
    }
}

impl Display for CloudType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudType {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CloudType::ALL
            .into_iter()
            .find(|cloud| cloud.as_str() == s)
            .ok_or_else(|| InvalidArgument::UnknownCloudType(s.to_owned()))
    }
}
