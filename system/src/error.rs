use displaydoc::Display;
use thiserror::Error;

/// Rejected constructor input. Nothing is built when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Display)]
pub enum InvalidArgument {
    /// ip must not be empty
    EmptyIp,
    /// username must not be empty
    EmptyUsername,
    /// password must not be empty
    EmptyPassword,
    /// unknown cloud type: {0:?} (expected one of aws, azure, vsphere, vcloud)
    UnknownCloudType(String),
}
