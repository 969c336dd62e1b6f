use ferry_system::{InvalidArgument, Ip};
use serde::{Deserialize, Serialize};

use crate::Workload;

/// Login details of a machine to migrate from.
///
/// All three values are non-empty, and the ip never changes once set.
/// Deserialization goes through the same checks as [`Source::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SourceFields")]
pub struct Source {
    ip: Ip,
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct SourceFields {
    ip: Ip,
    username: String,
    password: String,
}

impl Source {
    pub fn new(
        ip: impl Into<Ip>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        let ip = ip.into();
        let username = username.into();
        let password = password.into();

        if ip.is_empty() {
            return Err(InvalidArgument::EmptyIp);
        }
        if username.is_empty() {
            return Err(InvalidArgument::EmptyUsername);
        }
        if password.is_empty() {
            return Err(InvalidArgument::EmptyPassword);
        }

        Ok(Self {
            ip,
            username,
            password,
        })
    }

    pub fn ip(&self) -> &Ip {
        &self.ip
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl TryFrom<SourceFields> for Source {
    type Error = InvalidArgument;

    fn try_from(fields: SourceFields) -> Result<Self, Self::Error> {
        let SourceFields {
            ip,
            username,
            password,
        } = fields;
        Source::new(ip, username, password)
    }
}

impl TryFrom<&Workload> for Source {
    type Error = InvalidArgument;

    fn try_from(workload: &Workload) -> Result<Self, Self::Error> {
        Source::new(
            workload.ip.clone(),
            workload.credentials.username.clone(),
            workload.credentials.password.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_system::Credentials;

    #[test]
    fn accessors() {
        let s = Source::new("192.168.1.1", "user", "pass").unwrap();
        assert_eq!(s.ip().as_ref(), "192.168.1.1");
        assert_eq!(s.username(), "user");
        assert_eq!(s.password(), "pass");
    }

    #[test]
    fn empty_ip() {
        assert_eq!(
            Source::new("", "user", "pass"),
            Err(InvalidArgument::EmptyIp)
        );
    }

    #[test]
    fn empty_username() {
        assert_eq!(
            Source::new("192.168.1.1", "", "pass"),
            Err(InvalidArgument::EmptyUsername)
        );
    }

    #[test]
    fn empty_password() {
        assert_eq!(
            Source::new("192.168.1.1", "user", ""),
            Err(InvalidArgument::EmptyPassword)
        );
    }

    #[test]
    fn from_workload() {
        let workload = Workload::new("10.0.0.5", Credentials::new("root", "toor", "lab"), vec![]);
        let source = Source::try_from(&workload).unwrap();
        assert_eq!(source.ip(), &workload.ip);
        assert_eq!(source.username(), "root");
        assert_eq!(source.password(), "toor");

        let anonymous = Workload::new("10.0.0.5", Credentials::new("", "", ""), vec![]);
        assert_eq!(
            Source::try_from(&anonymous),
            Err(InvalidArgument::EmptyUsername)
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: Source =
            serde_json::from_str(r#"{"ip":"1.2.3.4","username":"u","password":"p"}"#).unwrap();
        assert_eq!(ok.ip().as_ref(), "1.2.3.4");

        let err = serde_json::from_str::<Source>(r#"{"ip":"","username":"u","password":"p"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("ip must not be empty"));
    }
}
