use std::{
    convert::Infallible,
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Network address of a workload, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ip(String);

impl Ip {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Ip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Ip {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Ip {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl FromStr for Ip {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for Ip {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
