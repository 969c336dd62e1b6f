use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MigrationState {
    #[default]
    #[serde(rename = "not started")]
    NotStarted,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "success")]
    Success,
}

impl MigrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationState::NotStarted => "not started",
            MigrationState::Running => "running",
            MigrationState::Error => "error",
            MigrationState::Success => "success",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MigrationState::Error | MigrationState::Success)
    }
}

impl Display for MigrationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
