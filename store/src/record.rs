use std::fmt::{self, Display, Formatter};

use ferry_machine::{MigrationTarget, Source, Workload};
use ferry_migration::Migration;
use ferry_system::Ip;
use serde::{Deserialize, Serialize};

/// Anything the persistence layer tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Source(Source),
    Workload(Workload),
    MigrationTarget(MigrationTarget),
    Migration(Migration),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Source,
    Workload,
    MigrationTarget,
    Migration,
}

/// Identity used for deduplication: one record per kind and ip.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub kind: RecordKind,
    pub ip: Ip,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Source(_) => RecordKind::Source,
            Record::Workload(_) => RecordKind::Workload,
            Record::MigrationTarget(_) => RecordKind::MigrationTarget,
            Record::Migration(_) => RecordKind::Migration,
        }
    }

    pub fn ip(&self) -> &Ip {
        match self {
            Record::Source(source) => source.ip(),
            Record::Workload(workload) => &workload.ip,
            Record::MigrationTarget(target) => &target.target_vm().ip,
            Record::Migration(migration) => &migration.source().ip,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            kind: self.kind(),
            ip: self.ip().clone(),
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Source => write!(f, "source"),
            RecordKind::Workload => write!(f, "workload"),
            RecordKind::MigrationTarget => write!(f, "migration_target"),
            RecordKind::Migration => write!(f, "migration"),
        }
    }
}

impl From<Source> for Record {
    fn from(value: Source) -> Self {
        Record::Source(value)
    }
}

impl From<Workload> for Record {
    fn from(value: Workload) -> Self {
        Record::Workload(value)
    }
}

impl From<MigrationTarget> for Record {
    fn from(value: MigrationTarget) -> Self {
        Record::MigrationTarget(value)
    }
}

impl From<Migration> for Record {
    fn from(value: Migration) -> Self {
        Record::Migration(value)
    }
}

/// Keep the first record for each key, preserving order.
pub(crate) fn dedup_by_key(records: Vec<Record>) -> Vec<Record> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.key()))
        .collect()
}
