use std::fmt;

use apkdiff_types::PackageRecord;
use serde::{Deserialize, Serialize};

/// The outcome of comparing two index snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// Records only in the new snapshot, in new-snapshot order.
    pub added: Vec<PackageRecord>,
    /// Records only in the old snapshot, in old-snapshot order.
    pub removed: Vec<PackageRecord>,
    /// Records present in both, in new-snapshot order.
    pub common: Vec<PackageRecord>,
}

impl Classification {
    /// Create an empty classification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing was added or removed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Number of added records.
    pub fn additions(&self) -> usize {
        self.added.len()
    }

    /// Number of removed records.
    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    /// Number of records present in both snapshots.
    pub fn unchanged(&self) -> usize {
        self.common.len()
    }

    /// The records of one group.
    pub fn group(&self, group: Group) -> &[PackageRecord] {
        match group {
            Group::Added => &self.added,
            Group::Removed => &self.removed,
            Group::Common => &self.common,
        }
    }
}

/// One of the three classification groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Added,
    Removed,
    Common,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.write_str("added"),
            Self::Removed => f.write_str("removed"),
            Self::Common => f.write_str("common"),
        }
    }
}
