//! Selectable matching policies behind one interface.

use std::fmt;
use std::str::FromStr;

use apkdiff_types::PackageRecord;
use serde::{Deserialize, Serialize};

use crate::classification::{Classification, Group};
use crate::error::DiffError;
use crate::{full_tuple, name_keyed};

/// A strategy for classifying two record collections.
pub trait MatchPolicy {
    /// Human-readable policy name.
    fn name(&self) -> &'static str;

    /// The groups this policy fills, in output order.
    fn groups(&self) -> &'static [Group];

    /// Classify `old` against `new`. `old` is always the earlier snapshot.
    fn classify(&self, old: &[PackageRecord], new: &[PackageRecord]) -> Classification;
}

/// Exact `(hash, name, size, version)` matching with complete, symmetric
/// classification.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullTuplePolicy;

impl MatchPolicy for FullTuplePolicy {
    fn name(&self) -> &'static str {
        "full-tuple"
    }

    fn groups(&self) -> &'static [Group] {
        &[Group::Added, Group::Common, Group::Removed]
    }

    fn classify(&self, old: &[PackageRecord], new: &[PackageRecord]) -> Classification {
        full_tuple::diff(old, new)
    }
}

/// Name-joined, hash-compared matching.
///
/// The changed set lands in `added`, ordered by name. `removed` and `common`
/// stay empty: old-only packages are not told apart from changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameKeyedPolicy;

impl MatchPolicy for NameKeyedPolicy {
    fn name(&self) -> &'static str {
        "name-keyed"
    }

    fn groups(&self) -> &'static [Group] {
        &[Group::Added]
    }

    fn classify(&self, old: &[PackageRecord], new: &[PackageRecord]) -> Classification {
        Classification {
            added: name_keyed::merge(old, new).into_values().collect(),
            ..Classification::new()
        }
    }
}

/// Selector for the available policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    #[default]
    FullTuple,
    NameKeyed,
}

impl Policy {
    /// The strategy implementing this policy.
    pub fn strategy(self) -> &'static dyn MatchPolicy {
        match self {
            Self::FullTuple => &FullTuplePolicy,
            Self::NameKeyed => &NameKeyedPolicy,
        }
    }

    /// Classify with the selected strategy.
    pub fn classify(self, old: &[PackageRecord], new: &[PackageRecord]) -> Classification {
        self.strategy().classify(old, new)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy().name())
    }
}

impl FromStr for Policy {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-tuple" | "full" => Ok(Self::FullTuple),
            "name-keyed" | "name" => Ok(Self::NameKeyed),
            other => Err(DiffError::UnknownPolicy(other.to_string())),
        }
    }
}
