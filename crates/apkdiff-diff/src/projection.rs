use std::fmt;

use apkdiff_types::{package_path, PackageRecord};
use serde::Serialize;

use crate::classification::{Classification, Group};

/// A record rendered for output: checksum, size and the repository-relative
/// artifact path, tagged with its group when it came from a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectedLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    pub hash: String,
    pub size: u64,
    pub path: String,
}

impl ProjectedLine {
    pub fn new(record: &PackageRecord, repo_prefix: &str) -> Self {
        Self {
            group: None,
            hash: record.hash.clone(),
            size: record.size,
            path: package_path(repo_prefix, record),
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.group = Some(group);
        self
    }
}

impl fmt::Display for ProjectedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.hash, self.size, self.path)
    }
}

/// Project the selected groups of `classification`, group by group in the
/// order given.
pub fn project(
    classification: &Classification,
    groups: &[Group],
    repo_prefix: &str,
) -> Vec<ProjectedLine> {
    groups
        .iter()
        .flat_map(|&group| {
            classification
                .group(group)
                .iter()
                .map(move |rec| ProjectedLine::new(rec, repo_prefix).with_group(group))
        })
        .collect()
}
