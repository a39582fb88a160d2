use std::path::{Path, PathBuf};

use anyhow::Context;
use apkdiff_diff::{Group, MatchPolicy, Policy};
use serde::{Deserialize, Serialize};

use crate::cli::{DiffArgs, SnapshotArgs};

/// Settings for a diff run.
///
/// Values come from the built-in defaults, then an optional TOML file, then
/// command-line flags. A visibility flag set in either place is enabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// The newer index file or repository directory.
    pub new: PathBuf,
    /// The older index file or repository directory.
    pub old: PathBuf,
    /// Repository path prefix for package paths.
    pub repo: String,
    /// Output file, `-` for stdout.
    pub output: String,
    pub show_added: bool,
    pub show_removed: bool,
    pub show_common: bool,
    pub policy: Policy,
    /// Treat a missing index as one with no packages.
    pub missing_as_empty: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            new: PathBuf::from("NEW_APKINDEX.tar.gz"),
            old: PathBuf::from("OLD_APKINDEX.tar.gz"),
            repo: "/latest-stable/main/x86_64".into(),
            output: "-".into(),
            show_added: false,
            show_removed: false,
            show_common: false,
            policy: Policy::FullTuple,
            missing_as_empty: false,
        }
    }
}

impl DiffConfig {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_snapshot_args(mut self, args: &SnapshotArgs) -> Self {
        if let Some(new) = &args.new {
            self.new = new.clone();
        }
        if let Some(old) = &args.old {
            self.old = old.clone();
        }
        if let Some(policy) = args.policy {
            self.policy = policy;
        }
        self.missing_as_empty |= args.missing_as_empty;
        self
    }

    pub fn with_diff_args(self, args: &DiffArgs) -> Self {
        let mut config = self.with_snapshot_args(&args.snapshots);
        if let Some(repo) = &args.repo {
            config.repo = repo.clone();
        }
        if let Some(output) = &args.output {
            config.output = output.clone();
        }
        config.show_added |= args.show_added;
        config.show_removed |= args.show_removed;
        config.show_common |= args.show_common;
        config
    }

    /// The immutable settings the report writer needs.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            repo: self.repo.clone(),
            show_added: self.show_added,
            show_removed: self.show_removed,
            show_common: self.show_common,
        }
    }
}

/// Which groups to print and under which repository prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub repo: String,
    pub show_added: bool,
    pub show_removed: bool,
    pub show_common: bool,
}

impl OutputConfig {
    pub fn shows(&self, group: Group) -> bool {
        match group {
            Group::Added => self.show_added,
            Group::Removed => self.show_removed,
            Group::Common => self.show_common,
        }
    }

    /// The visible groups the policy produces, in the policy's output order.
    pub fn groups(&self, policy: &dyn MatchPolicy) -> Vec<Group> {
        policy.groups().iter().copied().filter(|g| self.shows(*g)).collect()
    }
}
