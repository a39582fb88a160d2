use std::path::PathBuf;

use apkdiff_diff::Policy;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apkdiff",
    about = "Alpine Index Diff: compare two APKINDEX snapshots",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with defaults for any diff option
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify the packages of two indexes as added, removed or common
    Diff(DiffArgs),
    /// List every package of one index
    List(ListArgs),
    /// Show package counts per group
    Summary(SummaryArgs),
}

#[derive(Args, Default)]
pub struct DiffArgs {
    #[command(flatten)]
    pub snapshots: SnapshotArgs,
    /// Repo path to use in the file list
    #[arg(long)]
    pub repo: Option<String>,
    /// Output file for the comparison result, `-` for stdout
    #[arg(long)]
    pub output: Option<String>,
    /// Display packages only in the new index
    #[arg(long, alias = "showAdded")]
    pub show_added: bool,
    /// Display packages only in the old index
    #[arg(long, alias = "showRemoved")]
    pub show_removed: bool,
    /// Display packages in both indexes
    #[arg(long, alias = "showCommon")]
    pub show_common: bool,
}

#[derive(Args, Default)]
pub struct SnapshotArgs {
    /// The newer APKINDEX.tar.gz file or repository directory
    #[arg(long)]
    pub new: Option<PathBuf>,
    /// The older APKINDEX.tar.gz file or repository directory
    #[arg(long)]
    pub old: Option<PathBuf>,
    /// Matching policy
    #[arg(long)]
    pub policy: Option<Policy>,
    /// Treat a missing index as one with no packages
    #[arg(long)]
    pub missing_as_empty: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// APKINDEX.tar.gz file or repository directory
    pub index: PathBuf,
    #[arg(long)]
    pub repo: Option<String>,
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub snapshots: SnapshotArgs,
}
