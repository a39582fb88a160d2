use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use apkdiff_diff::{project, Classification, Group, Policy, ProjectedLine};
use apkdiff_index::{resolve_index_path, IndexError, IndexSnapshot};
use colored::Colorize;
use tracing::{info, warn};

use crate::cli::*;
use crate::config::DiffConfig;
use crate::report::{open_sink, Report};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = DiffConfig::load_or_default(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(config.with_diff_args(&args), cli.format),
        Command::List(args) => cmd_list(config, args, cli.format),
        Command::Summary(args) => cmd_summary(config.with_snapshot_args(&args.snapshots), cli.format),
    }
}

/// Load one snapshot, returning the resolved path alongside it.
fn load_snapshot(path: &Path, missing_as_empty: bool) -> anyhow::Result<(PathBuf, IndexSnapshot)> {
    let resolved = resolve_index_path(path);
    match IndexSnapshot::load(&resolved) {
        Ok(snapshot) => Ok((resolved, snapshot)),
        Err(IndexError::Io { source, .. })
            if missing_as_empty && source.kind() == ErrorKind::NotFound =>
        {
            warn!(path = %resolved.display(), "index not found, treating as empty");
            Ok((resolved, IndexSnapshot::empty()))
        }
        Err(e) => Err(e).with_context(|| format!("loading index {}", resolved.display())),
    }
}

struct Matchup {
    new_path: PathBuf,
    old_path: PathBuf,
    classification: Classification,
}

fn matchup(config: &DiffConfig) -> anyhow::Result<Matchup> {
    let (old_path, old) = load_snapshot(&config.old, config.missing_as_empty)?;
    let (new_path, new) = load_snapshot(&config.new, config.missing_as_empty)?;

    info!(policy = %config.policy, "doing matchups");
    let classification = config.policy.classify(&old.records, &new.records);
    Ok(Matchup {
        new_path,
        old_path,
        classification,
    })
}

fn cmd_diff(config: DiffConfig, format: OutputFormat) -> anyhow::Result<()> {
    let m = matchup(&config)?;
    let output = config.output_config();
    let groups = output.groups(config.policy.strategy());
    let lines = project(&m.classification, &groups, &output.repo);

    let report = Report::matchup(&m.new_path, &m.old_path, config.policy, lines);
    let mut sink = open_sink(&config.output)?;
    report.write(&mut *sink, format)
}

fn cmd_list(config: DiffConfig, args: ListArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (path, snapshot) = load_snapshot(&args.index, false)?;
    let repo = args.repo.unwrap_or(config.repo);
    let output = args.output.unwrap_or(config.output);

    let lines: Vec<ProjectedLine> = snapshot
        .records
        .iter()
        .map(|rec| ProjectedLine::new(rec, &repo))
        .collect();
    let report = Report::listing(&path, lines);
    let mut sink = open_sink(&output)?;
    report.write(&mut *sink, format)
}

fn cmd_summary(config: DiffConfig, format: OutputFormat) -> anyhow::Result<()> {
    let m = matchup(&config)?;
    let c = &m.classification;

    if format == OutputFormat::Json {
        let value = serde_json::json!({
            "new": m.new_path.display().to_string(),
            "old": m.old_path.display().to_string(),
            "policy": config.policy,
            "added": c.additions(),
            "removed": c.removals(),
            "common": c.unchanged(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}", "new:".bold(), m.new_path.display());
    println!("{} {}", "old:".bold(), m.old_path.display());
    match config.policy {
        Policy::FullTuple => {
            println!("  {:>8} {}", c.additions().to_string().green(), Group::Added);
            println!("  {:>8} {}", c.unchanged().to_string().dimmed(), Group::Common);
            println!("  {:>8} {}", c.removals().to_string().red(), Group::Removed);
        }
        Policy::NameKeyed => {
            println!("  {:>8} changed", c.additions().to_string().yellow());
        }
    }
    Ok(())
}
