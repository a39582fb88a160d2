use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use apkdiff_diff::{Policy, ProjectedLine};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Marker in front of every package line of a text report.
pub const APLINE_PREFIX: &str = "{apline}";

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the packages of a report came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Source {
    Matchup { new: String, old: String, policy: Policy },
    Listing { index: String },
}

/// A rendered report: header data plus projected package lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub version: &'static str,
    #[serde(flatten)]
    pub source: Source,
    pub packages: Vec<ProjectedLine>,
}

impl Report {
    pub fn matchup(new: &Path, old: &Path, policy: Policy, packages: Vec<ProjectedLine>) -> Self {
        Self {
            version: VERSION,
            source: Source::Matchup {
                new: new.display().to_string(),
                old: old.display().to_string(),
                policy,
            },
            packages,
        }
    }

    pub fn listing(index: &Path, packages: Vec<ProjectedLine>) -> Self {
        Self {
            version: VERSION,
            source: Source::Listing {
                index: index.display().to_string(),
            },
            packages,
        }
    }

    pub fn write(&self, out: &mut dyn Write, format: OutputFormat) -> anyhow::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self).context("encoding JSON report")?;
                writeln!(out)?;
            }
        }
        out.flush().context("flushing report")
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        match &self.source {
            Source::Matchup { new, old, .. } => {
                writeln!(out, "# Alpine-diff matchup, version: {}", self.version)?;
                writeln!(out, "# new: {new} old: {old}")?;
            }
            Source::Listing { index } => {
                writeln!(out, "# Alpine-diff listing, version: {}", self.version)?;
                writeln!(out, "# index: {index}")?;
            }
        }
        for line in &self.packages {
            writeln!(out, "{APLINE_PREFIX}{line}")?;
        }
        Ok(())
    }
}

/// Open the report destination: `-` is stdout, anything else a created file.
pub fn open_sink(output: &str) -> anyhow::Result<Box<dyn Write>> {
    if output == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(output).with_context(|| format!("creating output {output}"))?;
    Ok(Box::new(BufWriter::new(file)))
}
