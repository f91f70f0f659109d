// src/output/mod.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use prettytable::{Cell, Row, Table};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::extract::Report;

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Route a report to the renderer the CLI asked for.
pub fn render(report: &Report, cli: &Cli, results_dir: &Path) -> Result<()> {
    match cli.output {
        Some(OutputFormat::Pretty) => pretty_output(report),
        Some(OutputFormat::File) => {
            let path = file_output(report, cli.mode.name(), results_dir, Local::now())?;
            info!(path = %path.display(), "results saved");
        }
        None => default_output(report),
    }
    Ok(())
}

/// Space-joined fields, one line per row, header undistinguished.
fn default_output(report: &Report) {
    for row in report.all_rows() {
        println!("{}", row.join(" "));
    }
}

/// Left-aligned table with the header row as column titles.
fn pretty_output(report: &Report) {
    let mut table = Table::new();
    table.set_titles(Row::new(
        report.header().iter().map(|name| Cell::new(name)).collect(),
    ));
    for row in report.rows() {
        table.add_row(Row::new(row.iter().map(|field| Cell::new(field)).collect()));
    }
    table.printstd();
}

/// Write the full row set as CSV under `results_dir`, named after the
/// mode and the given instant. Returns the path written.
pub fn file_output(
    report: &Report,
    mode: &str,
    results_dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(results_dir)
        .with_context(|| format!("creating results dir {}", results_dir.display()))?;
    let file_name = format!("{mode}_{}.csv", now.format(DATETIME_FORMAT));
    let path = results_dir.join(file_name);

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(&path)
        .with_context(|| format!("creating results file {}", path.display()))?;
    for row in report.all_rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(path)
}
