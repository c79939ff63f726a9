use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::cli::ReportFormat;
use crate::pipeline::{Pipeline, Summary, render_json, render_text};
use crate::server::report_file_name;
use crate::ui::SummaryPrinter;

/// Where a generated report ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    Stdout,
    Directory(PathBuf),
}

/// Reads `input`, runs the pipeline and delivers the report to `target`.
///
/// Returns the written file path, if any, along with the summary counts.
pub fn run_report(
    pipeline: &Pipeline,
    input: &Path,
    format: ReportFormat,
    target: &ReportTarget,
) -> Result<(Option<PathBuf>, Summary)> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read log file {}", input.display()))?;

    let jobs = pipeline.jobs(&text);
    let classified = pipeline.classify(&jobs);
    let summary = Summary::from_jobs(&classified);
    let rendered = match format {
        ReportFormat::Text => render_text(&classified),
        ReportFormat::Json => render_json(&classified)?,
    };

    let written = match target {
        ReportTarget::Stdout => {
            print!("{rendered}");
            None
        }
        ReportTarget::Directory(dir) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(report_file_name(Utc::now(), format.extension()));
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            info!(path = %path.display(), jobs = summary.total, "report written");
            Some(path)
        }
    };

    SummaryPrinter::default().print(&summary, written.as_deref());
    Ok((written, summary))
}
