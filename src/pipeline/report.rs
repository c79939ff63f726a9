//! Rendering of classified jobs into the text and JSON reports.

use chrono::TimeDelta;
use serde::Serialize;

use super::classifier::{ClassifiedJob, Indicator};

/// Renders one line per job. Normal jobs carry no tag.
pub fn render_text(jobs: &[ClassifiedJob<'_>]) -> String {
    let mut out = String::new();
    for classified in jobs {
        out.push_str(&render_line(classified));
        out.push('\n');
    }
    out
}

fn render_line(classified: &ClassifiedJob<'_>) -> String {
    let job = classified.job;
    let description = job.description.as_deref().unwrap_or("<unnamed>");
    let tag = match classified.indicator {
        Some(Indicator::Warning) => "[WARNING] ",
        Some(Indicator::Error) => "[ERROR] ",
        Some(Indicator::Normal) | None => "",
    };

    match (job.start_time, job.end_time, classified.duration) {
        (Some(start), Some(end), Some(duration)) => format!(
            "{tag}pid {} {description} took {} ({start} - {end})",
            job.process_id,
            format_duration(duration)
        ),
        (Some(start), None, _) => format!(
            "pid {} {description} started at {start} with no END entry",
            job.process_id
        ),
        (None, Some(end), _) => format!(
            "pid {} {description} ended at {end} with no START entry",
            job.process_id
        ),
        _ => format!("pid {} {description} has no timing entries", job.process_id),
    }
}

/// Pretty JSON array of the classified jobs.
pub fn render_json(jobs: &[ClassifiedJob<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(jobs)
}

/// Spells a duration out with unit labels, e.g. `5 minutes 3 seconds`.
///
/// Minutes and seconds are always present; hours only when non-zero. A
/// sub-second remainder is kept as a decimal fraction of the seconds.
pub fn format_duration(duration: TimeDelta) -> String {
    let sign = if duration < TimeDelta::zero() { "-" } else { "" };
    let total = duration.num_seconds().unsigned_abs();
    let nanos = duration.subsec_nanos().unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    parts.push(unit(minutes, "minute"));
    if nanos == 0 {
        parts.push(unit(seconds, "second"));
    } else {
        let fraction = format!("{nanos:09}");
        parts.push(format!("{seconds}.{} seconds", fraction.trim_end_matches('0')));
    }
    format!("{sign}{}", parts.join(" "))
}

fn unit(n: u64, label: &str) -> String {
    if n == 1 {
        format!("{n} {label}")
    } else {
        format!("{n} {label}s")
    }
}

/// Per-indicator counts for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub normal: usize,
    pub warnings: usize,
    pub errors: usize,
    pub partial: usize,
}

impl Summary {
    pub fn from_jobs(jobs: &[ClassifiedJob<'_>]) -> Self {
        let mut summary = Self {
            total: jobs.len(),
            ..Self::default()
        };
        for classified in jobs {
            match classified.indicator {
                Some(Indicator::Normal) => summary.normal += 1,
                Some(Indicator::Warning) => summary.warnings += 1,
                Some(Indicator::Error) => summary.errors += 1,
                None => summary.partial += 1,
            }
        }
        summary
    }
}
