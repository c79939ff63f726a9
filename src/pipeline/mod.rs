mod classifier;
mod parser;
mod reconciler;
mod record;
mod report;

pub use classifier::{ClassifiedJob, Classifier, Indicator, RolloverPolicy, ThresholdPolicy};
pub use parser::{parse, parse_line};
pub use reconciler::reconcile;
pub use record::{EntryKind, IntermediateRecord, JobRecord};
pub use report::{Summary, format_duration, render_json, render_text};

/// Runs raw log text through parsing, reconciliation and classification.
///
/// Every call works on its own data, so one `Pipeline` can serve many
/// concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Parses and reconciles `text`, returning jobs ordered by process id.
    pub fn jobs(&self, text: &str) -> Vec<JobRecord> {
        let records = parse(text);
        let mut jobs: Vec<JobRecord> = reconcile(&records).into_values().collect();
        jobs.sort_by_key(|job| job.process_id);
        jobs
    }

    pub fn classify<'a>(&self, jobs: &'a [JobRecord]) -> Vec<ClassifiedJob<'a>> {
        jobs.iter().map(|job| self.classifier.classify(job)).collect()
    }

    /// Text report for `text`. Malformed input only shrinks the report.
    pub fn report(&self, text: &str) -> String {
        let jobs = self.jobs(text);
        render_text(&self.classify(&jobs))
    }

    pub fn report_json(&self, text: &str) -> serde_json::Result<String> {
        let jobs = self.jobs(text);
        render_json(&self.classify(&jobs))
    }
}

/// Produces the text report for a log using the default thresholds.
pub fn produce_report(text: &str) -> String {
    Pipeline::default().report(text)
}
