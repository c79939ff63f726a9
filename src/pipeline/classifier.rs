use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize, Serializer};

use super::record::JobRecord;

/// Severity assigned to a completed job based on how long it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Indicator {
    Normal,
    Warning,
    Error,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Normal => write!(f, "NORMAL"),
            Indicator::Warning => write!(f, "WARNING"),
            Indicator::Error => write!(f, "ERROR"),
        }
    }
}

/// Duration limits past which a job is flagged.
///
/// Both comparisons are strict: a job lasting exactly `warning_after` is normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    pub warning_after: TimeDelta,
    pub error_after: TimeDelta,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            warning_after: TimeDelta::minutes(5),
            error_after: TimeDelta::minutes(10),
        }
    }
}

impl ThresholdPolicy {
    /// Builds a policy from whole seconds, or `None` if either value is out of
    /// `TimeDelta` range.
    pub fn from_secs(warning_after: i64, error_after: i64) -> Option<Self> {
        Some(Self {
            warning_after: TimeDelta::try_seconds(warning_after)?,
            error_after: TimeDelta::try_seconds(error_after)?,
        })
    }

    pub fn indicator_for(&self, duration: TimeDelta) -> Indicator {
        if duration > self.error_after {
            Indicator::Error
        } else if duration > self.warning_after {
            Indicator::Warning
        } else {
            Indicator::Normal
        }
    }
}

/// What to do when a job's END clock time is earlier than its START.
///
/// Log lines carry no date, so a job running across midnight looks like it
/// ended before it began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolloverPolicy {
    /// Assume the job crossed midnight and add a day.
    #[default]
    Wrap,
    /// Report the negative difference as is.
    Preserve,
}

/// A reconciled job together with its derived duration and indicator.
///
/// `duration` and `indicator` are both `Some` exactly when the job has a
/// start and an end time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedJob<'a> {
    #[serde(flatten)]
    pub job: &'a JobRecord,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Option<TimeDelta>,
    pub indicator: Option<Indicator>,
}

fn serialize_secs<S: Serializer>(
    duration: &Option<TimeDelta>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    duration.map(|d| d.num_seconds()).serialize(serializer)
}

/// Computes durations and indicators using a fixed policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: ThresholdPolicy,
    rollover: RolloverPolicy,
}

impl Classifier {
    pub fn new(thresholds: ThresholdPolicy, rollover: RolloverPolicy) -> Self {
        Self {
            thresholds,
            rollover,
        }
    }

    /// Elapsed time between the job's START and END, if it has both.
    ///
    /// Both clock times are placed on the same calendar day before subtracting.
    pub fn duration(&self, job: &JobRecord) -> Option<TimeDelta> {
        let (start, end) = (job.start_time?, job.end_time?);
        let elapsed = anchor(end) - anchor(start);
        match self.rollover {
            RolloverPolicy::Wrap if elapsed < TimeDelta::zero() => {
                Some(elapsed + TimeDelta::days(1))
            }
            _ => Some(elapsed),
        }
    }

    pub fn classify<'a>(&self, job: &'a JobRecord) -> ClassifiedJob<'a> {
        let duration = self.duration(job);
        ClassifiedJob {
            job,
            duration,
            indicator: duration.map(|d| self.thresholds.indicator_for(d)),
        }
    }
}

// The date itself carries no meaning; it only has to be the same for both ends.
fn anchor(time: NaiveTime) -> NaiveDateTime {
    NaiveDate::default().and_time(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(start: Option<&str>, end: Option<&str>) -> JobRecord {
        JobRecord {
            process_id: 1,
            description: Some("Job".into()),
            start_time: start.map(|s| s.parse().unwrap()),
            end_time: end.map(|s| s.parse().unwrap()),
        }
    }

    #[test]
    fn default_thresholds() {
        let policy = ThresholdPolicy::default();
        assert_eq!(policy.warning_after, TimeDelta::minutes(5));
        assert_eq!(policy.error_after, TimeDelta::minutes(10));
        assert_eq!(Some(policy), ThresholdPolicy::from_secs(300, 600));
        assert!(ThresholdPolicy::from_secs(i64::MAX, i64::MAX).is_none());
    }

    #[test]
    fn classification_boundaries_are_strict() {
        let classifier = Classifier::default();
        let cases = [
            ("12:05:00", Indicator::Normal),
            ("12:05:01", Indicator::Warning),
            ("12:10:00", Indicator::Warning),
            ("12:10:01", Indicator::Error),
        ];
        for (end, expected) in cases {
            let job = job(Some("12:00:00"), Some(end));
            assert_eq!(classifier.classify(&job).indicator, Some(expected), "end {end}");
        }
    }

    #[test]
    fn duration_is_end_minus_start() {
        let classifier = Classifier::default();
        let job = job(Some("12:10:00"), Some("12:15:03"));
        let classified = classifier.classify(&job);
        assert_eq!(classified.duration, Some(TimeDelta::seconds(303)));
        assert_eq!(classified.indicator, Some(Indicator::Warning));
    }

    #[test]
    fn partial_jobs_have_no_duration_or_indicator() {
        let classifier = Classifier::default();
        for job in [
            job(Some("12:00:00"), None),
            job(None, Some("12:00:00")),
            job(None, None),
        ] {
            let classified = classifier.classify(&job);
            assert!(classified.duration.is_none());
            assert!(classified.indicator.is_none());
        }
    }

    #[test]
    fn midnight_rollover_wraps_by_default() {
        let classifier = Classifier::default();
        let job = job(Some("23:58:00"), Some("00:03:30"));
        assert_eq!(classifier.duration(&job), Some(TimeDelta::seconds(330)));
        assert_eq!(classifier.classify(&job).indicator, Some(Indicator::Warning));
    }

    #[test]
    fn midnight_rollover_preserved_when_configured() {
        let classifier = Classifier::new(ThresholdPolicy::default(), RolloverPolicy::Preserve);
        let job = job(Some("23:58:00"), Some("00:03:30"));
        let expected = TimeDelta::seconds(330) - TimeDelta::days(1);
        assert_eq!(classifier.duration(&job), Some(expected));
        assert_eq!(classifier.classify(&job).indicator, Some(Indicator::Normal));
    }

    #[test]
    fn zero_duration_is_normal() {
        let classifier = Classifier::default();
        let job = job(Some("08:00:00"), Some("08:00:00"));
        assert_eq!(classifier.duration(&job), Some(TimeDelta::zero()));
        assert_eq!(classifier.classify(&job).indicator, Some(Indicator::Normal));
    }

    #[test]
    fn custom_thresholds_apply() {
        let classifier = Classifier::new(
            ThresholdPolicy::from_secs(10, 20).unwrap(),
            RolloverPolicy::Wrap,
        );
        let job = job(Some("08:00:00"), Some("08:00:21"));
        assert_eq!(classifier.classify(&job).indicator, Some(Indicator::Error));
    }

    #[test]
    fn classified_job_serializes_flat() {
        let classifier = Classifier::default();
        let job = job(Some("12:00:00"), Some("12:11:00"));
        let value = serde_json::to_value(classifier.classify(&job)).unwrap();
        assert_eq!(value["process_id"], 1);
        assert_eq!(value["description"], "Job");
        assert_eq!(value["start_time"], "12:00:00");
        assert_eq!(value["duration_secs"], 660);
        assert_eq!(value["indicator"], "ERROR");
    }

    #[test]
    fn indicator_display() {
        assert_eq!(Indicator::Normal.to_string(), "NORMAL");
        assert_eq!(Indicator::Warning.to_string(), "WARNING");
        assert_eq!(Indicator::Error.to_string(), "ERROR");
    }
}
