use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::LineError;

/// Marks which edge of a job's execution window a log line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    Start,
    End,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Start => write!(f, "START"),
            EntryKind::End => write!(f, "END"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = LineError;

    /// Only the exact uppercase spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "START" => Ok(EntryKind::Start),
            "END" => Ok(EntryKind::End),
            other => Err(LineError::InvalidKind(other.to_string())),
        }
    }
}

/// One validated log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediateRecord {
    pub time_of_day: NaiveTime,
    pub description: String,
    pub kind: EntryKind,
    pub process_id: i64,
}

/// Accumulates every record seen for a single process id.
///
/// Created on the first sighting of a pid, whichever edge arrives first. A
/// record that never receives its pair stays partial; that is a valid end state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub process_id: i64,
    pub description: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl JobRecord {
    pub fn new(process_id: i64) -> Self {
        Self {
            process_id,
            description: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Folds a record into this job. The description is always replaced and the
    /// time for the record's edge overwrites any earlier value.
    pub fn absorb(&mut self, record: &IntermediateRecord) {
        debug_assert_eq!(self.process_id, record.process_id);
        self.description = Some(record.description.clone());
        match record.kind {
            EntryKind::Start => self.start_time = Some(record.time_of_day),
            EntryKind::End => self.end_time = Some(record.time_of_day),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }
}
