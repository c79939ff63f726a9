//! Turns raw log text into validated [`IntermediateRecord`]s.
//!
//! Each line has the shape `HH:MM:SS, description, START|END, pid`. Lines that
//! do not fit are reported through `tracing` and skipped, so one bad line never
//! stops the rest of the file from being read.

use chrono::NaiveTime;
use tracing::warn;

use super::record::{EntryKind, IntermediateRecord};
use crate::error::LineError;

/// Parses every non-empty line of `text`, keeping input order.
pub fn parse(text: &str) -> Vec<IntermediateRecord> {
    text.trim()
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() {
                return None;
            }
            match parse_line(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(line = index + 1, content = line, "skipping log line: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Parses a single trimmed line. Any field failure rejects the whole line.
pub fn parse_line(line: &str) -> Result<IntermediateRecord, LineError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [time, description, kind, pid] = fields.as_slice() else {
        return Err(LineError::FieldCount(fields.len()));
    };

    let time_of_day = time
        .parse::<NaiveTime>()
        .map_err(|e| LineError::InvalidTime {
            value: time.to_string(),
            reason: e.to_string(),
        })?;
    let kind = kind.parse::<EntryKind>()?;
    let process_id = pid
        .parse::<i64>()
        .map_err(|_| LineError::InvalidProcessId(pid.to_string()))?;

    Ok(IntermediateRecord {
        time_of_day,
        description: description.to_string(),
        kind,
        process_id,
    })
}
