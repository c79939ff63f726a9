use std::collections::HashMap;

use tracing::{debug, warn};

use super::record::{IntermediateRecord, JobRecord};

/// Folds parsed records into one [`JobRecord`] per process id.
///
/// Records are applied in order, so for duplicated edges or changing labels the
/// last one seen wins. START and END may arrive in either order. The returned
/// table is owned by the caller; nothing is shared between calls.
pub fn reconcile<'a, I>(records: I) -> HashMap<i64, JobRecord>
where
    I: IntoIterator<Item = &'a IntermediateRecord>,
{
    let mut jobs: HashMap<i64, JobRecord> = HashMap::new();

    for record in records {
        jobs.entry(record.process_id)
            .or_insert_with(|| JobRecord::new(record.process_id))
            .absorb(record);
    }

    if jobs.is_empty() {
        warn!("no log entries found");
    } else {
        debug!(jobs = jobs.len(), "reconciled log entries");
    }

    jobs
}
