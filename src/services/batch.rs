use crate::domain::models::{AuditRecord, MoveRequest, OutcomeTally};
use crate::services::audit::AuditLog;
use crate::services::mover::Mover;
use crate::services::store::ObjectStore;
use anyhow::Context;
use std::path::Path;

/// Reads the whole input up front so that a bad file fails the run before
/// any remote call is made.
pub fn read_requests(path: &Path) -> anyhow::Result<Vec<MoveRequest>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    let mut rows = Vec::new();
    for (i, rec) in reader.deserialize::<MoveRequest>().enumerate() {
        let row = rec.with_context(|| {
            format!("Failed to read CSV record {} in {}", i + 1, path.display())
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Runs each request in input order, appending its record before starting
/// the next one. `on_record` sees every record right after it is persisted.
pub fn run_batch<S: ObjectStore>(
    mover: &Mover<S>,
    requests: &[MoveRequest],
    audit: &mut AuditLog,
    mut on_record: impl FnMut(&AuditRecord),
) -> anyhow::Result<(OutcomeTally, Vec<AuditRecord>)> {
    let mut tally = OutcomeTally::default();
    let mut records = Vec::with_capacity(requests.len());
    for request in requests {
        let record = mover.move_one(request);
        audit.append(&record)?;
        tally.record(record.outcome);
        on_record(&record);
        records.push(record);
    }
    Ok((tally, records))
}
