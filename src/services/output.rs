use crate::domain::models::{AuditRecord, JsonOut, MoveOutcome};
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Console progress line for one finished row.
pub fn progress_line(r: &AuditRecord) -> String {
    let marker = match r.outcome {
        MoveOutcome::Moved => "[+]",
        MoveOutcome::Skipped => "[-]",
        MoveOutcome::Copied | MoveOutcome::Error => "[!]",
    };
    format!(
        "{} {} {} ({} {} -> {}): {}",
        marker, r.outcome, r.object_name, r.object_type, r.src_scope, r.dst_scope, r.message
    )
}
