use crate::domain::constants::AUDIT_HEADER;
use crate::domain::models::{AuditRecord, AuditReport, CleanupItem, MoveOutcome, OutcomeTally};
use anyhow::Context;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Append-only CSV of move attempts. Each record is flushed before
/// `append` returns, so an interrupted run keeps every finished row.
pub struct AuditLog {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl AuditLog {
    /// Creates `moves_YYYYmmdd_HHMMSS.csv` under `dir`.
    pub fn create_in(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log dir {}", dir.display()))?;
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Self::create(&dir.join(format!("moves_{}.csv", stamp)))
    }

    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open audit file {}", path.display()))?;
        let is_new = file.metadata()?.len() == 0;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(AUDIT_HEADER)?;
            writer.flush()?;
        }
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, record: &AuditRecord) -> anyhow::Result<()> {
        self.writer
            .serialize(record)
            .with_context(|| format!("cannot write audit row for {}", record.object_name))?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn read_records(path: &Path) -> anyhow::Result<Vec<AuditRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read audit file: {}", path.display()))?;
    let mut out = Vec::new();
    for (i, rec) in reader.deserialize::<AuditRecord>().enumerate() {
        let rec = rec.with_context(|| {
            format!("Failed to read audit row {} in {}", i + 1, path.display())
        })?;
        out.push(rec);
    }
    Ok(out)
}

/// Outcome tally plus every object left in both scopes.
pub fn build_report(path: &Path, records: &[AuditRecord]) -> AuditReport {
    let mut outcomes = OutcomeTally::default();
    let mut needs_cleanup = Vec::new();
    for r in records {
        outcomes.record(r.outcome);
        if r.outcome == MoveOutcome::Copied {
            needs_cleanup.push(CleanupItem {
                object_name: r.object_name.clone(),
                object_type: r.object_type.clone(),
                src_scope: r.src_scope.clone(),
                dst_scope: r.dst_scope.clone(),
                message: r.message.clone(),
            });
        }
    }
    AuditReport {
        audit_file: path.display().to_string(),
        outcomes,
        needs_cleanup,
    }
}
