//! Move orchestration: read from source, write to destination, delete from
//! source.
//!
//! The three remote calls are not transactional. Every exit path produces
//! exactly one `AuditRecord` whose outcome matches what is actually left on
//! the management server:
//!
//! | outcome   | destination | source          |
//! |-----------|-------------|-----------------|
//! | `moved`   | has object  | object removed  |
//! | `copied`  | has object  | still has it    |
//! | `skipped` | unchanged   | unchanged       |
//! | `error`   | no new copy | unchanged       |
//!
//! (With `overwrite`, an `error` after the destination pre-delete leaves the
//! destination without its old object; the source copy is still intact.)

use crate::cli::CollisionPolicy;
use crate::domain::models::{AuditRecord, MoveOutcome, MoveRequest, ObjectType, Scope};
use crate::services::entry::{self, Entry};
use crate::services::store::ObjectStore;
use crate::services::summary::{has_reference_risk, summarize};
use crate::services::xpath::{container_xpath, entry_xpath};

pub struct Mover<S> {
    store: S,
    policy: CollisionPolicy,
}

/// Accumulates the fields of a record as a move progresses.
struct Attempt<'a> {
    request: &'a MoveRequest,
    object_type: String,
    timestamp: String,
    summary: String,
    entry_xml: String,
}

impl Attempt<'_> {
    fn with_entry(&mut self, entry: &Entry, xml: &str) {
        self.summary = summarize(entry);
        self.entry_xml = xml.to_string();
    }

    fn finish(self, outcome: MoveOutcome, message: impl Into<String>) -> AuditRecord {
        AuditRecord {
            timestamp: self.timestamp,
            object_name: self.request.object_name.clone(),
            object_type: self.object_type,
            src_scope: self.request.src_scope.clone(),
            dst_scope: self.request.dst_scope.clone(),
            outcome,
            message: message.into(),
            summary: self.summary,
            entry_xml: self.entry_xml,
        }
    }
}

impl<S: ObjectStore> Mover<S> {
    pub fn new(store: S, policy: CollisionPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Relocates one object. Never fails: every problem becomes an `error`
    /// record so the rest of the batch keeps going.
    pub fn move_one(&self, request: &MoveRequest) -> AuditRecord {
        let object_type_raw = request.object_type.trim().to_ascii_lowercase();
        let mut attempt = Attempt {
            request,
            object_type: object_type_raw,
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            summary: String::new(),
            entry_xml: String::new(),
        };

        let object_type: ObjectType = match attempt.object_type.parse() {
            Ok(t) => t,
            Err(e) => return attempt.finish(MoveOutcome::Error, e.to_string()),
        };
        let name = request.object_name.as_str();
        let src = Scope::from(request.src_scope.as_str());
        let dst = Scope::from(request.dst_scope.as_str());
        // The destination pre-delete and the final source delete would hit the
        // same node, so an overwrite would remove the only copy.
        if src == dst {
            return attempt.finish(
                MoveOutcome::Error,
                format!("source and destination scope are the same ('{}')", src),
            );
        }

        let src_xpath = entry_xpath(&src, object_type, name);
        let src_raw = match self.store.get(&src_xpath) {
            Ok(raw) => raw,
            Err(e) => {
                return attempt.finish(MoveOutcome::Error, format!("API get failed from src: {}", e))
            }
        };
        let Some(source_entry) = entry::decode(object_type, &src_raw) else {
            attempt.entry_xml = src_raw;
            return attempt.finish(
                MoveOutcome::Error,
                format!("object not found in source scope '{}'", src),
            );
        };
        let entry_xml = entry::encode(&source_entry);
        attempt.with_entry(&source_entry, &entry_xml);

        let dst_xpath = entry_xpath(&dst, object_type, name);
        let collision = match self.store.get(&dst_xpath) {
            Ok(raw) => entry::decode(object_type, &raw).is_some(),
            Err(e) => {
                return attempt.finish(MoveOutcome::Error, format!("API get failed from dst: {}", e))
            }
        };
        if collision {
            match self.policy {
                CollisionPolicy::Skip => {
                    return attempt.finish(
                        MoveOutcome::Skipped,
                        "destination already has object with same name",
                    );
                }
                CollisionPolicy::Overwrite => {
                    if let Err(e) = self.store.delete(&dst_xpath) {
                        return attempt.finish(
                            MoveOutcome::Error,
                            format!(
                                "failed to delete existing dst object before overwrite: {}",
                                e
                            ),
                        );
                    }
                    tracing::info!(object = name, scope = %dst, "deleted existing object in dst to overwrite");
                }
            }
        }

        if has_reference_risk(object_type, Some(&source_entry)) {
            tracing::warn!(
                object = name,
                object_type = %object_type,
                scope = %dst,
                "group members may not resolve in destination scope"
            );
        }
        let dst_container = container_xpath(&dst, object_type);
        if let Err(e) = self.store.set(&dst_container, &entry_xml) {
            return attempt.finish(
                MoveOutcome::Error,
                format!("failed to add to destination: {}", e),
            );
        }
        tracing::info!(object = name, scope = %dst, "added to destination");

        match self.store.delete(&src_xpath) {
            Ok(_) => {
                tracing::info!(object = name, scope = %src, "removed from source");
                attempt.finish(MoveOutcome::Moved, "ok")
            }
            Err(e) => {
                tracing::warn!(
                    object = name,
                    scope = %src,
                    "object now exists in both scopes; delete it from the source by hand"
                );
                attempt.finish(
                    MoveOutcome::Copied,
                    format!("added to dst but failed to delete from src: {}", e),
                )
            }
        }
    }
}
