//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — object types, scopes, move requests, outcomes, audit records.
//! - `constants.rs` — fixed path roots and default file names.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `AuditRecord` field names are the audit CSV header. Renaming a field breaks
//! `dgmove report` on audit files written by older builds.

pub mod constants;
pub mod models;
