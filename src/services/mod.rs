//! Service layer containing move logic and side-effect helpers.
//!
//! ## Service map
//! - `xpath.rs` — scope/type to config path mapping.
//! - `entry.rs` — `<entry>` extraction from API responses and re-serialization.
//! - `summary.rs` — per-type synopsis and group reference-risk flag.
//! - `store.rs` — `ObjectStore` trait + Panorama XML API client.
//! - `mover.rs` — single-object move with outcome classification.
//! - `audit.rs` — append-only moves CSV, read-back and report.
//! - `batch.rs` — input CSV reading and sequential batch loop.
//! - `config.rs` — `panw.cfg` loader.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Remote calls live only in `store.rs`; file writes only in `audit.rs`.
//! - Keep command handlers thin; delegate to services.

pub mod audit;
pub mod batch;
pub mod config;
pub mod entry;
pub mod mover;
pub mod output;
pub mod store;
pub mod summary;
pub mod xpath;
