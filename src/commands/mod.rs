//! Command handler layer.
//!
//! ## Files
//! - `runtime.rs` — `run`: config, audit file, batch loop, final summary.
//! - `inspect.rs` — `xpath` and `report`: local-only helpers, no API calls.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate move logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod inspect;
pub mod runtime;

pub use inspect::handle_inspect_commands;
pub use runtime::handle_run;
