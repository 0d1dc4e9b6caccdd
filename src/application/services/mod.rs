//! Application services - Startup orchestration

pub mod startup;

pub use startup::{bootstrap, first_run_check, resolve_identity, FirstRun};
