//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod report;

// Re-export main command functions
pub use report::{execute_report, resolve_threshold, validate_args, ReportArgs, ReportOutcome};
