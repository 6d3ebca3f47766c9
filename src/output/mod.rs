//! Output writers for coverage reports.
//!
//! This module handles presenting reports in various formats:
//! - ASCII tables for the terminal
//! - JSON documents for other tools

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{read_report_json, write_report_json, ReportDocument};
pub use table::{format_coverage, print_table, render_table};
