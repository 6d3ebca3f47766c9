//! covreport
//!
//! Coverage summaries and threshold checks for block-level coverage
//! profiles (Go `coverprofile` format).
//!
//! This crate provides the core implementation for the
//! `covreport` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install covreport
//! go test -coverprofile=coverage.out ./...
//! covreport --coverprofile coverage.out --threshold 80
//! ```
//!
//! The report engine can also be driven in memory:
//!
//! ```
//! use covreport::parser::parse_profile;
//! use covreport::report::{evaluate_threshold, generate_report, Metric, ReportOptions};
//!
//! let units = parse_profile("mode: set\na.go:1.1,2.2 4 1\na.go:3.1,4.2 2 0\n").unwrap();
//! let report = generate_report(units, &ReportOptions::default());
//!
//! assert_eq!(report.total.block_coverage, Some(50.0));
//! assert!(evaluate_threshold(&report.total, Metric::Block, 50.0).passed());
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
