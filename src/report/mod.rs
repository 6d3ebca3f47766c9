//! Report generation: aggregation, ordering and threshold checks.
//!
//! A report is built in a single pass over the profile units:
//! 1. Normalize each unit name into its canonical key
//! 2. Drop units whose key matches an exclusion pattern
//! 3. Fold blocks into the key's accumulator and the global one
//! 4. Project accumulators into summaries and sort them

pub mod sort;
pub mod threshold;

pub use sort::{sort_summaries, SortKey, SortOrder};
pub use threshold::{evaluate_threshold, Metric, ThresholdResult, ThresholdStatus};

use crate::aggregator::{normalize_name, Accumulator, ExclusionFilter, Summary};
use crate::parser::{read_profile, RawUnit};
use crate::utils::config::{Configuration, TOTAL_NAME};
use crate::utils::error::{ConfigError, ParseError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Coverage report: global summary plus one summary per file or package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Global coverage
    pub total: Summary,

    /// Coverage by file or package, in sort order
    pub files: Vec<Summary>,
}

/// Validated options for report generation
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Prefix stripped from unit names
    pub root: String,

    /// Units whose canonical key matches are left out entirely
    pub exclusions: ExclusionFilter,

    pub sort_key: SortKey,
    pub sort_order: SortOrder,

    /// Group by package directory instead of by file
    pub package_mode: bool,
}

impl ReportOptions {
    /// Build options from configuration and the raw sort flags
    ///
    /// **Public** - all configuration errors surface here, before the profile is read
    ///
    /// # Errors
    /// * `ConfigError::InvalidSortKey` / `ConfigError::InvalidSortOrder`
    /// * `ConfigError::InvalidExclusionPattern`
    pub fn from_config(
        config: &Configuration,
        sort_key: &str,
        sort_order: &str,
        package_mode: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            root: config.root.clone(),
            exclusions: ExclusionFilter::new(config.exclusions.as_slice())?,
            sort_key: sort_key.parse()?,
            sort_order: sort_order.parse()?,
            package_mode,
        })
    }
}

/// Generate a report from in-memory profile units
///
/// **Public** - pure, performs no I/O
///
/// Excluded units contribute to neither the per-key summaries nor the total.
///
/// # Example
/// ```
/// use covreport::parser::{BlockRecord, RawUnit};
/// use covreport::report::{generate_report, ReportOptions};
///
/// let units = vec![
///     RawUnit::new("a.go", vec![BlockRecord::new(4, 1), BlockRecord::new(2, 0)]),
///     RawUnit::new("b.go", vec![BlockRecord::new(3, 1)]),
/// ];
/// let report = generate_report(units, &ReportOptions::default());
///
/// assert_eq!(report.total.blocks, 3);
/// assert_eq!(report.total.stmts, 9);
/// assert_eq!(report.files.len(), 2);
/// ```
pub fn generate_report<I>(units: I, options: &ReportOptions) -> Report
where
    I: IntoIterator<Item = RawUnit>,
{
    let mut total = Accumulator::new(TOTAL_NAME);
    let mut per_key: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut excluded = 0usize;

    if options.exclusions.is_empty() {
        debug!("No exclusion patterns, every unit is reported");
    }

    for unit in units {
        let key = normalize_name(&unit.name, &options.root, options.package_mode);
        if options.exclusions.is_excluded(&key) {
            excluded += 1;
            continue;
        }

        debug!("{} -> {} ({} blocks)", unit.name, key, unit.blocks.len());

        total.add_all(&unit.blocks);
        per_key
            .entry(key)
            .or_insert_with_key(|key| Accumulator::new(key.as_str()))
            .add_all(&unit.blocks);
    }

    let mut files: Vec<Summary> = per_key.values().map(Accumulator::results).collect();
    sort_summaries(&mut files, options.sort_key, options.sort_order);

    let total = total.results();
    info!(
        "Aggregated {} {} ({} excluded units): {} blocks, {} statements",
        files.len(),
        if options.package_mode { "packages" } else { "files" },
        excluded,
        total.blocks,
        total.stmts
    );

    Report { total, files }
}

/// Read a coverprofile and generate its report
///
/// **Public** - convenience wrapper used by the CLI
///
/// # Errors
/// * any `ParseError` from reading the profile
pub fn generate_report_from_file(
    coverprofile: impl AsRef<Path>,
    options: &ReportOptions,
) -> Result<Report, ParseError> {
    let units = read_profile(coverprofile)?;
    Ok(generate_report(units, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::BlockRecord;
    use pretty_assertions::assert_eq;

    fn units() -> Vec<RawUnit> {
        vec![
            RawUnit::new(
                "example.com/p/a.go",
                vec![BlockRecord::new(4, 1), BlockRecord::new(2, 0)],
            ),
            RawUnit::new("example.com/p/b.go", vec![BlockRecord::new(3, 1)]),
            RawUnit::new("example.com/p/sub/c.go", vec![BlockRecord::new(5, 0)]),
        ]
    }

    fn options(root: &str, exclusions: &[&str], package_mode: bool) -> ReportOptions {
        ReportOptions {
            root: root.to_string(),
            exclusions: ExclusionFilter::new(exclusions).unwrap(),
            package_mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_file_mode_totals() {
        let report = generate_report(units(), &options("", &[], false));

        assert_eq!(report.total.name, "Total");
        assert_eq!(report.total.blocks, 4);
        assert_eq!(report.total.stmts, 14);
        assert_eq!(report.total.covered_blocks, 2);
        assert_eq!(report.total.covered_stmts, 7);
        assert_eq!(report.total.block_coverage, Some(50.0));
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn test_root_relative_file_names() {
        let report = generate_report(units(), &options("example.com/p", &[], false));
        let names: Vec<&str> = report.files.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["/a.go", "/b.go", "/sub/c.go"]);
    }

    #[test]
    fn test_package_mode_groups_by_directory() {
        let report = generate_report(units(), &options("example.com/p", &[], true));

        let names: Vec<&str> = report.files.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![".", "./sub"]);
        assert_eq!(report.files[0].blocks, 3);
        assert_eq!(report.files[0].stmts, 9);
        assert_eq!(report.files[1].blocks, 1);
    }

    #[test]
    fn test_exclusions_apply_to_total() {
        let report = generate_report(units(), &options("example.com/p", &["./sub"], true));

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.total.blocks, 3);
        assert_eq!(report.total.stmts, 9);
    }

    #[test]
    fn test_empty_profile() {
        let report = generate_report(Vec::new(), &ReportOptions::default());

        assert!(report.files.is_empty());
        assert_eq!(report.total.blocks, 0);
        assert_eq!(report.total.block_coverage, None);
        assert_eq!(report.total.stmt_coverage, None);
    }

    #[test]
    fn test_sorting_applied() {
        let opts = ReportOptions {
            sort_key: SortKey::Block,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let report = generate_report(units(), &opts);
        let names: Vec<&str> = report.files.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["example.com/p/b.go", "example.com/p/a.go", "example.com/p/sub/c.go"]
        );
    }

    #[test]
    fn test_options_from_config() {
        let config = Configuration {
            exclusions: vec!["vendor/**".to_string()],
            ..Default::default()
        };

        let opts = ReportOptions::from_config(&config, "missing-stmts", "desc", true).unwrap();
        assert_eq!(opts.sort_key, SortKey::MissingStmts);
        assert_eq!(opts.sort_order, SortOrder::Desc);
        assert!(opts.package_mode);

        assert!(matches!(
            ReportOptions::from_config(&config, "size", "asc", false),
            Err(ConfigError::InvalidSortKey(_))
        ));
        assert!(matches!(
            ReportOptions::from_config(&config, "filename", "sideways", false),
            Err(ConfigError::InvalidSortOrder(_))
        ));
    }
}
