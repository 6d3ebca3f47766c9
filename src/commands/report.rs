//! Report command implementation.
//!
//! The report command:
//! 1. Validates sort and exclusion settings
//! 2. Reads and aggregates the coverprofile
//! 3. Prints the coverage table
//! 4. Writes the JSON report (if requested)
//! 5. Checks the coverage threshold

use crate::output::{print_table, write_report_json};
use crate::report::{
    evaluate_threshold, generate_report_from_file, Metric, Report, ReportOptions, ThresholdResult,
};
use crate::utils::config::{
    Configuration, DEFAULT_CONFIG_FILE, DEFAULT_COVERPROFILE, DEFAULT_SORT_KEY, DEFAULT_SORT_ORDER,
};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Coverage profile to read
    pub coverprofile: PathBuf,

    /// YAML configuration file
    pub config_path: PathBuf,

    /// Minimum coverage, 0 falls back to the configuration
    pub threshold: f64,

    /// Threshold metric, `None` falls back to the configuration
    pub metric: Option<String>,

    /// Column to sort by
    pub sort_by: String,

    /// Sort direction
    pub order: String,

    /// Aggregate by package instead of by file
    pub package_mode: bool,

    /// Output path for the JSON report (optional)
    pub json_output: Option<PathBuf>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            coverprofile: PathBuf::from(DEFAULT_COVERPROFILE),
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            threshold: 0.0,
            metric: None,
            sort_by: DEFAULT_SORT_KEY.to_string(),
            order: DEFAULT_SORT_ORDER.to_string(),
            package_mode: false,
            json_output: None,
        }
    }
}

/// What a report run produced
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: Report,
    pub threshold: ThresholdResult,
}

impl ReportOutcome {
    pub fn passed(&self) -> bool {
        self.threshold.passed()
    }
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Report command arguments
/// * `config` - Loaded configuration, overridden by `args` where set
/// * `writer` - Destination of the coverage table
///
/// # Errors
/// * Invalid sort column, order or exclusion pattern (nothing is printed)
/// * Unreadable or malformed coverprofile (nothing is printed)
/// * Invalid threshold metric (reported after the table is printed)
/// * JSON write failures
pub fn execute_report(
    args: &ReportArgs,
    config: &Configuration,
    writer: &mut impl Write,
) -> Result<ReportOutcome> {
    let start_time = Instant::now();

    // Step 1: Validate report options
    info!("Step 1/5: Validating report options...");
    let options = ReportOptions::from_config(config, &args.sort_by, &args.order, args.package_mode)
        .context("Invalid report configuration")?;

    debug!(
        "Options: root='{}' sort={} order={} packages={}",
        options.root, options.sort_key, options.sort_order, options.package_mode
    );

    // Step 2: Aggregate
    info!("Step 2/5: Aggregating {}...", args.coverprofile.display());
    let report = generate_report_from_file(&args.coverprofile, &options)?;

    // Step 3: Print table
    info!("Step 3/5: Rendering table...");
    print_table(&report, args.package_mode, writer).context("Failed to print coverage table")?;

    // Step 4: JSON output
    if let Some(json_path) = &args.json_output {
        info!("Step 4/5: Writing JSON report...");
        write_report_json(&report, args.package_mode, json_path)
            .context("Failed to write JSON report")?;
        info!("✓ JSON report written to: {}", json_path.display());
    } else {
        info!("Step 4/5: Skipping JSON report (not requested)");
    }

    // Step 5: Threshold
    info!("Step 5/5: Checking threshold...");
    let (metric, threshold) = resolve_threshold(args, config)?;
    let threshold = evaluate_threshold(&report.total, metric, threshold);
    info!("{}", threshold.summary());

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(ReportOutcome { report, threshold })
}

/// Merge command-line threshold settings with the configuration
///
/// **Public** - a zero threshold or a missing metric on the command line
/// falls back to the configured value
pub fn resolve_threshold(args: &ReportArgs, config: &Configuration) -> Result<(Metric, f64)> {
    let metric_name = args.metric.as_deref().unwrap_or(&config.metric);
    let metric = metric_name.parse::<Metric>().context("Invalid threshold configuration")?;

    let threshold = if args.threshold == 0.0 {
        config.threshold
    } else {
        args.threshold
    };

    Ok((metric, threshold))
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.coverprofile.as_os_str().is_empty() {
        anyhow::bail!("Coverprofile path cannot be empty");
    }

    if !args.threshold.is_finite() {
        anyhow::bail!("Threshold must be a finite number");
    }

    Ok(())
}
