//! covreport CLI
//!
//! Summarizes a coverage profile per file or package and gates the build
//! on a coverage threshold.
//!
//! Exit codes: 0 passed, 1 below threshold, 2 operational error.

use anyhow::{Context, Result};
use clap::Parser;
use covreport::commands::{execute_report, validate_args, ReportArgs};
use covreport::utils::config::{
    load_config, DEFAULT_CONFIG_FILE, DEFAULT_COVERPROFILE, DEFAULT_SORT_KEY, DEFAULT_SORT_ORDER,
};
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_THRESHOLD_FAILED: u8 = 1;
const EXIT_ERROR: u8 = 2;

/// covreport - coverage summaries and threshold checks for coverprofiles
#[derive(Parser, Debug)]
#[command(name = "covreport")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Coverage output file
    #[arg(long, default_value = DEFAULT_COVERPROFILE)]
    coverprofile: PathBuf,

    /// Configuration file (root, exclusions, threshold, thresholdType)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Return an error if the coverage is below a threshold (0 uses the configuration)
    #[arg(long, default_value = "0")]
    threshold: f64,

    /// Use a specific metric for the threshold: block, stmt
    #[arg(long)]
    metric: Option<String>,

    /// Column to sort by: filename, package, block, stmt, missing-blocks, missing-stmts
    #[arg(long, default_value = DEFAULT_SORT_KEY)]
    sort: String,

    /// Sort order: asc, desc
    #[arg(long, default_value = DEFAULT_SORT_ORDER)]
    order: String,

    /// Report coverage per package instead of per file
    #[arg(long)]
    packages: bool,

    /// Also write the report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Parse CLI arguments; clap exits with 2 on usage errors
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_THRESHOLD_FAILED),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the report and return whether the threshold passed
///
/// **Private** - internal command implementation
fn run(cli: Cli) -> Result<bool> {
    let args = ReportArgs {
        coverprofile: cli.coverprofile,
        config_path: cli.config,
        threshold: cli.threshold,
        metric: cli.metric,
        sort_by: cli.sort,
        order: cli.order,
        package_mode: cli.packages,
        json_output: cli.json,
    };

    // Validate args first
    validate_args(&args)?;

    let config = load_config(&args.config_path)
        .with_context(|| format!("Failed to load {}", args.config_path.display()))?;

    let stdout = std::io::stdout();
    let outcome = execute_report(&args, &config, &mut stdout.lock())?;

    if !outcome.passed() {
        eprintln!("{}", outcome.threshold.summary());
    }

    Ok(outcome.passed())
}
