//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading a coverage profile
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read coverprofile: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid coverprofile: missing 'mode:' line")]
    MissingMode,

    #[error("Invalid coverprofile: unknown mode '{0}' (expected set, count or atomic)")]
    InvalidMode(String),

    #[error("Invalid coverprofile: line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    #[error("Invalid coverprofile: line {line}: block in {unit} has inconsistent statement count")]
    InconsistentBlock { line: usize, unit: String },
}

/// Errors caused by report configuration (flags or config file)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid sort column '{0}', must be one of filename, package, block, stmt, missing-blocks or missing-stmts")]
    InvalidSortKey(String),

    #[error("Invalid sort order '{0}', must be either asc or desc")]
    InvalidSortOrder(String),

    #[error("Invalid threshold type '{0}', use block or stmt")]
    InvalidMetric(String),

    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidExclusionPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
