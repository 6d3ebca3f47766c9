//! Configuration and constants for the CLI.

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "goverreport.yml";

/// Coverage profile read when no path is given
pub const DEFAULT_COVERPROFILE: &str = "coverage.out";

/// Name of the global summary row
pub const TOTAL_NAME: &str = "Total";

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

pub const DEFAULT_METRIC: &str = "block";
pub const DEFAULT_SORT_KEY: &str = "filename";
pub const DEFAULT_SORT_ORDER: &str = "asc";

/// Report configuration as stored in `goverreport.yml`
///
/// ```yaml
/// root: "github.com/acme/project"
/// exclusions: ["vendor/**", "**/mocks/*"]
/// threshold: 80
/// thresholdType: stmt
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Prefix stripped from every unit name
    pub root: String,

    /// Glob patterns matched against canonical keys
    pub exclusions: Vec<String>,

    /// Minimum coverage percentage, 0 disables the check
    pub threshold: f64,

    /// Metric used for the threshold: block or stmt
    #[serde(rename = "thresholdType")]
    pub metric: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            root: String::new(),
            exclusions: Vec::new(),
            threshold: 0.0,
            metric: DEFAULT_METRIC.to_string(),
        }
    }
}

/// Load the report configuration from a YAML file
///
/// **Public** - a missing file is not an error, defaults are returned instead
///
/// # Errors
/// * `ConfigError::Io` - file exists but cannot be read
/// * `ConfigError::Yaml` - file content is not a valid configuration
pub fn load_config(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    let path = path.as_ref();

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Configuration::default());
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };

    // An empty document deserializes to unit, not to a mapping
    if contents.trim().is_empty() {
        debug!("Configuration {} is empty, using defaults", path.display());
        return Ok(Configuration::default());
    }

    let config: Configuration = serde_yaml_ng::from_str(&contents)?;
    debug!("Loaded configuration from {}: {:?}", path.display(), config);

    Ok(config)
}
