//! Exclusion of units by glob pattern.
//!
//! Patterns are matched against canonical keys, so they see the name after
//! root stripping and package grouping. `*` stays within one path segment,
//! `**` spans any number of segments.

use crate::utils::error::ConfigError;
use glob::{MatchOptions, Pattern};
use log::debug;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled set of exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<Pattern>,
}

impl ExclusionFilter {
    /// Compile exclusion patterns
    ///
    /// **Public** - invalid patterns are rejected here, before any profile is aggregated
    ///
    /// # Errors
    /// * `ConfigError::InvalidExclusionPattern` - pattern is not a valid glob (e.g. `a**`)
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Pattern::new(pattern).map_err(|source| ConfigError::InvalidExclusionPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `key` matches any of the patterns
    pub fn is_excluded(&self, key: &str) -> bool {
        match self
            .patterns
            .iter()
            .find(|pattern| pattern.matches_with(key, MATCH_OPTIONS))
        {
            Some(pattern) => {
                debug!("Excluding {} (matched '{}')", key, pattern.as_str());
                true
            }
            None => false,
        }
    }
}
