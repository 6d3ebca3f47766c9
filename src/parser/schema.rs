//! Data produced by the profile parser.
//!
//! These are the inputs of report generation: one `RawUnit` per source
//! file, each holding the blocks recorded for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ParseError;

/// How execution counts were recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMode {
    /// Count is 0 or 1
    Set,
    /// Count is the number of executions
    Count,
    /// Like `Count`, collected with atomic counters
    Atomic,
}

impl FromStr for ProfileMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(ProfileMode::Set),
            "count" => Ok(ProfileMode::Count),
            "atomic" => Ok(ProfileMode::Atomic),
            other => Err(ParseError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ProfileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileMode::Set => "set",
            ProfileMode::Count => "count",
            ProfileMode::Atomic => "atomic",
        };
        f.write_str(name)
    }
}

/// Line/column span of a block in its source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// One coverage-tracked block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Where the block lives (ignored by aggregation)
    pub position: BlockPosition,

    /// Number of statements in the block
    pub num_stmt: u32,

    /// Execution count, 0 means never executed
    pub count: u64,
}

impl BlockRecord {
    /// Create a block without position information
    ///
    /// **Public** - convenient for callers that build profiles in memory
    pub fn new(num_stmt: u32, count: u64) -> Self {
        Self {
            position: BlockPosition::default(),
            num_stmt,
            count,
        }
    }

    pub fn is_covered(&self) -> bool {
        self.count > 0
    }
}

/// A named source unit and its blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUnit {
    /// Unit name as recorded in the profile (usually an import path + file)
    pub name: String,

    /// Blocks ordered by position
    pub blocks: Vec<BlockRecord>,
}

impl RawUnit {
    pub fn new(name: impl Into<String>, blocks: Vec<BlockRecord>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }
}
