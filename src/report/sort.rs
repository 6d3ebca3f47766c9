//! Ordering of per-unit summaries.

use crate::aggregator::Summary;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column the report is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Filename,
    Package,
    Block,
    Stmt,
    MissingBlocks,
    MissingStmts,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filename" => Ok(SortKey::Filename),
            "package" => Ok(SortKey::Package),
            "block" => Ok(SortKey::Block),
            "stmt" => Ok(SortKey::Stmt),
            "missing-blocks" => Ok(SortKey::MissingBlocks),
            "missing-stmts" => Ok(SortKey::MissingStmts),
            other => Err(ConfigError::InvalidSortKey(other.to_string())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ConfigError::InvalidSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Filename => "filename",
            SortKey::Package => "package",
            SortKey::Block => "block",
            SortKey::Stmt => "stmt",
            SortKey::MissingBlocks => "missing-blocks",
            SortKey::MissingStmts => "missing-stmts",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

impl SortKey {
    /// Ascending comparator for this column
    ///
    /// Equal column values fall back to the name, which is unique per report,
    /// so the comparator is a total order.
    pub fn comparator(self) -> fn(&Summary, &Summary) -> Ordering {
        match self {
            SortKey::Filename | SortKey::Package => by_name,
            SortKey::Block => by_block_coverage,
            SortKey::Stmt => by_stmt_coverage,
            SortKey::MissingBlocks => by_missing_blocks,
            SortKey::MissingStmts => by_missing_stmts,
        }
    }
}

/// Sort summaries in place
///
/// **Public** - `Desc` is the exact reverse of `Asc` for every key
pub fn sort_summaries(summaries: &mut [Summary], key: SortKey, order: SortOrder) {
    let cmp = key.comparator();
    match order {
        SortOrder::Asc => summaries.sort_by(cmp),
        SortOrder::Desc => summaries.sort_by(|a, b| cmp(a, b).reverse()),
    }
}

fn by_name(a: &Summary, b: &Summary) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_block_coverage(a: &Summary, b: &Summary) -> Ordering {
    compare_coverage(a.block_coverage, b.block_coverage).then_with(|| by_name(a, b))
}

fn by_stmt_coverage(a: &Summary, b: &Summary) -> Ordering {
    compare_coverage(a.stmt_coverage, b.stmt_coverage).then_with(|| by_name(a, b))
}

fn by_missing_blocks(a: &Summary, b: &Summary) -> Ordering {
    a.missing_blocks
        .cmp(&b.missing_blocks)
        .then_with(|| by_name(a, b))
}

fn by_missing_stmts(a: &Summary, b: &Summary) -> Ordering {
    a.missing_stmts
        .cmp(&b.missing_stmts)
        .then_with(|| by_name(a, b))
}

// Undefined coverage sorts before any defined value
fn compare_coverage(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
