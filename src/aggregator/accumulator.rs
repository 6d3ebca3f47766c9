//! Running block/statement counts and the summaries derived from them.

use crate::parser::schema::BlockRecord;
use serde::{Deserialize, Serialize};

/// Coverage summary for a file, a package or the whole profile
///
/// Coverage percentages are `None` when their denominator is zero; callers
/// have to decide what an undefined coverage means for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Canonical key, or "Total" for the global summary
    pub name: String,

    pub blocks: u64,
    pub stmts: u64,
    pub covered_blocks: u64,
    pub covered_stmts: u64,
    pub missing_blocks: u64,
    pub missing_stmts: u64,

    /// covered_blocks / blocks * 100
    pub block_coverage: Option<f64>,

    /// covered_stmts / stmts * 100
    pub stmt_coverage: Option<f64>,
}

/// Accumulates the coverage of one key
///
/// **Public** - one instance per canonical key plus one for the total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    name: String,
    blocks: u64,
    stmts: u64,
    covered_blocks: u64,
    covered_stmts: u64,
}

impl Accumulator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fold a single block into the running totals
    pub fn add_block(&mut self, block: &BlockRecord) {
        let stmts = u64::from(block.num_stmt);

        self.blocks += 1;
        self.stmts += stmts;
        if block.is_covered() {
            self.covered_blocks += 1;
            self.covered_stmts += stmts;
        }
    }

    pub fn add_all(&mut self, blocks: &[BlockRecord]) {
        for block in blocks {
            self.add_block(block);
        }
    }

    /// Project the accumulated counts into a summary
    ///
    /// **Public** - pure, may be called any number of times
    pub fn results(&self) -> Summary {
        Summary {
            name: self.name.clone(),
            blocks: self.blocks,
            stmts: self.stmts,
            covered_blocks: self.covered_blocks,
            covered_stmts: self.covered_stmts,
            missing_blocks: self.blocks - self.covered_blocks,
            missing_stmts: self.stmts - self.covered_stmts,
            block_coverage: percentage(self.covered_blocks, self.blocks),
            stmt_coverage: percentage(self.covered_stmts, self.stmts),
        }
    }
}

/// `part / whole * 100`, or `None` when `whole` is zero
pub fn percentage(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(part as f64 / whole as f64 * 100.0)
}
