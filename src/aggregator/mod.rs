//! Aggregation of profile blocks into coverage summaries.
//!
//! This module transforms parsed profile units into:
//! - Canonical report keys (file or package, root-relative)
//! - Exclusion decisions
//! - Per-key and global block/statement counts

pub mod accumulator;
pub mod exclusion;
pub mod normalizer;

// Re-export main types and functions
pub use accumulator::{percentage, Accumulator, Summary};
pub use exclusion::ExclusionFilter;
pub use normalizer::normalize_name;
