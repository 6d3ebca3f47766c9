//! Coverage profile parsing and input data definitions.
//!
//! This module handles:
//! - Reading coverprofile files
//! - Validating the mode header and block lines
//! - Merging repeated blocks
//! - Defining the unit/block records fed into report generation

pub mod coverprofile;
pub mod schema;

// Re-export main types
pub use coverprofile::{parse_profile, read_profile};
pub use schema::{BlockPosition, BlockRecord, ProfileMode, RawUnit};
