//! Parser for the Go `coverprofile` text format.
//!
//! ```text
//! mode: set
//! github.com/acme/project/main.go:10.13,12.2 1 1
//! github.com/acme/project/main.go:14.2,16.3 2 0
//! ```
//!
//! Each line after the mode header is `name:startLine.startCol,endLine.endCol numStmt count`.

use super::schema::{BlockPosition, BlockRecord, ProfileMode, RawUnit};
use crate::utils::error::ParseError;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::Path;

const MODE_PREFIX: &str = "mode:";

/// A parsed block together with the line it came from
struct ParsedLine {
    line: usize,
    block: BlockRecord,
}

/// Read and parse a coverprofile from disk
///
/// **Public** - main entry point for the CLI
///
/// # Errors
/// * `ParseError::Io` - file cannot be read
/// * any error from [`parse_profile`]
pub fn read_profile(path: impl AsRef<Path>) -> Result<Vec<RawUnit>, ParseError> {
    let path = path.as_ref();
    info!("Reading coverprofile: {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    parse_profile(&contents)
}

/// Parse coverprofile text into units sorted by name
///
/// **Public** - pure, usable on in-memory profiles
///
/// Repeated blocks (same unit, same position) are merged: in `set` mode the
/// block is covered if any occurrence was, otherwise counts are added.
///
/// # Errors
/// * `ParseError::MissingMode` - first non-empty line is not a mode header
/// * `ParseError::InvalidMode` - unknown mode
/// * `ParseError::InvalidLine` - malformed block line
/// * `ParseError::InconsistentBlock` - same position, different statement counts
pub fn parse_profile(contents: &str) -> Result<Vec<RawUnit>, ParseError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mode = match lines.next() {
        Some((_, header)) => parse_mode(header)?,
        None => return Err(ParseError::MissingMode),
    };
    debug!("Coverprofile mode: {}", mode);

    let mut units: BTreeMap<String, Vec<ParsedLine>> = BTreeMap::new();
    let mut block_count = 0usize;

    for (line_no, line) in lines {
        // Concatenated profiles repeat the header
        if line.starts_with(MODE_PREFIX) {
            continue;
        }

        let (name, block) = parse_block_line(line, line_no)?;
        units.entry(name.to_string()).or_default().push(ParsedLine {
            line: line_no,
            block,
        });
        block_count += 1;
    }

    let units = units
        .into_iter()
        .map(|(name, blocks)| merge_blocks(name, blocks, mode))
        .collect::<Result<Vec<_>, _>>()?;

    info!("Parsed {} blocks across {} units", block_count, units.len());

    Ok(units)
}

/// Parse the `mode: <mode>` header
///
/// **Private** - internal helper
fn parse_mode(header: &str) -> Result<ProfileMode, ParseError> {
    let mode = header
        .strip_prefix(MODE_PREFIX)
        .ok_or(ParseError::MissingMode)?;
    mode.trim().parse()
}

/// Parse one block line into its unit name and record
///
/// **Private** - internal helper
fn parse_block_line(line: &str, line_no: usize) -> Result<(&str, BlockRecord), ParseError> {
    let invalid = |reason: &str| ParseError::InvalidLine {
        line: line_no,
        reason: reason.to_string(),
    };

    // Unit names may contain ':' (e.g. Windows drive letters), the last one is the separator
    let (name, rest) = line
        .rsplit_once(':')
        .ok_or_else(|| invalid("missing ':' after file name"))?;
    if name.is_empty() {
        return Err(invalid("empty file name"));
    }

    let fields: Vec<&str> = rest.split_whitespace().collect();
    let [span, num_stmt, count] = fields.as_slice() else {
        return Err(invalid("expected 'start,end numStmt count'"));
    };

    let (start, end) = span
        .split_once(',')
        .ok_or_else(|| invalid("block span must be 'start,end'"))?;
    let (start_line, start_col) =
        parse_line_col(start).ok_or_else(|| invalid("bad start position"))?;
    let (end_line, end_col) = parse_line_col(end).ok_or_else(|| invalid("bad end position"))?;

    let num_stmt = num_stmt
        .parse::<u32>()
        .map_err(|_| invalid("statement count is not a non-negative integer"))?;
    let count = count
        .parse::<u64>()
        .map_err(|_| invalid("execution count is not a non-negative integer"))?;

    let block = BlockRecord {
        position: BlockPosition {
            start_line,
            start_col,
            end_line,
            end_col,
        },
        num_stmt,
        count,
    };

    Ok((name, block))
}

fn parse_line_col(s: &str) -> Option<(u32, u32)> {
    let (line, col) = s.split_once('.')?;
    Some((line.parse().ok()?, col.parse().ok()?))
}

/// Sort a unit's blocks by position and merge duplicates
///
/// **Private** - internal helper
fn merge_blocks(
    name: String,
    mut blocks: Vec<ParsedLine>,
    mode: ProfileMode,
) -> Result<RawUnit, ParseError> {
    blocks.sort_by_key(|parsed| parsed.block.position);

    let mut merged: Vec<BlockRecord> = Vec::with_capacity(blocks.len());
    for parsed in blocks {
        match merged.last_mut() {
            Some(last) if last.position == parsed.block.position => {
                if last.num_stmt != parsed.block.num_stmt {
                    return Err(ParseError::InconsistentBlock {
                        line: parsed.line,
                        unit: name,
                    });
                }
                last.count = match mode {
                    ProfileMode::Set => last.count.max(parsed.block.count),
                    ProfileMode::Count | ProfileMode::Atomic => {
                        last.count.saturating_add(parsed.block.count)
                    }
                };
            }
            _ => merged.push(parsed.block),
        }
    }

    Ok(RawUnit::new(name, merged))
}
