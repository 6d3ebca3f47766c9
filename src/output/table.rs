//! Plain-text table renderer for reports.
//!
//! ```text
//! +----------+--------+---------+-------+---------+---------------+--------------+
//! | File     | Blocks | Missing | Stmts | Missing | Block cover % | Stmt cover % |
//! +----------+--------+---------+-------+---------+---------------+--------------+
//! | /main.go |     30 |      10 |    44 |      15 |         66.67 |        65.91 |
//! +----------+--------+---------+-------+---------+---------------+--------------+
//! | Total    |     30 |      10 |    44 |      15 |         66.67 |        65.91 |
//! +----------+--------+---------+-------+---------+---------------+--------------+
//! ```

use crate::aggregator::Summary;
use crate::report::Report;
use std::io::{self, Write};

/// Shown instead of a percentage when coverage is undefined
pub const UNDEFINED_COVERAGE: &str = "-";

const NUMERIC_HEADERS: [&str; 6] = [
    "Blocks",
    "Missing",
    "Stmts",
    "Missing",
    "Block cover %",
    "Stmt cover %",
];

/// Render a report as an ASCII table
///
/// **Public** - one row per file (or package), Total as footer
pub fn render_table(report: &Report, package_mode: bool) -> String {
    let first_header = if package_mode { "Package" } else { "File" };

    let mut header = vec![first_header.to_string()];
    header.extend(NUMERIC_HEADERS.iter().map(|h| h.to_string()));

    let rows: Vec<[String; 7]> = report.files.iter().map(make_row).collect();
    let footer = make_row(&report.total);

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows.iter().chain(std::iter::once(&footer)) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = separator_line(&widths);
    let mut lines = Vec::with_capacity(rows.len() + 6);

    lines.push(separator.clone());
    lines.push(format_line(&header, &widths));
    lines.push(separator.clone());
    for row in &rows {
        lines.push(format_line(row, &widths));
    }
    if !rows.is_empty() {
        lines.push(separator.clone());
    }
    lines.push(format_line(&footer, &widths));
    lines.push(separator);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render and write a report table
///
/// **Public** - the CLI passes stdout
pub fn print_table(report: &Report, package_mode: bool, writer: &mut impl Write) -> io::Result<()> {
    writer.write_all(render_table(report, package_mode).as_bytes())?;
    writer.flush()
}

/// Format a percentage with two decimals, or the undefined marker
pub fn format_coverage(coverage: Option<f64>) -> String {
    match coverage {
        Some(value) => format!("{:.2}", value),
        None => UNDEFINED_COVERAGE.to_string(),
    }
}

/// Convert a summary into table cells
///
/// **Private** - internal helper
fn make_row(summary: &Summary) -> [String; 7] {
    [
        summary.name.clone(),
        summary.blocks.to_string(),
        summary.missing_blocks.to_string(),
        summary.stmts.to_string(),
        summary.missing_stmts.to_string(),
        format_coverage(summary.block_coverage),
        format_coverage(summary.stmt_coverage),
    ]
}

fn separator_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

// Name column left-aligned, numbers right-aligned
fn format_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let padding = width.saturating_sub(cell.chars().count());
        if idx == 0 {
            line.push_str(&format!(" {}{} |", cell, " ".repeat(padding)));
        } else {
            line.push_str(&format!(" {}{} |", " ".repeat(padding), cell));
        }
    }
    line
}
