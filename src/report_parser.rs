//! `perf report` text parser
//!
//! Extracts per-function overhead from reports generated with
//! `perf report --children --stdio`. Parsing is token based: each data row is
//! split on whitespace and fields are picked by position.
//!
//! ```text
//! # Children      Self  Command   Shared Object      Symbol
//! # ........  ........  ........  .................  ..............
//! #
//!     12.50%     3.10%  postgres  postgres           [.] ExecInterpExpr
//! ```
//!
//! Parsing is best-effort. A malformed row is dropped and never aborts the
//! report, and an unreadable report yields no records.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Substrings that together identify the column header line
const HEADER_MARKERS: [&str; 3] = ["Children", "Self", "Symbol"];

/// Minimum tokens in a data row: children%, self%, command, object, `[x]`, symbol
const MIN_TOKENS: usize = 6;

/// Index of the first token that may hold the `[.]`/`[k]` symbol-kind marker
const BRACKET_SEARCH_START: usize = 4;

/// One function's overhead in a single report
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRecord {
    /// Symbol name exactly as printed by perf (not demangled or normalized)
    pub function: String,
    /// Self overhead in percent
    pub overhead: f64,
    /// Children (inclusive) overhead in percent
    pub children: f64,
    pub command: String,
    /// Shared object / module the symbol lives in
    pub object: String,
}

impl FunctionRecord {
    /// Function name cut to at most `width` characters
    pub fn short_name(&self, width: usize) -> &str {
        match self.function.char_indices().nth(width) {
            Some((idx, _)) => &self.function[..idx],
            None => &self.function,
        }
    }
}

/// Whether `line` is the `Children ... Self ... Symbol` column header
pub fn is_header(line: &str) -> bool {
    HEADER_MARKERS.iter().all(|marker| line.contains(marker))
}

/// Parse a `12.34%` token into a percentage in `0..=100`
fn parse_percent(token: &str) -> Option<f64> {
    let value: f64 = token.strip_suffix('%')?.parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value)
}

/// Parse one data row
///
/// Returns `None` for anything that is not a well-formed row with non-zero
/// self overhead. The function name is every token after the first
/// bracketed token at or beyond index 4, joined by single spaces.
pub fn parse_line(line: &str) -> Option<FunctionRecord> {
    if !line.contains('%') {
        return None;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_TOKENS {
        return None;
    }

    let children = parse_percent(parts[0])?;
    let overhead = parse_percent(parts[1])?;

    // Frames with no directly attributed samples
    if overhead == 0.0 {
        return None;
    }

    let bracket = parts
        .iter()
        .skip(BRACKET_SEARCH_START)
        .position(|part| part.starts_with('[') && part.ends_with(']'))?
        + BRACKET_SEARCH_START;

    let name_tokens = &parts[bracket + 1..];
    if name_tokens.is_empty() {
        return None;
    }

    Some(FunctionRecord {
        function: name_tokens.join(" "),
        overhead,
        children,
        command: parts[2].to_string(),
        object: parts[3].to_string(),
    })
}

/// Parse the lines of a report
///
/// Everything up to and including the header line is ignored; with no header
/// the result is empty. Records come back sorted by self overhead, highest
/// first, with ties kept in report order.
pub fn parse_lines<I, S>(lines: I) -> Vec<FunctionRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut functions = Vec::new();
    let mut found_header = false;
    let mut skipped = 0usize;

    for line in lines {
        let line = line.as_ref();

        if is_header(line) {
            found_header = true;
            continue;
        }

        if !found_header {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Some(record) => functions.push(record),
            None => skipped += 1,
        }
    }

    if !found_header {
        tracing::debug!("No Children/Self/Symbol header found");
    }
    tracing::debug!("Parsed {} rows, skipped {}", functions.len(), skipped);

    functions.sort_by(|a, b| b.overhead.total_cmp(&a.overhead));
    functions
}

/// Parse a report file
///
/// A missing or empty file yields an empty list. Lines that are not valid
/// UTF-8 are decoded lossily; a read error stops parsing at that point.
pub fn parse_report(path: &Path) -> Vec<FunctionRecord> {
    match path.metadata() {
        Ok(meta) if meta.len() > 0 => {}
        _ => return Vec::new(),
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Cannot open {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let lines = BufReader::new(file)
        .split(b'\n')
        .map_while(|line| match line {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                tracing::warn!("Read error in {}: {}", path.display(), e);
                None
            }
        });

    parse_lines(lines)
}
