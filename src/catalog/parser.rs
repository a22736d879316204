//! Lenient parser for comma-delimited catalog text.
//!
//! The first non-blank line is a header and is never inspected. Data rows that
//! lack a URL field or whose URL is not http(s) are dropped without error.

use crate::catalog::models::Entry;
use tracing::{debug, trace};

/// Result of parsing catalog text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Entries in file order
    pub entries: Vec<Entry>,
    /// Number of data rows that were dropped
    pub skipped: usize,
}

/// Parses catalog text into entries, dropping malformed rows.
pub fn parse(text: &str) -> Vec<Entry> {
    parse_with_report(text).entries
}

/// Parses catalog text and counts the rows that were dropped.
pub fn parse_with_report(text: &str) -> ParseReport {
    let lines: Vec<&str> =
        text.split(['\r', '\n']).map(str::trim).filter(|line| !line.is_empty()).collect();

    let mut report = ParseReport::default();

    if lines.len() < 2 {
        debug!("Catalog has no data rows ({} non-blank lines)", lines.len());
        return report;
    }

    for (index, line) in lines.iter().enumerate().skip(1) {
        match parse_row(line) {
            Some(entry) => {
                trace!("Parsed row {}: {}", index, entry.name);
                report.entries.push(entry);
            }
            None => {
                trace!("Skipping malformed row {}: {}", index, line);
                report.skipped += 1;
            }
        }
    }

    debug!("Parsed {} entries ({} rows skipped)", report.entries.len(), report.skipped);

    report
}

/// Parses a single data row. Returns `None` when the row must be dropped.
fn parse_row(line: &str) -> Option<Entry> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 2 {
        return None;
    }

    let url = fields[1];
    if !is_http_url(url) {
        return None;
    }

    let raw_single = fields.get(2).copied().unwrap_or_default();
    let raw_set = fields.get(3).copied().unwrap_or_default();

    Some(Entry::new(fields[0], url, raw_single, raw_set))
}

/// Case-insensitive check for an `http://` or `https://` prefix.
fn is_http_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
