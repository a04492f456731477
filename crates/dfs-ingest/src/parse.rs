//! Delimited-text parsing.
//!
//! Two splitting behaviors coexist in the dataset corpus: the parks
//! dataset carries quoted fields containing the delimiter, while the
//! bulk CSV trees are plain. Both are kept and selected explicitly via
//! [`SplitMode`] rather than unified.

use crate::types::RowRecord;

/// Field-splitting behavior for one delimited line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// A delimiter inside a double-quoted field is not a split point.
    /// Fields are whitespace-trimmed and have at most one enclosing
    /// pair of double quotes stripped.
    QuoteAware,
    /// Split on every delimiter occurrence; fields are left untouched.
    Naive,
}

/// Splits one line into fields.
pub fn split_line(line: &str, delimiter: char, mode: SplitMode) -> Vec<String> {
    match mode {
        SplitMode::Naive => line.split(delimiter).map(str::to_string).collect(),
        SplitMode::QuoteAware => quote_aware_split(line, delimiter),
    }
}

/// Splits at a delimiter only when an even number of double quotes
/// follows it on the line, so a delimiter inside an open quoted span is
/// kept as field content.
fn quote_aware_split(line: &str, delimiter: char) -> Vec<String> {
    let total_quotes = line.chars().filter(|&c| c == '"').count();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut seen_quotes = 0usize;

    for c in line.chars() {
        if c == '"' {
            seen_quotes += 1;
            current.push(c);
        } else if c == delimiter && (total_quotes - seen_quotes) % 2 == 0 {
            fields.push(clean_field(&current));
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(clean_field(&current));
    fields
}

fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Parses a header line plus body lines into row records.
///
/// The header is split with the same mode as body lines. Fields pair
/// with headers by position: a short body line populates only the
/// positions it has (missing trailing columns are absent, not empty),
/// and extra trailing fields are ignored. Rows that would produce an
/// empty record are skipped, and an empty header line yields no records.
pub fn parse_table<I, S>(
    header_line: &str,
    body_lines: I,
    delimiter: char,
    mode: SplitMode,
) -> Vec<RowRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if header_line.is_empty() {
        return Vec::new();
    }
    let headers = split_line(header_line, delimiter, mode);

    let mut rows = Vec::new();
    for line in body_lines {
        let values = split_line(line.as_ref(), delimiter, mode);
        let mut record = RowRecord::new();
        for (header, value) in headers.iter().zip(values) {
            record.insert(header.clone(), value);
        }
        if !record.is_empty() {
            rows.push(record);
        }
    }
    rows
}
