//! CSV well files.
//!
//! The first non-empty record is the header; every following non-empty
//! record is a row. A quoted field may span lines. Cells are read as numbers, anything else (blank, `NaN`,
//! `null`, `-`, free text) becomes `NaN` so mixed tables such as the Volve
//! depth exports still load and plot by position.

use super::{finish_dataset, DataLoadError};
use crate::types::WellDataset;

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
pub fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Read a cell as `f64`, mapping missing markers and text to `NaN`.
pub fn parse_cell(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty()
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("na")
        || s == "-"
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Header names, with pandas-style `Unnamed: N` for blank ones.
fn header_columns(line: &str) -> Vec<String> {
    csv_split(line)
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// Group physical lines into records, joining lines while a quote is open.
/// Each record carries the line number it starts on. Blank records are
/// dropped.
fn split_records(source_name: &str, text: &str) -> Result<Vec<(usize, String)>, DataLoadError> {
    let mut records = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, line) in text.lines().enumerate() {
        let (start, mut record) = match pending.take() {
            Some((start, mut record)) => {
                record.push('\n');
                (start, record)
            }
            None => (idx + 1, String::new()),
        };
        record.push_str(line);

        // `""` escapes toggle twice, so parity tracks whether a quote is open.
        if record.matches('"').count() % 2 == 1 {
            pending = Some((start, record));
        } else if !record.trim().is_empty() {
            records.push((start, record));
        }
    }

    if let Some((start, _)) = pending {
        return Err(DataLoadError::parse(
            source_name,
            format!("line {start}: unterminated quoted field"),
        ));
    }
    Ok(records)
}

pub fn parse_csv(source_name: &str, text: &str) -> Result<WellDataset, DataLoadError> {
    let mut lines = split_records(source_name, text)?.into_iter();

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| DataLoadError::parse(source_name, "empty file"))?;

    let columns = header_columns(&header_line);
    if columns.len() < 2 {
        return Err(DataLoadError::parse(
            source_name,
            format!("header has {} column(s), need at least 2", columns.len()),
        ));
    }

    let mut rows = Vec::new();
    for (line_num, line) in lines {
        let fields = csv_split(&line);
        if fields.len() > columns.len() {
            return Err(DataLoadError::parse(
                source_name,
                format!(
                    "line {line_num}: expected {} fields, saw {}",
                    columns.len(),
                    fields.len()
                ),
            ));
        }

        let mut row: Vec<f64> = fields.iter().map(|f| parse_cell(f)).collect();
        row.resize(columns.len(), f64::NAN);
        rows.push(row);
    }

    let dataset = finish_dataset(source_name, columns, rows)?;
    tracing::debug!(source = source_name, rows = dataset.len(), "Parsed CSV well file");
    Ok(dataset)
}
