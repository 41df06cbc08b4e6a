//! CSV table reader with encoding fallback and per-cell type inference.
//!
//! Two layouts are supported:
//!
//! - [`TableMode::Headered`]: first line holds column names, every following
//!   line is one row with exactly one cell per column.
//! - [`TableMode::KeyValue`]: no header, every line is a `key,value` pair.
//!
//! Cells are trimmed and typed with [`Cell::infer`]. Blank lines are skipped.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{CsvError, CsvResult};
use crate::models::{Cell, Row, Table};

/// Column names given to the two cells of a key,value table.
pub const KEY_VALUE_HEADERS: [&str; 2] = ["key", "value"];

/// Layout of a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// First line is the header.
    Headered,
    /// Headerless two-column `key,value` lines.
    KeyValue,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode file bytes to text.
///
/// Valid UTF-8 is used as is (minus a leading BOM). Anything else goes
/// through chardet detection and encoding_rs, with lossy UTF-8 as last resort.
pub fn decode_content(bytes: &[u8], path: &Path) -> CsvResult<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let encoding = detect_encoding(bytes);
    debug!("{}: not UTF-8, detected {}", path.display(), encoding);
    decode_as(bytes, &encoding, path)
}

/// Decode bytes with a named encoding.
pub fn decode_as(bytes: &[u8], encoding: &str, path: &Path) -> CsvResult<String> {
    let decoder = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => None,
        "iso-8859-1" | "latin-1" | "latin1" => Some(encoding_rs::WINDOWS_1252),
        other => encoding_rs::Encoding::for_label(other.as_bytes()),
    };

    match decoder {
        Some(decoder) => {
            let (text, _, had_errors) = decoder.decode(bytes);
            if had_errors {
                return Err(CsvError::Encoding {
                    path: path.to_path_buf(),
                    message: format!("invalid {} byte sequence", decoder.name()),
                });
            }
            Ok(text.into_owned())
        }
        // Fallback: UTF-8 with lossy conversion
        None => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Read one CSV file into a [`Table`].
///
/// The file handle lives only for the duration of the read.
pub fn read_table(path: &Path, mode: TableMode) -> CsvResult<Table> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CsvError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => CsvError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let content = decode_content(&bytes, path)?;
    let table = parse_table(&content, mode, path)?;

    debug!(
        "{}: {} rows x {} columns",
        path.display(),
        table.len(),
        table.headers.len()
    );
    Ok(table)
}

/// Parse CSV text into a [`Table`]. `path` is only used for error context.
pub fn parse_table(content: &str, mode: TableMode, path: &Path) -> CsvResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let headers: Vec<String> = match mode {
        TableMode::Headered => match next_record(&mut records, path)? {
            Some(header) => unique_headers(header.iter()),
            None => Vec::new(),
        },
        TableMode::KeyValue => KEY_VALUE_HEADERS.iter().map(|h| h.to_string()).collect(),
    };

    let mut rows = Vec::new();
    while let Some(record) = next_record(&mut records, path)? {
        if record.len() != headers.len() {
            return Err(CsvError::MalformedRow {
                path: path.to_path_buf(),
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: headers.len(),
                found: record.len(),
            });
        }

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(column, raw)| (column.clone(), Cell::infer(raw)))
            .collect();
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

/// Column names with repeats renamed `x.1`, `x.2`, ... so no column is lost.
fn unique_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<&'a str, usize> = HashMap::new();
    let mut headers = Vec::new();

    for name in names {
        let mut unique = name.to_string();
        while used.contains(&unique) {
            let suffix = suffixes.entry(name).or_insert(0);
            *suffix += 1;
            unique = format!("{}.{}", name, suffix);
        }
        used.insert(unique.clone());
        headers.push(unique);
    }

    headers
}

/// Next non-blank record, or `None` at end of input.
fn next_record<I>(records: &mut I, path: &Path) -> CsvResult<Option<csv::StringRecord>>
where
    I: Iterator<Item = csv::Result<csv::StringRecord>>,
{
    for result in records.by_ref() {
        let record = result.map_err(|e| csv_error(e, path))?;
        if !is_blank(&record) {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(str::is_empty)
}

fn csv_error(err: csv::Error, path: &Path) -> CsvError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => CsvError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => CsvError::Parse {
            path: path.to_path_buf(),
            message,
        },
    }
}
