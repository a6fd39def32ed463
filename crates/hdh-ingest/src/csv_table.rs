use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use hdh_model::Dataset;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Options for reading a register export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Header row and data rows of a CSV source, blank rows skipped.
///
/// Returns `None` when the source holds no non-blank row at all.
fn read_rows<R: Read>(
    source: R,
    options: ReadOptions,
) -> std::result::Result<Option<(Vec<String>, Vec<Vec<String>>)>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(source);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        if headers.is_none() {
            headers = Some(record.iter().map(normalize_header).collect());
        } else {
            rows.push(row);
        }
    }
    Ok(headers.map(|headers| (headers, rows)))
}

/// Read a register export from any CSV source.
///
/// `origin` only labels errors and log events.
pub fn read_dataset<R: Read>(source: R, options: ReadOptions, origin: &Path) -> Result<Dataset> {
    let Some((headers, rows)) =
        read_rows(source, options).map_err(|source| IngestError::CsvParse {
            path: origin.to_path_buf(),
            source,
        })?
    else {
        return Err(IngestError::EmptyCsv {
            path: origin.to_path_buf(),
        });
    };

    let dataset = Dataset::from_rows(headers, rows);
    let missing = dataset.columns().missing();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
        warn!(
            path = %origin.display(),
            missing = ?labels,
            "register columns not found; fields left empty"
        );
    }
    debug!(
        path = %origin.display(),
        record_count = dataset.len(),
        column_count = dataset.headers().len(),
        "read register CSV"
    );
    Ok(dataset)
}

/// Read a register export CSV file.
pub fn read_csv_dataset(path: &Path, options: &ReadOptions) -> Result<Dataset> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_dataset(file, *options, path)
}
