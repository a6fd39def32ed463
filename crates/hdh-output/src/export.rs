//! Spreadsheet-compatible export of search results.
//!
//! Columns follow the enriched schema: source headers in their original order
//! and labels, then the derived columns.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hdh_search::SearchResults;
use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// Column names for the frame; duplicated labels get a numeric suffix.
fn unique_names(headers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .map(|header| {
            let mut name = header.clone();
            let mut suffix = 2;
            while !seen.insert(name.clone()) {
                name = format!("{header} ({suffix})");
                suffix += 1;
            }
            if name != *header {
                debug!(header = %header, renamed = %name, "duplicate export column renamed");
            }
            name
        })
        .collect()
}

/// Build a string-typed frame of the matching records.
pub fn results_to_frame(results: &SearchResults<'_>) -> Result<DataFrame> {
    let names = unique_names(results.headers());
    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let values: Vec<&str> = results.iter().map(|record| record.cell(position)).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Write the matching records as CSV with a header row.
pub fn write_results_csv<W: Write>(results: &SearchResults<'_>, writer: &mut W) -> Result<()> {
    let mut frame = results_to_frame(results)?;
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(())
}

/// Write the matching records to a CSV file, replacing any existing file.
pub fn write_results_csv_file(results: &SearchResults<'_>, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_results_csv(results, &mut writer)?;
    writer.flush().map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = results.len(), "exported search results");
    Ok(())
}
