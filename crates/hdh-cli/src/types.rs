use std::path::PathBuf;

use hdh_ingest::DatasetOrigin;

/// One row of the search result table.
#[derive(Debug)]
pub struct ResultRow {
    pub reference: String,
    pub title: String,
    pub sources: String,
    pub domain: String,
    pub status: String,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub origin: Option<DatasetOrigin>,
    pub total_records: usize,
    pub match_count: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Rows shown, at most `--limit`.
    pub rows: Vec<ResultRow>,
    pub export: Option<PathBuf>,
}

#[derive(Debug)]
pub struct FacetListing {
    pub target: String,
    pub options: Vec<String>,
}

#[derive(Debug)]
pub struct CatalogStats {
    pub origin: Option<DatasetOrigin>,
    pub source: PathBuf,
    pub total_records: usize,
    pub in_progress: usize,
    pub completed: usize,
}
