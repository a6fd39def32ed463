//! Register acquisition with fallback.
//!
//! The primary export is tried first, then the fallback file. When neither
//! can be read the caller receives an explicit empty dataset. Nothing is
//! retried.

use std::fmt;
use std::path::{Path, PathBuf};

use hdh_model::Dataset;
use tracing::{error, info, warn};

use crate::config::CatalogConfig;
use crate::csv_table::{ReadOptions, read_csv_dataset};
use crate::error::Result;

/// Which source a loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Primary,
    Fallback,
    /// Neither source was readable.
    Empty,
}

impl fmt::Display for DatasetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DatasetOrigin::Primary => "primary",
            DatasetOrigin::Fallback => "fallback",
            DatasetOrigin::Empty => "empty",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub origin: DatasetOrigin,
    /// File the dataset was read from; `None` for [`DatasetOrigin::Empty`].
    pub path: Option<PathBuf>,
}

impl LoadedDataset {
    pub fn is_degraded(&self) -> bool {
        self.origin != DatasetOrigin::Primary
    }
}

fn try_read(path: &Path, options: &ReadOptions, role: DatasetOrigin) -> Option<Dataset> {
    match read_csv_dataset(path, options) {
        Ok(dataset) => Some(dataset),
        Err(err) => {
            warn!(path = %path.display(), role = %role, error = %err, "register source unavailable");
            None
        }
    }
}

/// Load the register described by `config`.
///
/// # Errors
///
/// Only configuration errors are returned; unreadable sources degrade to the
/// fallback and then to an empty dataset.
pub fn load_catalog(config: &CatalogConfig) -> Result<LoadedDataset> {
    let options = config.read_options()?;

    let primary = &config.source.primary;
    if let Some(dataset) = try_read(primary, &options, DatasetOrigin::Primary) {
        info!(path = %primary.display(), record_count = dataset.len(), "loaded register");
        return Ok(LoadedDataset {
            dataset,
            origin: DatasetOrigin::Primary,
            path: Some(primary.clone()),
        });
    }

    if let Some(fallback) = &config.source.fallback
        && let Some(dataset) = try_read(fallback, &options, DatasetOrigin::Fallback)
    {
        warn!(
            path = %fallback.display(),
            record_count = dataset.len(),
            "using fallback register"
        );
        return Ok(LoadedDataset {
            dataset,
            origin: DatasetOrigin::Fallback,
            path: Some(fallback.clone()),
        });
    }

    error!("no register source could be read; continuing with an empty dataset");
    Ok(LoadedDataset {
        dataset: Dataset::empty(),
        origin: DatasetOrigin::Empty,
        path: None,
    })
}
