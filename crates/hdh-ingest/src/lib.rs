//! HDH register acquisition.
//!
//! Reads register exports from CSV, falls back to a secondary file when the
//! primary source is unavailable, and caches loaded snapshots for a
//! configurable time.

pub mod acquisition;
pub mod cache;
pub mod config;
pub mod csv_table;
pub mod error;

pub use acquisition::{DatasetOrigin, LoadedDataset, load_catalog};
pub use cache::SnapshotCache;
pub use config::{CacheConfig, CatalogConfig, DEFAULT_PRIMARY, DEFAULT_TTL_SECS, SourceConfig};
pub use csv_table::{ReadOptions, read_csv_dataset, read_dataset};
pub use error::{IngestError, Result};
