//! Export of HDH catalog search results.

pub mod error;
pub mod export;

pub use error::{OutputError, Result};
pub use export::{results_to_frame, write_results_csv, write_results_csv_file};
