//! Data model for the HDH project catalog search.
//!
//! - **field**: named record fields and the header labels of the register export
//! - **record**: raw records and the dataset snapshot
//! - **facet**: facets and `ALL`-aware selections
//! - **status**: derived completion status and the status filter
//! - **request**: the immutable filter request passed to each search

pub mod error;
pub mod facet;
pub mod field;
pub mod lookup;
pub mod record;
pub mod request;
pub mod status;

pub use error::{HdhError, Result};
pub use facet::{ALL_SENTINEL, FacetName, FacetSelection};
pub use field::{
    DERIVED_LABELS, ENRICHED_SOURCES_LABEL, Field, NORMALIZED_DOMAIN_LABEL, STATUS_LABEL,
    header_key,
};
pub use lookup::HeaderIndex;
pub use record::{ColumnMap, Dataset, MISSING_PLACEHOLDERS, ProjectRecord, is_missing};
pub use request::FilterRequest;
pub use status::{StatusFilter, StatusLabel};
