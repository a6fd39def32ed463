//! Normalization and enrichment of HDH register records.
//!
//! - [`rules`]: the ordered canonicalization table
//! - [`sources`]: SNDS/HDH hierarchy expansion of the data source field
//! - [`status`] and [`date`]: status and start-year derivation
//! - [`enrich`]: per-snapshot derived columns

pub mod date;
pub mod enrich;
pub mod rules;
pub mod sources;
pub mod status;

pub use date::parse_start_year;
pub use enrich::{EnrichedDataset, EnrichedRecord, enrich};
pub use rules::{
    CANONICAL_RULES, Rule, RuleDef, VARIANT_RULES, canonical_rules, canonical_tokens,
    canonicalize, normalize_variants,
};
pub use sources::{
    HDH, OTHER_PLACEHOLDER, SNDS, SNDS_COMPONENTS, enrich_record_sources, enrich_sources,
    is_snds_component,
};
pub use status::classify_status;
