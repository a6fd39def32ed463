//! Search over enriched HDH catalog snapshots: facet options and filtering.

pub mod facets;
pub mod filter;

pub use facets::{
    ENTITY_TYPE_CATEGORIES, entity_options, entity_type_options, facet_options,
    facet_options_for, start_year_options, status_options,
};
pub use filter::{SearchResults, filter, filter_records};
