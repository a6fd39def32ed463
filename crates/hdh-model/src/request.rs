use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::facet::{FacetName, FacetSelection};
use crate::status::StatusFilter;

static ALL_SELECTION: FacetSelection = FacetSelection::All;

/// Everything a caller wants from one search, passed by value on each call.
///
/// Facets missing from `facets` impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    /// Free-text query over every field; empty matches all.
    pub query: String,
    pub facets: BTreeMap<FacetName, FacetSelection>,
    pub start_years: FacetSelection<i32>,
    pub status: StatusFilter,
    /// Free-text query over the responsible-entity columns.
    pub entity_query: String,
    /// Exact responsible-entity names.
    pub entity_exact: BTreeSet<String>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_facet(mut self, facet: FacetName, selection: FacetSelection) -> Self {
        self.facets.insert(facet, selection);
        self
    }

    #[must_use]
    pub fn with_start_years(mut self, years: FacetSelection<i32>) -> Self {
        self.start_years = years;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_entity_query(mut self, query: impl Into<String>) -> Self {
        self.entity_query = query.into();
        self
    }

    #[must_use]
    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_exact.extend(entities.into_iter().map(Into::into));
        self
    }

    pub fn facet(&self, facet: FacetName) -> &FacetSelection {
        self.facets.get(&facet).unwrap_or(&ALL_SELECTION)
    }

    /// True when no predicate is active and every record matches.
    pub fn is_unconstrained(&self) -> bool {
        self.query.trim().is_empty()
            && self
                .facets
                .values()
                .all(|selection| selection.active_values().is_none())
            && self.start_years.active_values().is_none()
            && self.status == StatusFilter::Any
            && self.entity_query.trim().is_empty()
            && self.entity_exact.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_facet_reads_as_all() {
        let request = FilterRequest::new();
        assert!(request.facet(FacetName::DataSource).is_all());
        assert!(request.is_unconstrained());
    }

    #[test]
    fn explicit_all_stays_unconstrained() {
        let request = FilterRequest::new()
            .with_facet(FacetName::EntityType, FacetSelection::All)
            .with_entity_query("   ");
        assert!(request.is_unconstrained());

        let request = request.with_entities(["CHU de Lille"]);
        assert!(!request.is_unconstrained());
    }
}
