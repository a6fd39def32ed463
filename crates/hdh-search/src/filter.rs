//! The filter engine.
//!
//! A [`FilterRequest`] is compiled once into lower-cased matchers, then
//! evaluated against every enriched record. Active predicates are
//! AND-combined; tokens within one facet are OR-combined.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use hdh_model::{FacetName, FacetSelection, FilterRequest, StatusFilter, StatusLabel};
use hdh_normalization::{EnrichedDataset, EnrichedRecord, HDH, SNDS, normalize_variants};
use tracing::debug;

/// Records of a snapshot that satisfy a request, in snapshot order.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    dataset: &'a EnrichedDataset,
    rows: Vec<usize>,
}

impl<'a> SearchResults<'a> {
    /// The snapshot the results were drawn from.
    pub fn dataset(&self) -> &'a EnrichedDataset {
        self.dataset
    }

    /// Header row of the enriched schema.
    pub fn headers(&self) -> &'a [String] {
        self.dataset.headers()
    }

    /// Positions of the matching records in the snapshot.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a EnrichedRecord> + '_ {
        let records = self.dataset.records();
        self.rows.iter().map(move |&row| &records[row])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn count_status(&self, status: StatusLabel) -> usize {
        self.iter().filter(|record| record.status == status).count()
    }

    pub fn in_progress_count(&self) -> usize {
        self.count_status(StatusLabel::InProgress)
    }

    pub fn completed_count(&self) -> usize {
        self.count_status(StatusLabel::Completed)
    }
}

/// A data source token and how it matches the enriched source value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceMatcher {
    /// An umbrella category: matches itself and every derived "X - Y" token.
    Umbrella(String),
    /// Plain substring, no pattern semantics.
    Literal(String),
}

impl SourceMatcher {
    fn new(token: &str) -> Self {
        if token.eq_ignore_ascii_case(SNDS) || token.eq_ignore_ascii_case(HDH) {
            SourceMatcher::Umbrella(token.to_lowercase())
        } else {
            SourceMatcher::Literal(token.to_lowercase())
        }
    }

    fn matches(&self, enriched_lower: &str) -> bool {
        match self {
            SourceMatcher::Umbrella(needle) | SourceMatcher::Literal(needle) => {
                enriched_lower.contains(needle.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EntityMatcher {
    query: Option<String>,
    exact: Vec<String>,
}

impl EntityMatcher {
    fn compile(query: &str, exact: &BTreeSet<String>) -> Option<Self> {
        let has_query = !query.trim().is_empty();
        if !has_query && exact.is_empty() {
            return None;
        }
        Some(Self {
            query: has_query.then(|| query.to_lowercase()),
            exact: exact.iter().cloned().collect(),
        })
    }

    fn matches(&self, record: &EnrichedRecord) -> bool {
        record.record.responsible().any(|entity| {
            let by_query = self
                .query
                .as_deref()
                .is_some_and(|query| entity.to_lowercase().contains(query));
            by_query || self.exact.iter().any(|name| name == entity)
        })
    }
}

/// A request reduced to the predicates that constrain anything.
#[derive(Debug, Clone, Default)]
struct CompiledRequest {
    query: Option<String>,
    entity_types: Option<Vec<String>>,
    domains: Option<Vec<String>>,
    purposes: Option<Vec<String>>,
    objectives: Option<Vec<String>>,
    sources: Option<Vec<SourceMatcher>>,
    entity: Option<EntityMatcher>,
    years: Option<Vec<i32>>,
    status: StatusFilter,
}

fn lowered_tokens(selection: &FacetSelection) -> Option<Vec<String>> {
    selection
        .active_values()
        .map(|values| values.iter().map(|v| v.to_lowercase()).collect())
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

impl CompiledRequest {
    fn compile(request: &FilterRequest) -> Self {
        let query = &request.query;
        Self {
            query: (!query.trim().is_empty()).then(|| query.to_lowercase()),
            entity_types: lowered_tokens(request.facet(FacetName::EntityType)),
            domains: lowered_tokens(request.facet(FacetName::MedicalDomain)),
            purposes: lowered_tokens(request.facet(FacetName::Purpose)),
            objectives: lowered_tokens(request.facet(FacetName::Objectives)),
            sources: request
                .facet(FacetName::DataSource)
                .active_values()
                .map(|values| values.iter().map(|v| SourceMatcher::new(v)).collect()),
            entity: EntityMatcher::compile(&request.entity_query, &request.entity_exact),
            years: request.start_years.active_values().map(<[i32]>::to_vec),
            status: request.status,
        }
    }

    fn matches(&self, record: &EnrichedRecord) -> bool {
        if let Some(query) = &self.query
            && !record.search_text.contains(query.as_str())
        {
            return false;
        }

        if let Some(types) = &self.entity_types
            && !record
                .record
                .entity_types()
                .any(|value| contains_any(value, types))
        {
            return false;
        }

        if let Some(domains) = &self.domains
            && !contains_any(&record.normalized_domain, domains)
        {
            return false;
        }

        if let Some(purposes) = &self.purposes
            && !contains_any(&normalize_variants(&record.record.purpose), purposes)
        {
            return false;
        }

        if let Some(objectives) = &self.objectives
            && !contains_any(&normalize_variants(&record.record.objectives), objectives)
        {
            return false;
        }

        if let Some(entity) = &self.entity
            && !entity.matches(record)
        {
            return false;
        }

        if let Some(years) = &self.years
            && !record.start_year.is_some_and(|year| years.contains(&year))
        {
            return false;
        }

        if let Some(sources) = &self.sources {
            let enriched = record.enriched_sources.to_lowercase();
            if !sources.iter().any(|source| source.matches(&enriched)) {
                return false;
            }
        }

        self.status.matches(record.status)
    }
}

/// Select the records of `dataset` that satisfy `request`.
///
/// The snapshot is never modified and record order is preserved; a request
/// with every facet at `ALL` and empty queries returns every record.
pub fn filter<'a>(dataset: &'a EnrichedDataset, request: &FilterRequest) -> SearchResults<'a> {
    let start = Instant::now();
    let compiled = CompiledRequest::compile(request);

    let rows: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| compiled.matches(record))
        .map(|(row, _)| row)
        .collect();

    debug!(
        record_count = dataset.len(),
        match_count = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "filtered dataset"
    );

    SearchResults { dataset, rows }
}

/// [`filter`] with the request given as its parts.
pub fn filter_records<'a>(
    dataset: &'a EnrichedDataset,
    query: &str,
    facets: &BTreeMap<FacetName, FacetSelection>,
    entity_query: &str,
    entity_exact: &BTreeSet<String>,
) -> SearchResults<'a> {
    let request = FilterRequest {
        query: query.to_string(),
        facets: facets.clone(),
        entity_query: entity_query.to_string(),
        entity_exact: entity_exact.clone(),
        ..FilterRequest::default()
    };
    filter(dataset, &request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umbrella_tokens_are_case_insensitive() {
        assert_eq!(
            SourceMatcher::new("snds"),
            SourceMatcher::Umbrella("snds".to_string())
        );
        assert_eq!(
            SourceMatcher::new("SNDS - PMSI"),
            SourceMatcher::Literal("snds - pmsi".to_string())
        );
    }

    #[test]
    fn literal_tokens_have_no_pattern_semantics() {
        let matcher = SourceMatcher::new("Registre (a.b)*");
        assert!(matcher.matches("hdh, registre (a.b)*"));
        assert!(!matcher.matches("hdh, registre (axb)"));
    }

    #[test]
    fn entity_matcher_needs_input() {
        assert!(EntityMatcher::compile("  ", &BTreeSet::new()).is_none());
        assert!(EntityMatcher::compile("", &BTreeSet::from(["INSERM".to_string()])).is_some());
    }
}
