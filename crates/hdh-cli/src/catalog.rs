//! Snapshot loading and request assembly behind the `hdh-catalog` commands.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use hdh_ingest::{CatalogConfig, DatasetOrigin, IngestError, SnapshotCache, load_catalog};
use hdh_model::{FacetName, FacetSelection, FilterRequest, HdhError, StatusFilter};
use hdh_normalization::{EnrichedDataset, enrich};
use hdh_search::{entity_options, facet_options, facet_options_for, start_year_options, status_options};
use tracing::{debug, info};

/// Source flags given on the command line; each one overrides the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub fallback: Option<PathBuf>,
    pub delimiter: Option<char>,
}

/// Build the effective configuration: defaults, then the config file, then flags.
pub fn resolve_config(overrides: &SourceOverrides) -> Result<CatalogConfig, IngestError> {
    let mut config = match &overrides.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    };
    if let Some(data) = &overrides.data {
        config = config.with_primary(data);
    }
    if let Some(fallback) = &overrides.fallback {
        config = config.with_fallback(fallback);
    }
    if let Some(delimiter) = overrides.delimiter {
        config = config.with_delimiter(delimiter);
        config.read_options()?;
    }
    Ok(config)
}

/// Enriched register snapshots served through a TTL cache.
pub struct CatalogSession {
    config: CatalogConfig,
    cache: SnapshotCache<EnrichedDataset>,
    origin: Option<DatasetOrigin>,
}

impl CatalogSession {
    pub fn new(config: CatalogConfig) -> Self {
        let cache = SnapshotCache::new(config.ttl());
        Self {
            config,
            cache,
            origin: None,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Origin of the most recent load; `None` before the first one.
    pub fn origin(&self) -> Option<DatasetOrigin> {
        self.origin
    }

    fn cache_key(&self) -> String {
        self.config.source.primary.display().to_string()
    }

    /// Current snapshot, loaded and enriched when absent or expired.
    pub fn snapshot(&mut self) -> Result<Arc<EnrichedDataset>, IngestError> {
        let key = self.cache_key();
        let config = &self.config;
        let origin = &mut self.origin;
        self.cache
            .get_or_load(&key, || load_enriched(config, origin))
    }

    /// Drop the cached snapshot and load it again.
    pub fn refresh(&mut self) -> Result<Arc<EnrichedDataset>, IngestError> {
        let key = self.cache_key();
        let config = &self.config;
        let origin = &mut self.origin;
        self.cache.refresh(&key, || load_enriched(config, origin))
    }
}

fn load_enriched(
    config: &CatalogConfig,
    origin: &mut Option<DatasetOrigin>,
) -> Result<EnrichedDataset, IngestError> {
    let start = Instant::now();
    let loaded = load_catalog(config)?;
    *origin = Some(loaded.origin);
    let enriched = enrich(&loaded.dataset);
    info!(
        origin = %loaded.origin,
        record_count = enriched.len(),
        duration_ms = start.elapsed().as_millis(),
        "catalog snapshot ready"
    );
    Ok(enriched)
}

/// Raw search flags, before validation.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
    pub query: Option<String>,
    pub entity_types: Vec<String>,
    pub domains: Vec<String>,
    pub purposes: Vec<String>,
    pub objectives: Vec<String>,
    pub sources: Vec<String>,
    pub years: Vec<String>,
    pub status: Option<String>,
    pub entity_search: Option<String>,
    pub entities: Vec<String>,
}

/// Turn search flags into a [`FilterRequest`].
///
/// # Errors
///
/// Fails on a year that is not an integer or an unknown status.
pub fn build_request(args: &RequestArgs) -> Result<FilterRequest, HdhError> {
    let facets = [
        (FacetName::EntityType, &args.entity_types),
        (FacetName::MedicalDomain, &args.domains),
        (FacetName::Purpose, &args.purposes),
        (FacetName::Objectives, &args.objectives),
        (FacetName::DataSource, &args.sources),
    ];
    let mut request = FilterRequest::new();
    for (facet, tokens) in facets {
        request = request.with_facet(facet, FacetSelection::from_tokens(tokens));
    }
    if let Some(query) = &args.query {
        request = request.with_query(query.as_str());
    }
    request = request.with_start_years(FacetSelection::from_year_tokens(&args.years)?);
    if let Some(status) = &args.status {
        request = request.with_status(status.parse::<StatusFilter>()?);
    }
    if let Some(query) = &args.entity_search {
        request = request.with_entity_query(query.as_str());
    }
    request = request.with_entities(args.entities.iter().map(String::as_str));
    debug!(unconstrained = request.is_unconstrained(), "search request built");
    Ok(request)
}

/// What the `facets` command lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetTarget {
    Facet(FacetName),
    StartYear,
    Entity,
    Status,
    /// Any other column of the enriched schema, by label.
    Column(String),
}

impl FromStr for FacetTarget {
    type Err = HdhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(facet) = s.parse::<FacetName>() {
            return Ok(FacetTarget::Facet(facet));
        }
        match s.trim().to_lowercase().as_str() {
            "year" | "start-year" => Ok(FacetTarget::StartYear),
            "entity" => Ok(FacetTarget::Entity),
            "status" => Ok(FacetTarget::Status),
            _ => Ok(FacetTarget::Column(s.to_string())),
        }
    }
}

/// Options for a facet target.
///
/// # Errors
///
/// Returns [`HdhError::UnknownField`] for a column label absent from the snapshot.
pub fn facet_listing(
    dataset: &EnrichedDataset,
    target: &FacetTarget,
) -> Result<Vec<String>, HdhError> {
    match target {
        FacetTarget::Facet(facet) => facet_options_for(dataset, *facet),
        FacetTarget::StartYear => Ok(start_year_options(dataset)),
        FacetTarget::Entity => Ok(entity_options(dataset)),
        FacetTarget::Status => Ok(status_options()),
        FacetTarget::Column(label) => facet_options(dataset, label),
    }
}
