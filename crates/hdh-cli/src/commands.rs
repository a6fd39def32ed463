use anyhow::{Context, Result};
use hdh_cli::catalog::{CatalogSession, FacetTarget, build_request, facet_listing, resolve_config};
use hdh_model::StatusLabel;
use hdh_output::write_results_csv_file;
use hdh_search::filter;
use tracing::info_span;

use crate::cli::{FacetsArgs, SearchArgs, SourceArgs};
use crate::types::{CatalogStats, FacetListing, ResultRow, SearchOutcome};

fn open_session(source: &SourceArgs) -> Result<CatalogSession> {
    let config = resolve_config(&source.overrides()).context("load catalog configuration")?;
    Ok(CatalogSession::new(config))
}

pub fn run_search(args: &SearchArgs) -> Result<SearchOutcome> {
    let span = info_span!("search");
    let _guard = span.enter();

    let request = build_request(&args.request_args()).context("invalid search flags")?;
    let mut session = open_session(&args.source)?;
    let dataset = session.snapshot().context("load register")?;
    let results = filter(&dataset, &request);

    let export = match &args.export {
        Some(path) => {
            write_results_csv_file(&results, path)
                .with_context(|| format!("export results to {}", path.display()))?;
            Some(path.clone())
        }
        None => None,
    };

    let rows = results
        .iter()
        .take(args.limit)
        .map(|record| ResultRow {
            reference: record.record.reference.clone(),
            title: record.record.title.clone(),
            sources: record.enriched_sources.clone(),
            domain: record.normalized_domain.clone(),
            status: record.status.to_string(),
        })
        .collect();

    Ok(SearchOutcome {
        origin: session.origin(),
        total_records: dataset.len(),
        match_count: results.len(),
        in_progress: results.in_progress_count(),
        completed: results.completed_count(),
        rows,
        export,
    })
}

pub fn run_facets(args: &FacetsArgs) -> Result<FacetListing> {
    let target: FacetTarget = args.field.parse()?;
    let mut session = open_session(&args.source)?;
    let dataset = session.snapshot().context("load register")?;
    let options = facet_listing(&dataset, &target)
        .with_context(|| format!("list options of {}", args.field))?;
    Ok(FacetListing {
        target: args.field.clone(),
        options,
    })
}

pub fn run_stats(args: &SourceArgs) -> Result<CatalogStats> {
    let mut session = open_session(args)?;
    let dataset = session.snapshot().context("load register")?;
    let count = |status: StatusLabel| {
        dataset
            .records()
            .iter()
            .filter(|record| record.status == status)
            .count()
    };
    Ok(CatalogStats {
        origin: session.origin(),
        source: session.config().source.primary.clone(),
        total_records: dataset.len(),
        in_progress: count(StatusLabel::InProgress),
        completed: count(StatusLabel::Completed),
    })
}
