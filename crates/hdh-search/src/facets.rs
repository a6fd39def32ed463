//! Facet option sets.
//!
//! Option lists are recomputed from a snapshot; multiselect lists lead with
//! the `ALL` sentinel.

use std::collections::BTreeSet;

use hdh_model::{ALL_SENTINEL, FacetName, Field, Result, StatusLabel, is_missing};
use hdh_normalization::{EnrichedDataset, canonical_tokens};
use tracing::debug;

/// Entity categories offered by the entity type facet.
pub const ENTITY_TYPE_CATEGORIES: [&str; 11] = [
    "Université",
    "Entreprise",
    "Etablissement public de santé",
    "Etablissement privé de santé",
    "Association",
    "Bureau d'étude",
    "Industriel",
    "Start-up",
    "INSERM",
    "Fédération",
    "Agence",
];

fn with_sentinel<I>(options: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    std::iter::once(ALL_SENTINEL.to_string())
        .chain(options)
        .collect()
}

/// Sorted distinct canonical tokens of a column of the enriched schema,
/// led by `ALL`.
///
/// A register field whose column is absent from the snapshot (a degraded
/// load, a partial export) offers only `ALL`.
///
/// # Errors
///
/// Returns [`hdh_model::HdhError::UnknownField`] when `field_name` names
/// neither a column of the snapshot nor a register field.
pub fn facet_options(dataset: &EnrichedDataset, field_name: &str) -> Result<Vec<String>> {
    let values = match dataset.column_values(field_name) {
        Ok(values) => values,
        Err(err) => {
            if Field::from_label(field_name).is_none() {
                return Err(err);
            }
            debug!(field = field_name, "facet column absent from snapshot");
            return Ok(with_sentinel(Vec::new()));
        }
    };
    let mut tokens = BTreeSet::new();
    for value in values {
        if is_missing(value) {
            continue;
        }
        tokens.extend(canonical_tokens(value));
    }
    Ok(with_sentinel(tokens))
}

/// Options of a multiselect facet.
///
/// # Errors
///
/// Only fails through [`facet_options`]; every facet column is either a
/// register field or a derived column.
pub fn facet_options_for(dataset: &EnrichedDataset, facet: FacetName) -> Result<Vec<String>> {
    match facet.option_column() {
        Some(column) => facet_options(dataset, column),
        None => Ok(entity_type_options()),
    }
}

/// The fixed entity categories, led by `ALL`.
pub fn entity_type_options() -> Vec<String> {
    with_sentinel(ENTITY_TYPE_CATEGORIES.iter().map(|c| (*c).to_string()))
}

/// Distinct parsed start years, most recent first, led by `ALL`.
pub fn start_year_options(dataset: &EnrichedDataset) -> Vec<String> {
    let years: BTreeSet<i32> = dataset
        .records()
        .iter()
        .filter_map(|record| record.start_year)
        .collect();
    with_sentinel(years.into_iter().rev().map(|year| year.to_string()))
}

/// Sorted distinct responsible entities across the three responsible columns.
pub fn entity_options(dataset: &EnrichedDataset) -> Vec<String> {
    let entities: BTreeSet<&str> = dataset
        .records()
        .iter()
        .flat_map(|record| record.record.responsible())
        .filter(|entity| !is_missing(entity))
        .collect();
    entities.into_iter().map(str::to_string).collect()
}

/// Status choices, led by `ALL`.
pub fn status_options() -> Vec<String> {
    with_sentinel(
        [StatusLabel::InProgress, StatusLabel::Completed]
            .into_iter()
            .map(|status| status.as_str().to_string()),
    )
}
