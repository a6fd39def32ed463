//! Per-snapshot enrichment: derived columns and the full-text blob.

use std::time::Instant;

use hdh_model::{
    DERIVED_LABELS, Dataset, HdhError, HeaderIndex, ProjectRecord, Result, StatusLabel,
};
use tracing::{debug, warn};

use crate::date::parse_start_year;
use crate::rules::normalize_variants;
use crate::sources::enrich_record_sources;
use crate::status::classify_status;

/// A record with its derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub record: ProjectRecord,
    /// Hierarchy-aware data source value.
    pub enriched_sources: String,
    /// Therapeutic domain with the "autre(s)" variants unified.
    pub normalized_domain: String,
    pub status: StatusLabel,
    pub start_year: Option<i32>,
    /// Lower-cased concatenation of every cell, raw and derived.
    pub search_text: String,
}

impl EnrichedRecord {
    pub fn from_record(record: ProjectRecord) -> Self {
        let enriched_sources = enrich_record_sources(&record);
        let normalized_domain = normalize_variants(&record.medical_domain);
        let status = classify_status(&record.completion);
        let start_year = parse_start_year(&record.start_date);

        let mut search_text = record.cells.join(" ");
        for derived in [
            enriched_sources.as_str(),
            normalized_domain.as_str(),
            status.as_str(),
        ] {
            search_text.push(' ');
            search_text.push_str(derived);
        }
        let search_text = search_text.to_lowercase();

        Self {
            record,
            enriched_sources,
            normalized_domain,
            status,
            start_year,
            search_text,
        }
    }

    /// Values of the derived columns, in [`DERIVED_LABELS`] order.
    pub fn derived_values(&self) -> [&str; 3] {
        [
            &self.enriched_sources,
            &self.normalized_domain,
            self.status.as_str(),
        ]
    }

    /// Cell at `position` of the enriched schema.
    pub fn cell(&self, position: usize) -> &str {
        let width = self.record.cells.len();
        if position < width {
            &self.record.cells[position]
        } else {
            self.derived_values()
                .get(position - width)
                .copied()
                .unwrap_or("")
        }
    }

    /// The full enriched row: source cells then derived values.
    pub fn row(&self) -> impl Iterator<Item = &str> {
        self.record
            .cells
            .iter()
            .map(String::as_str)
            .chain(self.derived_values())
    }
}

/// A dataset snapshot with every record enriched.
///
/// The schema is the source header row followed by [`DERIVED_LABELS`].
#[derive(Debug, Clone, Default)]
pub struct EnrichedDataset {
    headers: Vec<String>,
    index: HeaderIndex,
    records: Vec<EnrichedRecord>,
}

impl EnrichedDataset {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column of the enriched schema.
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.index
            .position(name)
            .ok_or_else(|| HdhError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Every record's value in the named column of the enriched schema.
    pub fn column_values(&self, name: &str) -> Result<impl Iterator<Item = &str>> {
        let position = self.column_position(name)?;
        Ok(self.records.iter().map(move |record| record.cell(position)))
    }
}

/// Derive the enriched columns of every record of a snapshot.
pub fn enrich(dataset: &Dataset) -> EnrichedDataset {
    let start = Instant::now();

    let source_width = dataset.headers().len();
    let mut headers = dataset.headers().to_vec();
    headers.extend(DERIVED_LABELS.iter().map(|label| (*label).to_string()));
    let mut index = HeaderIndex::new(&headers);
    // Derived columns shadow source columns carrying the same label.
    for (offset, label) in DERIVED_LABELS.iter().enumerate() {
        if let Some(shadowed) = index.assign(label, source_width + offset)
            && shadowed < source_width
        {
            warn!(column = *label, position = shadowed, "source column shadowed by derived column");
        }
    }

    let records: Vec<EnrichedRecord> = dataset
        .records()
        .iter()
        .cloned()
        .map(EnrichedRecord::from_record)
        .collect();

    debug!(
        record_count = records.len(),
        column_count = headers.len(),
        duration_ms = start.elapsed().as_millis(),
        "enriched dataset"
    );

    EnrichedDataset {
        headers,
        index,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdh_model::Field;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            ProjectRecord::new()
                .with(Field::Reference, "P1")
                .with(Field::PrimarySource, "SNDS")
                .with(Field::SndsComponents, "PMSI")
                .with(Field::MedicalDomain, "Cancer, Autre(s)")
                .with(Field::StartDate, "2022-03-01"),
            ProjectRecord::new()
                .with(Field::Reference, "P2")
                .with(Field::Completion, "2023-05-01"),
        ])
    }

    #[test]
    fn schema_appends_derived_columns() {
        let enriched = enrich(&sample());
        let headers = enriched.headers();
        assert_eq!(headers.len(), Field::ALL.len() + DERIVED_LABELS.len());
        assert_eq!(&headers[headers.len() - 3..], DERIVED_LABELS);
    }

    #[test]
    fn derived_fields() {
        let enriched = enrich(&sample());
        let first = &enriched.records()[0];
        assert_eq!(first.enriched_sources, "SNDS, SNDS - PMSI");
        assert_eq!(first.normalized_domain, "Cancer, Autres");
        assert_eq!(first.status, StatusLabel::InProgress);
        assert_eq!(first.start_year, Some(2022));
        assert!(first.search_text.contains("snds - pmsi"));
        assert!(first.search_text.contains("en cours"));
        assert_eq!(enriched.records()[1].status, StatusLabel::Completed);
    }

    #[test]
    fn column_values_by_label() {
        let enriched = enrich(&sample());
        let statuses: Vec<&str> = enriched.column_values("statut").unwrap().collect();
        assert_eq!(statuses, vec!["En cours", "Terminé"]);
        assert!(matches!(
            enriched.column_values("Pays"),
            Err(HdhError::UnknownField { .. })
        ));
    }

    #[test]
    fn derived_column_wins_over_source_column_with_same_label() {
        let dataset = Dataset::from_rows(
            vec!["Référence".to_string(), "Statut".to_string()],
            vec![vec!["P1".to_string(), "Archivé".to_string()]],
        );
        let enriched = enrich(&dataset);
        let statuses: Vec<&str> = enriched.column_values("Statut").unwrap().collect();
        assert_eq!(statuses, vec!["En cours"]);
        assert_eq!(enriched.column_position("Statut").unwrap(), 4);
        assert_eq!(enriched.records()[0].cell(1), "Archivé");
    }
}
