//! Raw catalog records and the dataset snapshot that holds them.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::lookup::HeaderIndex;

/// Missing-value placeholders produced by spreadsheet round-trips.
pub const MISSING_PLACEHOLDERS: [&str; 1] = ["nan"];

/// Returns true when a raw value carries no information.
///
/// Blank strings and placeholders such as `nan` count as missing.
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || MISSING_PLACEHOLDERS
            .iter()
            .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
}

/// One project of the register.
///
/// The named fields are resolved from the source columns when the dataset is
/// built; `cells` keeps the full source row so that columns the search does
/// not know about are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub reference: String,
    pub title: String,
    pub primary_source: String,
    pub snds_components: String,
    pub hdh_bases: String,
    pub other_sources: String,
    pub medical_domain: String,
    pub purpose: String,
    pub objectives: String,
    pub responsible: [String; 3],
    pub entity_types: [String; 3],
    pub start_date: String,
    pub completion: String,
    /// Source row, aligned with [`Dataset::headers`].
    pub cells: Vec<String>,
}

impl ProjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named field.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = value.into();
        self
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Reference => &self.reference,
            Field::Title => &self.title,
            Field::PrimarySource => &self.primary_source,
            Field::SndsComponents => &self.snds_components,
            Field::HdhBases => &self.hdh_bases,
            Field::OtherSources => &self.other_sources,
            Field::MedicalDomain => &self.medical_domain,
            Field::Purpose => &self.purpose,
            Field::Objectives => &self.objectives,
            Field::Responsible1 => &self.responsible[0],
            Field::Responsible2 => &self.responsible[1],
            Field::Responsible3 => &self.responsible[2],
            Field::EntityType1 => &self.entity_types[0],
            Field::EntityType2 => &self.entity_types[1],
            Field::EntityType3 => &self.entity_types[2],
            Field::StartDate => &self.start_date,
            Field::Completion => &self.completion,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Reference => &mut self.reference,
            Field::Title => &mut self.title,
            Field::PrimarySource => &mut self.primary_source,
            Field::SndsComponents => &mut self.snds_components,
            Field::HdhBases => &mut self.hdh_bases,
            Field::OtherSources => &mut self.other_sources,
            Field::MedicalDomain => &mut self.medical_domain,
            Field::Purpose => &mut self.purpose,
            Field::Objectives => &mut self.objectives,
            Field::Responsible1 => &mut self.responsible[0],
            Field::Responsible2 => &mut self.responsible[1],
            Field::Responsible3 => &mut self.responsible[2],
            Field::EntityType1 => &mut self.entity_types[0],
            Field::EntityType2 => &mut self.entity_types[1],
            Field::EntityType3 => &mut self.entity_types[2],
            Field::StartDate => &mut self.start_date,
            Field::Completion => &mut self.completion,
        }
    }

    /// The three responsible-entity values.
    pub fn responsible(&self) -> impl Iterator<Item = &str> {
        self.responsible.iter().map(String::as_str)
    }

    /// The three entity-type values.
    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.entity_types.iter().map(String::as_str)
    }
}

/// Where each named field lives in the source columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: Vec<(Field, usize)>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String]) -> Self {
        let index = HeaderIndex::new(headers);
        let positions = Field::ALL
            .into_iter()
            .filter_map(|field| index.position(field.label()).map(|pos| (field, pos)))
            .collect();
        Self { positions }
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, pos)| *pos)
    }

    /// Fields with no matching source column.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.position(*field).is_none())
            .collect()
    }
}

/// An immutable snapshot of the register as received from acquisition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    columns: ColumnMap,
    records: Vec<ProjectRecord>,
}

impl Dataset {
    /// Build a dataset from a header row and text rows.
    ///
    /// Short rows are padded with empty cells and long rows truncated to the
    /// header width. Named fields whose column is absent stay empty.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = ColumnMap::resolve(&headers);
        let width = headers.len();
        let records = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, String::new());
                let mut record = ProjectRecord::new();
                for field in Field::ALL {
                    if let Some(pos) = columns.position(field) {
                        *record.slot_mut(field) = cells[pos].clone();
                    }
                }
                record.cells = cells;
                record
            })
            .collect();
        Self {
            headers,
            columns,
            records,
        }
    }

    /// Build a dataset from records assembled field by field.
    ///
    /// The schema is the canonical field order; source rows are regenerated
    /// from the named fields.
    pub fn from_records(records: Vec<ProjectRecord>) -> Self {
        let headers: Vec<String> = Field::ALL
            .iter()
            .map(|field| field.label().to_string())
            .collect();
        let columns = ColumnMap::resolve(&headers);
        let records = records
            .into_iter()
            .map(|mut record| {
                record.cells = Field::ALL
                    .iter()
                    .map(|field| record.get(*field).to_string())
                    .collect();
                record
            })
            .collect();
        Self {
            headers,
            columns,
            records,
        }
    }

    /// A dataset with no records and the canonical schema.
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a source column by header label.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        HeaderIndex::new(&self.headers).position(name)
    }
}
