//! Named fields of a catalog record and their source header labels.
//!
//! The register export addresses columns by their French header labels.
//! This module is the only place where those labels appear; everything
//! downstream works with [`Field`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HdhError;

/// Header of the derived, hierarchy-aware data source column.
pub const ENRICHED_SOURCES_LABEL: &str = "Source de données utilisées enrichies";

/// Header of the derived therapeutic domain column ("Autre(s)" variants unified).
pub const NORMALIZED_DOMAIN_LABEL: &str = "Domaines médicaux investigués (normalisés)";

/// Header of the derived completion status column.
pub const STATUS_LABEL: &str = "Statut";

/// Headers appended to the source schema by enrichment, in order.
pub const DERIVED_LABELS: [&str; 3] = [ENRICHED_SOURCES_LABEL, NORMALIZED_DOMAIN_LABEL, STATUS_LABEL];

/// A named field of a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Reference,
    Title,
    /// Primary data source field ("SNDS, HDH, Autre(s)" style values).
    PrimarySource,
    /// Satellite field listing the SNDS sub-components.
    SndsComponents,
    /// Satellite field listing the HDH catalog sub-bases.
    HdhBases,
    /// Satellite field listing other sources.
    OtherSources,
    MedicalDomain,
    Purpose,
    Objectives,
    Responsible1,
    Responsible2,
    Responsible3,
    EntityType1,
    EntityType2,
    EntityType3,
    StartDate,
    /// Completion milestone; a date when the project is finished.
    Completion,
}

impl Field {
    /// Every field, in the column order of the register export.
    pub const ALL: [Field; 17] = [
        Field::Reference,
        Field::Title,
        Field::PrimarySource,
        Field::SndsComponents,
        Field::HdhBases,
        Field::OtherSources,
        Field::MedicalDomain,
        Field::Purpose,
        Field::Objectives,
        Field::Responsible1,
        Field::Responsible2,
        Field::Responsible3,
        Field::EntityType1,
        Field::EntityType2,
        Field::EntityType3,
        Field::StartDate,
        Field::Completion,
    ];

    pub const RESPONSIBLE: [Field; 3] = [
        Field::Responsible1,
        Field::Responsible2,
        Field::Responsible3,
    ];

    pub const ENTITY_TYPES: [Field; 3] = [
        Field::EntityType1,
        Field::EntityType2,
        Field::EntityType3,
    ];

    /// Header label of the column carrying this field in the register export.
    pub fn label(self) -> &'static str {
        match self {
            Field::Reference => "Référence",
            Field::Title => "title",
            Field::PrimarySource => "Source de données utilisées",
            Field::SndsComponents => "Composante(s) de la base principale du SNDS mobilisée(s)",
            Field::HdhBases => "Base(s) du catalogue du HDH mobilisée(s)",
            Field::OtherSources => "Autre(s) source(s) de donnée(s) mobilisée(s)",
            Field::MedicalDomain => "Domaines médicaux investigués",
            Field::Purpose => "Finalité de l'étude",
            Field::Objectives => "Objectifs poursuivis",
            Field::Responsible1 => "Responsable de traitement 1",
            Field::Responsible2 => "Responsable de traitement 2",
            Field::Responsible3 => "Responsable de traitement 3",
            Field::EntityType1 => "Type responsable treatment 1",
            Field::EntityType2 => "Type responsable treatment 2",
            Field::EntityType3 => "Type responsable treatment 3",
            Field::StartDate => "Date de début",
            Field::Completion => "Etape : Complétude",
        }
    }

    /// Resolve a header label to a field, ignoring case and whitespace runs.
    pub fn from_label(label: &str) -> Option<Field> {
        let key = header_key(label);
        Field::ALL
            .into_iter()
            .find(|field| header_key(field.label()) == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = HdhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_label(s).ok_or_else(|| HdhError::UnknownField {
            name: s.to_string(),
        })
    }
}

/// Comparison key for header labels.
///
/// Strips a byte-order mark, collapses whitespace runs to one space and
/// lower-cases, so "Etape  : Complétude" and "etape : complétude" compare equal.
pub fn header_key(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut key = String::with_capacity(trimmed.len());
    for (idx, part) in trimmed.split_whitespace().enumerate() {
        if idx > 0 {
            key.push(' ');
        }
        key.push_str(&part.to_lowercase());
    }
    key
}
