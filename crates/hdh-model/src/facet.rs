//! Facets and facet selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HdhError;
use crate::field::{ENRICHED_SOURCES_LABEL, Field, NORMALIZED_DOMAIN_LABEL};

/// Selection value meaning "impose no constraint on this facet".
pub const ALL_SENTINEL: &str = "ALL";

/// Multi-valued facets filtered by token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetName {
    EntityType,
    MedicalDomain,
    Purpose,
    Objectives,
    DataSource,
}

impl FacetName {
    pub const ALL: [FacetName; 5] = [
        FacetName::EntityType,
        FacetName::MedicalDomain,
        FacetName::Purpose,
        FacetName::Objectives,
        FacetName::DataSource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FacetName::EntityType => "entity-type",
            FacetName::MedicalDomain => "domain",
            FacetName::Purpose => "purpose",
            FacetName::Objectives => "objectives",
            FacetName::DataSource => "source",
        }
    }

    /// Column of the enriched schema the options of this facet come from.
    ///
    /// Entity types are offered from a fixed list and have no option column.
    pub fn option_column(self) -> Option<&'static str> {
        match self {
            FacetName::EntityType => None,
            FacetName::MedicalDomain => Some(NORMALIZED_DOMAIN_LABEL),
            FacetName::Purpose => Some(Field::Purpose.label()),
            FacetName::Objectives => Some(Field::Objectives.label()),
            FacetName::DataSource => Some(ENRICHED_SOURCES_LABEL),
        }
    }
}

impl fmt::Display for FacetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetName {
    type Err = HdhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('_', "-");
        FacetName::ALL
            .into_iter()
            .find(|facet| facet.as_str() == key)
            .ok_or_else(|| HdhError::UnknownFacet {
                value: s.to_string(),
            })
    }
}

/// Selection on one facet: no constraint, or any of a non-empty value set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetSelection<T = String> {
    All,
    AnyOf(Vec<T>),
}

impl<T> Default for FacetSelection<T> {
    fn default() -> Self {
        FacetSelection::All
    }
}

impl<T: PartialEq> FacetSelection<T> {
    /// Select any of `values`; an empty set collapses to [`FacetSelection::All`].
    pub fn any_of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut unique: Vec<T> = Vec::new();
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        if unique.is_empty() {
            FacetSelection::All
        } else {
            FacetSelection::AnyOf(unique)
        }
    }
}

impl<T> FacetSelection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, FacetSelection::All)
    }

    /// Selected values; empty for [`FacetSelection::All`].
    pub fn values(&self) -> &[T] {
        match self {
            FacetSelection::All => &[],
            FacetSelection::AnyOf(values) => values,
        }
    }
}

impl FacetSelection<String> {
    /// Values the selection constrains on, or `None` when it imposes nothing.
    ///
    /// A value set that is empty or holds the `ALL` sentinel reads as
    /// [`FacetSelection::All`], however the selection was built.
    pub fn active_values(&self) -> Option<&[String]> {
        match self {
            FacetSelection::AnyOf(values)
                if !values.is_empty() && !values.iter().any(|v| v.trim() == ALL_SENTINEL) =>
            {
                Some(values)
            }
            _ => None,
        }
    }

    /// Build a selection from user tokens.
    ///
    /// Blank tokens are ignored; the `ALL` sentinel anywhere in the list, or
    /// no token at all, yields [`FacetSelection::All`].
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Vec::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            if token == ALL_SENTINEL {
                return FacetSelection::All;
            }
            values.push(token.to_string());
        }
        FacetSelection::any_of(values)
    }
}

impl FacetSelection<i32> {
    /// Selected years, or `None` for no constraint (including an empty set).
    pub fn active_values(&self) -> Option<&[i32]> {
        match self {
            FacetSelection::AnyOf(years) if !years.is_empty() => Some(years),
            _ => None,
        }
    }

    /// Build a start-year selection from user tokens, with the same
    /// collapsing rules as [`FacetSelection::from_tokens`].
    pub fn from_year_tokens<I, S>(tokens: I) -> Result<Self, HdhError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut years = Vec::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            if token == ALL_SENTINEL {
                return Ok(FacetSelection::All);
            }
            let year = token.parse::<i32>().map_err(|_| HdhError::InvalidYear {
                value: token.to_string(),
            })?;
            years.push(year);
        }
        Ok(FacetSelection::any_of(years))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_collapses_mixed_selection() {
        let selection = FacetSelection::from_tokens(["Cancer", "ALL"]);
        assert!(selection.is_all());
    }

    #[test]
    fn empty_selection_is_all() {
        let selection = FacetSelection::from_tokens(Vec::<String>::new());
        assert_eq!(selection, FacetSelection::All);
        assert!(FacetSelection::<String>::any_of(vec![]).is_all());
    }

    #[test]
    fn duplicates_are_dropped() {
        let selection = FacetSelection::from_tokens(["PMSI", " PMSI ", ""]);
        assert_eq!(selection.values(), ["PMSI".to_string()]);
    }

    #[test]
    fn year_tokens_parse() {
        let selection = FacetSelection::from_year_tokens(["2021", "2023"]).unwrap();
        assert_eq!(selection.values(), [2021, 2023]);
        assert!(FacetSelection::from_year_tokens(["ALL", "2021"]).unwrap().is_all());
        assert!(matches!(
            FacetSelection::from_year_tokens(["20x1"]),
            Err(HdhError::InvalidYear { .. })
        ));
    }

    #[test]
    fn unchecked_any_of_collapses_when_read() {
        assert_eq!(FacetSelection::<String>::AnyOf(vec![]).active_values(), None);
        let mixed = FacetSelection::AnyOf(vec!["HDH".to_string(), "ALL".to_string()]);
        assert_eq!(mixed.active_values(), None);
        assert_eq!(FacetSelection::<i32>::AnyOf(vec![]).active_values(), None);
        assert_eq!(
            FacetSelection::from_tokens(["HDH"]).active_values(),
            Some(["HDH".to_string()].as_slice())
        );
    }

    #[test]
    fn facet_names_parse() {
        assert_eq!("source".parse::<FacetName>(), Ok(FacetName::DataSource));
        assert_eq!("entity_type".parse::<FacetName>(), Ok(FacetName::EntityType));
        assert!("color".parse::<FacetName>().is_err());
    }
}
