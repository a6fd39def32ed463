use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HdhError;
use crate::facet::ALL_SENTINEL;

/// Completion state of a project, derived from the completion milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    InProgress,
    Completed,
}

impl StatusLabel {
    /// Display label used in the register.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::InProgress => "En cours",
            StatusLabel::Completed => "Terminé",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusLabel {
    type Err = HdhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "en cours" | "in progress" | "inprogress" => Ok(StatusLabel::InProgress),
            "terminé" | "termine" | "completed" | "done" => Ok(StatusLabel::Completed),
            _ => Err(HdhError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// Status constraint of a filter request.
///
/// `Any` plays the role of the multiselect `ALL` sentinel for this
/// single-choice facet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    Any,
    Only(StatusLabel),
}

impl StatusFilter {
    pub fn matches(self, status: StatusLabel) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = HdhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(StatusFilter::Any);
        }
        s.parse().map(StatusFilter::Only)
    }
}
