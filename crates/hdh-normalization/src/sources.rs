//! Hierarchical enrichment of the data source field.
//!
//! The primary source field names umbrella categories ("SNDS", "HDH") or
//! "Autre(s)"; the satellite fields list what each category covers. The
//! enriched value spells the hierarchy out so that selecting an umbrella
//! matches all of its parts:
//!
//! - SNDS sub-components are deduplicated and sorted, behind a leading `SNDS`
//! - HDH sub-bases follow `HDH` in source order, duplicates kept
//! - other sources that are in fact SNDS components move under `SNDS`

use std::collections::BTreeSet;
use std::sync::LazyLock;

use hdh_model::{ProjectRecord, is_missing};
use regex::Regex;

use crate::rules::{canonical_tokens, canonicalize};

/// Umbrella token for the national health data system.
pub const SNDS: &str = "SNDS";

/// Umbrella token for the Health Data Hub catalog.
pub const HDH: &str = "HDH";

/// Placeholder appended when "Autre(s)" is selected but no other source is listed.
pub const OTHER_PLACEHOLDER: &str = "Autres";

/// Known SNDS components, lower-cased, matched as substrings.
pub const SNDS_COMPONENTS: [&str; 6] = [
    "causes médicales de décès",
    "esnd",
    "dcir",
    "pmsi",
    "certificats de décès",
    "rniam",
];

static SNDS_UMBRELLA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSNDS\b").expect("Invalid SNDS umbrella regex"));

static HDH_UMBRELLA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bHDH\b").expect("Invalid HDH umbrella regex"));

static OTHER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bAutre\(?\s*s\)?\b|\bautres?\b").expect("Invalid other-source regex")
});

/// Returns true when `token` names one of the known SNDS components.
pub fn is_snds_component(token: &str) -> bool {
    let lowered = token.to_lowercase();
    SNDS_COMPONENTS
        .iter()
        .any(|component| lowered.contains(component))
}

#[derive(Debug, Default)]
struct SourceAccumulator {
    snds_detected: bool,
    snds_parts: BTreeSet<String>,
    generic: Vec<String>,
}

impl SourceAccumulator {
    fn add_snds_part(&mut self, part: String) {
        self.snds_detected = true;
        self.snds_parts.insert(part);
    }

    fn finish(self) -> String {
        let mut out = Vec::with_capacity(1 + self.snds_parts.len() + self.generic.len());
        if self.snds_detected || !self.snds_parts.is_empty() {
            out.push(SNDS.to_string());
            out.extend(self.snds_parts.iter().map(|part| format!("{SNDS} - {part}")));
        }
        out.extend(self.generic);
        out.join(", ")
    }
}

/// Build the enriched data source value from the primary field and its
/// three satellite fields.
///
/// A missing primary field yields the empty string without looking at the
/// satellites.
pub fn enrich_sources(
    primary: &str,
    snds_components: &str,
    hdh_bases: &str,
    other_sources: &str,
) -> String {
    if is_missing(primary) {
        return String::new();
    }

    let mut acc = SourceAccumulator::default();
    for raw in primary.split(',') {
        let token = canonicalize(raw);
        if token.is_empty() {
            continue;
        }

        if SNDS_UMBRELLA.is_match(&token) {
            acc.snds_detected = true;
            acc.snds_parts.extend(canonical_tokens(snds_components));
        } else if HDH_UMBRELLA.is_match(&token) {
            acc.generic.push(HDH.to_string());
            acc.generic
                .extend(canonical_tokens(hdh_bases).map(|base| format!("{HDH} - {base}")));
        } else if OTHER_MARKER.is_match(&token) {
            let mut listed = false;
            for other in canonical_tokens(other_sources) {
                listed = true;
                if is_snds_component(&other) {
                    acc.add_snds_part(other);
                } else {
                    acc.generic.push(other);
                }
            }
            if !listed {
                acc.generic.push(OTHER_PLACEHOLDER.to_string());
            }
        } else if is_snds_component(&token) {
            acc.add_snds_part(token);
        } else {
            acc.generic.push(token);
        }
    }
    acc.finish()
}

/// [`enrich_sources`] over the source fields of a record.
pub fn enrich_record_sources(record: &ProjectRecord) -> String {
    enrich_sources(
        &record.primary_source,
        &record.snds_components,
        &record.hdh_bases,
        &record.other_sources,
    )
}
