//! Ordered substitution rules that map raw register tokens to canonical tokens.
//!
//! The rules are data: each row is an id, a case-insensitive pattern and a
//! replacement, applied top to bottom. Missing values are screened out before
//! the table runs.

use std::sync::LazyLock;

use hdh_model::is_missing;
use regex::Regex;

/// One row of the substitution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDef {
    pub id: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// Canonicalization rules, in application order.
pub const CANONICAL_RULES: [RuleDef; 5] = [
    RuleDef {
        id: "cepidc",
        pattern: r"(?i)Bases?\s+des?\s+causes?\s+médicales?\s+de\s+décès\s*\(CépiDC\)",
        replacement: "Causes médicales de décès",
    },
    RuleDef {
        id: "esnd",
        pattern: r"(?i)Echantillon\s+du\s+ENSD",
        replacement: "ESND",
    },
    RuleDef {
        id: "enquetes",
        pattern: r"(?i)\benqu[êe]te(?:\s*\(?s\)?|\s*s)?\b",
        replacement: "Enquêtes",
    },
    RuleDef {
        id: "autres",
        pattern: r"(?i)\bautre(?:\s*\(?s\)?|\s*s)?\b",
        replacement: "Autres",
    },
    RuleDef {
        id: "orphan-paren",
        pattern: r"(?i)\b(Enquêtes?|Autres)\)+",
        replacement: "${1}",
    },
];

/// Rules of the generic variant normalizer: the `autres` rule, then the
/// orphan parenthesis strip restricted to `Autres`.
pub const VARIANT_RULES: [RuleDef; 2] = [
    CANONICAL_RULES[3],
    RuleDef {
        id: "orphan-paren-autres",
        pattern: r"(?i)\b(Autres)\)+",
        replacement: "${1}",
    },
];

/// A rule with its pattern compiled.
#[derive(Debug)]
pub struct Rule {
    pub def: RuleDef,
    regex: Regex,
}

impl Rule {
    fn compile(def: RuleDef) -> Self {
        let regex = Regex::new(def.pattern).expect("Invalid canonicalization rule regex");
        Self { def, regex }
    }

    /// Apply this rule to every match in `value`.
    pub fn apply(&self, value: &str) -> String {
        self.regex
            .replace_all(value, self.def.replacement)
            .into_owned()
    }
}

static CANONICAL: LazyLock<Vec<Rule>> =
    LazyLock::new(|| CANONICAL_RULES.into_iter().map(Rule::compile).collect());

static VARIANTS: LazyLock<Vec<Rule>> =
    LazyLock::new(|| VARIANT_RULES.into_iter().map(Rule::compile).collect());

/// The compiled canonicalization table.
pub fn canonical_rules() -> &'static [Rule] {
    &CANONICAL
}

fn apply_all(rules: &[Rule], value: &str) -> String {
    rules
        .iter()
        .fold(value.to_string(), |acc, rule| rule.apply(&acc))
}

/// Canonicalize one raw token (already split on commas).
///
/// Blank values, a lone underscore and missing-value placeholders yield the
/// empty string.
pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "_" || is_missing(trimmed) {
        return String::new();
    }
    apply_all(&CANONICAL, trimmed).trim().to_string()
}

/// Unify the "autre(s)" variants of a whole field value.
///
/// The value is neither split, trimmed nor reordered. Missing values yield
/// the empty string.
pub fn normalize_variants(raw: &str) -> String {
    if is_missing(raw) {
        return String::new();
    }
    apply_all(&VARIANTS, raw)
}

/// Split a field value on commas and canonicalize each part, dropping empties.
pub fn canonical_tokens(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(canonicalize)
        .filter(|token| !token.is_empty())
}
