use hdh_normalization::{SNDS_COMPONENTS, canonicalize, enrich_sources};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "Autre",
    "autres",
    "(s)",
    "(",
    ")",
    "s",
    " ",
    ",",
    "_",
    "nan",
    "Enquête",
    "enquete",
    "SNDS",
    "HDH",
    "PMSI",
    "Base des causes médicales de décès (CépiDC)",
    "Echantillon du ENSD",
    "Registre",
];

fn raw_value() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS.to_vec()), 0..8)
        .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn canonicalize_is_idempotent(raw in raw_value()) {
        let once = canonicalize(&raw);
        prop_assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn canonical_tokens_are_trimmed(raw in raw_value()) {
        let token = canonicalize(&raw);
        prop_assert_eq!(token.trim(), token.as_str());
    }

    #[test]
    fn enrichment_is_deterministic(
        primary in raw_value(),
        snds in raw_value(),
        hdh in raw_value(),
        other in raw_value(),
    ) {
        let first = enrich_sources(&primary, &snds, &hdh, &other);
        let second = enrich_sources(&primary, &snds, &hdh, &other);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn component_implies_umbrella(index in 0..SNDS_COMPONENTS.len(), prefix in raw_value()) {
        let component = SNDS_COMPONENTS[index].to_uppercase();
        let primary = format!("{prefix},{component}");
        let enriched = enrich_sources(&primary, "", "", "");
        let tokens: Vec<&str> = enriched.split(", ").collect();
        prop_assert!(tokens.contains(&"SNDS"));
        let expected = format!("SNDS - {component}");
        prop_assert!(tokens.contains(&expected.as_str()), "{enriched}");
    }
}
