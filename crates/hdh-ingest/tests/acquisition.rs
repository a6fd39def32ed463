//! File-based acquisition tests.

use std::fs;
use std::path::Path;

use hdh_ingest::{
    CatalogConfig, DatasetOrigin, IngestError, ReadOptions, SnapshotCache, load_catalog,
    read_csv_dataset,
};
use hdh_model::Field;
use tempfile::TempDir;

const REGISTER: &str = "\u{feff}Référence,title,Source de données utilisées,Composante(s) de la base principale du SNDS mobilisée(s),Etape  : Complétude\n\
P1,Cohorte,\"SNDS, Autre(s)\",\"PMSI, DCIR\",\n\
P2,Registre,HDH,,2023-05-01\n";

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn reads_register_export() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "register.csv", REGISTER);

    let dataset = read_csv_dataset(&path, &ReadOptions::default()).expect("read register");
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.headers()[0], "Référence");
    assert_eq!(dataset.headers()[4], "Etape : Complétude");

    let first = &dataset.records()[0];
    assert_eq!(first.primary_source, "SNDS, Autre(s)");
    assert_eq!(first.snds_components, "PMSI, DCIR");
    assert_eq!(first.get(Field::Completion), "");
    assert_eq!(dataset.records()[1].completion, "2023-05-01");
    assert_eq!(first.responsible[0], "");
}

#[test]
fn missing_file_is_reported() {
    let err = read_csv_dataset(Path::new("/nonexistent/register.csv"), &ReadOptions::default())
        .expect_err("missing file");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn primary_source_wins() {
    let dir = TempDir::new().expect("tempdir");
    let primary = write(&dir, "primary.csv", REGISTER);
    let fallback = write(&dir, "fallback.csv", "Référence\nF1\n");

    let config = CatalogConfig::default()
        .with_primary(&primary)
        .with_fallback(&fallback);
    let loaded = load_catalog(&config).expect("load");
    assert_eq!(loaded.origin, DatasetOrigin::Primary);
    assert_eq!(loaded.path.as_deref(), Some(primary.as_path()));
    assert!(!loaded.is_degraded());
    assert_eq!(loaded.dataset.len(), 2);
}

#[test]
fn falls_back_when_primary_is_unreadable() {
    let dir = TempDir::new().expect("tempdir");
    let fallback = write(&dir, "fallback.csv", "Référence\nF1\n");

    let config = CatalogConfig::default()
        .with_primary(dir.path().join("missing.csv"))
        .with_fallback(&fallback);
    let loaded = load_catalog(&config).expect("load");
    assert_eq!(loaded.origin, DatasetOrigin::Fallback);
    assert!(loaded.is_degraded());
    assert_eq!(loaded.dataset.records()[0].reference, "F1");
}

#[test]
fn empty_primary_file_falls_back() {
    let dir = TempDir::new().expect("tempdir");
    let primary = write(&dir, "primary.csv", "");
    let fallback = write(&dir, "fallback.csv", REGISTER);

    let config = CatalogConfig::default()
        .with_primary(&primary)
        .with_fallback(&fallback);
    let loaded = load_catalog(&config).expect("load");
    assert_eq!(loaded.origin, DatasetOrigin::Fallback);
}

#[test]
fn no_source_yields_explicit_empty_dataset() {
    let dir = TempDir::new().expect("tempdir");
    let config = CatalogConfig::default()
        .with_primary(dir.path().join("missing.csv"))
        .with_fallback(dir.path().join("also-missing.csv"));
    let loaded = load_catalog(&config).expect("load");
    assert_eq!(loaded.origin, DatasetOrigin::Empty);
    assert_eq!(loaded.path, None);
    assert!(loaded.dataset.is_empty());
}

#[test]
fn config_file_drives_loading() {
    let dir = TempDir::new().expect("tempdir");
    let data = write(&dir, "register.csv", "Référence;title\nP7;Étude\n");
    let config_path = write(
        &dir,
        "hdh.toml",
        &format!(
            "[source]\nprimary = {:?}\ndelimiter = \";\"\n\n[cache]\nttl_secs = 120\n",
            data.display().to_string()
        ),
    );

    let config = CatalogConfig::load(&config_path).expect("config");
    assert_eq!(config.cache.ttl_secs, 120);
    let loaded = load_catalog(&config).expect("load");
    assert_eq!(loaded.origin, DatasetOrigin::Primary);
    assert_eq!(loaded.dataset.records()[0].title, "Étude");
}

#[test]
fn cache_reuses_loaded_catalog() {
    let dir = TempDir::new().expect("tempdir");
    let primary = write(&dir, "primary.csv", REGISTER);
    let config = CatalogConfig::default().with_primary(&primary);
    let key = primary.display().to_string();

    let mut cache = SnapshotCache::new(config.ttl());
    let first = cache
        .get_or_load(&key, || load_catalog(&config).map(|loaded| loaded.dataset))
        .expect("first load");

    fs::write(&primary, "Référence\nP9\n").expect("rewrite");
    let cached = cache
        .get_or_load(&key, || load_catalog(&config).map(|loaded| loaded.dataset))
        .expect("cached");
    assert_eq!(cached.len(), first.len());

    let refreshed = cache
        .refresh(&key, || load_catalog(&config).map(|loaded| loaded.dataset))
        .expect("refresh");
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed.records()[0].reference, "P9");
}
