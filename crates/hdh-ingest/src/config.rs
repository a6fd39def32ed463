//! Catalog acquisition configuration.
//!
//! ```toml
//! [source]
//! primary = "repertoire_projets.csv"
//! fallback = "backup/repertoire_projets.csv"
//! delimiter = ";"
//!
//! [cache]
//! ttl_secs = 3600
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::csv_table::ReadOptions;
use crate::error::{IngestError, Result};

/// Default register export file name.
pub const DEFAULT_PRIMARY: &str = "repertoire_projets.csv";

/// Default snapshot lifetime: one hour.
pub const DEFAULT_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub primary: PathBuf,
    pub fallback: Option<PathBuf>,
    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(DEFAULT_PRIMARY),
            fallback: None,
            delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    pub cache: CacheConfig,
}

impl CatalogConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| IngestError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse configuration text; `path` only labels errors.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| IngestError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.read_options()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_primary(mut self, primary: impl Into<PathBuf>) -> Self {
        self.source.primary = primary.into();
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.source.fallback = Some(fallback.into());
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.source.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache.ttl_secs = ttl.as_secs();
        self
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// CSV options for the configured delimiter.
    pub fn read_options(&self) -> Result<ReadOptions> {
        let delimiter = self.source.delimiter;
        if !delimiter.is_ascii() {
            return Err(IngestError::InvalidDelimiter { value: delimiter });
        }
        Ok(ReadOptions::default().with_delimiter(delimiter as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.source.primary, PathBuf::from("repertoire_projets.csv"));
        assert_eq!(config.source.fallback, None);
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert_eq!(config.read_options().unwrap().delimiter, b',');
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = CatalogConfig::parse(
            "[source]\nfallback = \"backup.csv\"\ndelimiter = \";\"\n",
            Path::new("hdh.toml"),
        )
        .unwrap();
        assert_eq!(config.source.primary, PathBuf::from(DEFAULT_PRIMARY));
        assert_eq!(config.source.fallback, Some(PathBuf::from("backup.csv")));
        assert_eq!(config.read_options().unwrap().delimiter, b';');
        assert_eq!(config.cache.ttl_secs, DEFAULT_TTL_SECS);
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let err = CatalogConfig::parse("[source]\ndelimiter = \"§\"\n", Path::new("hdh.toml"))
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidDelimiter { value: '§' }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = CatalogConfig::parse("[cache]\nttl_secs = \"soon\"\n", Path::new("hdh.toml"))
            .unwrap_err();
        assert!(matches!(err, IngestError::ConfigParse { .. }));
    }

    #[test]
    fn builder_overrides() {
        let config = CatalogConfig::default()
            .with_primary("a.csv")
            .with_fallback("b.csv")
            .with_delimiter('\t')
            .with_ttl(Duration::from_secs(60));
        assert_eq!(config.source.primary, PathBuf::from("a.csv"));
        assert_eq!(config.source.fallback, Some(PathBuf::from("b.csv")));
        assert_eq!(config.read_options().unwrap().delimiter, b'\t');
        assert_eq!(config.cache.ttl_secs, 60);
    }
}
