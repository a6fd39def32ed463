//! Logging setup for the `hdh-catalog` binary.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber that renders them.
//!
//! # Log Levels
//!
//! - `error`: no register source could be read
//! - `warn`: degraded acquisition, unresolved columns
//! - `info`: load and export outcomes
//! - `debug`: per-stage counts and timings (enrichment, filtering)
//!
//! # Usage
//!
//! ```ignore
//! use hdh_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::default().with_level_filter(LevelFilter::DEBUG);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Crates whose events follow the configured level.
const WORKSPACE_TARGETS: [&str; 6] = [
    "hdh_cli",
    "hdh_ingest",
    "hdh_model",
    "hdh_normalization",
    "hdh_output",
    "hdh_search",
];

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level for workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the computed filter when it is set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Include the module path of each event.
    pub with_target: bool,
    /// Emit span close events (json format only).
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// One JSON object per event.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, enable: bool) -> Self {
        self.use_env_filter = enable;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Filter directives for the configured level, ignoring `RUST_LOG`.
    ///
    /// Other crates stay at `warn` unless the level is stricter.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let external = if self.level_filter < LevelFilter::WARN {
            level.clone()
        } else {
            "warn".to_string()
        };
        let mut directives = vec![external];
        directives.extend(
            WORKSPACE_TARGETS
                .iter()
                .map(|target| format!("{target}={level}")),
        );
        directives.join(",")
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedFileWriter::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(format_layer(config, writer))
        .init();
}

fn format_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    let span_events = if config.with_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().with_span_events(span_events).boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.pretty().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer
            .pretty()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.directives())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        let config = LogConfig::default().with_level_filter(LevelFilter::DEBUG);
        assert_eq!(
            config.directives(),
            "warn,hdh_cli=debug,hdh_ingest=debug,hdh_model=debug,\
             hdh_normalization=debug,hdh_output=debug,hdh_search=debug"
        );
    }

    #[test]
    fn quiet_levels_apply_to_external_crates() {
        let config = LogConfig::default().with_level_filter(LevelFilter::ERROR);
        assert!(config.directives().starts_with("error,hdh_cli=error"));

        let off = LogConfig::default().with_level_filter(LevelFilter::OFF);
        assert!(off.directives().starts_with("off,"));
    }

    fn render(config: &LogConfig) -> String {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("render.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .expect("open log");
        let subscriber =
            tracing_subscriber::registry().with(format_layer(config, SharedFileWriter::new(file)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(match_count = 3, "search finished");
        });
        std::fs::read_to_string(&path).expect("read log")
    }

    #[test]
    fn timestamps_toggle_for_text_formats() {
        for format in [LogFormat::Compact, LogFormat::Pretty] {
            let bare = LogConfig::default()
                .with_format(format)
                .with_ansi(false)
                .with_timestamps(false);
            let line = render(&bare);
            assert!(line.trim_start().starts_with("INFO"), "{format:?}: {line}");
            assert!(line.contains("search finished"));

            let timed = render(&bare.clone().with_timestamps(true));
            assert!(
                timed.trim_start().starts_with(|c: char| c.is_ascii_digit()),
                "{format:?}: {timed}"
            );
        }
    }

    #[test]
    fn json_format_ignores_ansi() {
        let config = LogConfig::default().with_format(LogFormat::Json);
        let line = render(&config);
        assert!(line.contains("\"match_count\":3"));
        assert!(!line.contains('\u{1b}'));
    }
}
