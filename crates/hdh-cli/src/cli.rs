//! CLI argument definitions for `hdh-catalog`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hdh_cli::catalog::{RequestArgs, SourceOverrides};

#[derive(Parser)]
#[command(
    name = "hdh-catalog",
    version,
    about = "Search the Health Data Hub project register",
    long_about = "Search the Health Data Hub project register.\n\n\
                  Normalizes the register export, expands SNDS/HDH data sources\n\
                  and filters projects by facet, free text and responsible entity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter projects and print the matching ones.
    Search(SearchArgs),

    /// List the options of a facet or column.
    Facets(FacetsArgs),

    /// Print project counts by status.
    Stats(SourceArgs),
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Register export (overrides the config file).
    #[arg(long = "data", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// File read when the register export is unavailable.
    #[arg(long = "fallback", value_name = "PATH")]
    pub fallback: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// CSV field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,
}

impl SourceArgs {
    pub fn overrides(&self) -> SourceOverrides {
        SourceOverrides {
            config: self.config.clone(),
            data: self.data.clone(),
            fallback: self.fallback.clone(),
            delimiter: self.delimiter,
        }
    }
}

#[derive(Parser)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Free text matched against every column.
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Responsible entity category (repeatable; ALL for no constraint).
    #[arg(long = "entity-type", value_name = "TYPE")]
    pub entity_types: Vec<String>,

    /// Normalized medical domain (repeatable).
    #[arg(long = "domain")]
    pub domains: Vec<String>,

    /// Purpose (repeatable).
    #[arg(long = "purpose")]
    pub purposes: Vec<String>,

    /// Objective (repeatable).
    #[arg(long = "objective")]
    pub objectives: Vec<String>,

    /// Data source; SNDS and HDH also match their sub-components (repeatable).
    #[arg(long = "source")]
    pub sources: Vec<String>,

    /// Project start year (repeatable).
    #[arg(long = "year")]
    pub years: Vec<String>,

    /// Project status: "En cours", "Terminé" or ALL.
    #[arg(long = "status")]
    pub status: Option<String>,

    /// Free text matched against responsible entities.
    #[arg(long = "entity-search", value_name = "QUERY")]
    pub entity_search: Option<String>,

    /// Exact responsible entity name (repeatable).
    #[arg(long = "entity", value_name = "NAME")]
    pub entities: Vec<String>,

    /// Write every matching project to this CSV file.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Maximum number of rows printed.
    #[arg(long = "limit", default_value_t = 50)]
    pub limit: usize,
}

impl SearchArgs {
    pub fn request_args(&self) -> RequestArgs {
        RequestArgs {
            query: self.query.clone(),
            entity_types: self.entity_types.clone(),
            domains: self.domains.clone(),
            purposes: self.purposes.clone(),
            objectives: self.objectives.clone(),
            sources: self.sources.clone(),
            years: self.years.clone(),
            status: self.status.clone(),
            entity_search: self.entity_search.clone(),
            entities: self.entities.clone(),
        }
    }
}

#[derive(Parser)]
pub struct FacetsArgs {
    /// Facet (entity-type, domain, purpose, objectives, source, year,
    /// entity, status) or any column label.
    #[arg(value_name = "FIELD")]
    pub field: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
