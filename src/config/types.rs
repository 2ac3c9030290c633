//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::config::constants::{
    CONTINUATION_TIMEOUT_SECS, DB_PATH, DEFAULT_LEGACY_URL, DEFAULT_LISTEN_ADDR, DEFAULT_NEW_URL,
    DEFAULT_PAGE_SIZE, REQUEST_TIMEOUT_SECS,
};
use crate::config::credentials::ApiCredentials;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Virtual-host inclusion mode for the legacy API.
///
/// Serialized as `INCLUDE` / `EXCLUDE`, which is both the legacy API's
/// parameter value and the value stored with saved searches.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum VirtualHosts {
    /// Include virtual hosts in legacy results
    #[serde(alias = "include")]
    Include,
    /// Exclude virtual hosts from legacy results
    #[default]
    #[serde(alias = "exclude")]
    Exclude,
}

/// Command-line options.
///
/// Tuning flags are global so they can be given before or after the
/// subcommand.
///
/// # Examples
///
/// ```bash
/// # Run the JSON API
/// hostdiff serve --listen 127.0.0.1:5000
///
/// # One-shot comparison across every page, saved under a name
/// hostdiff compare --legacy-query 'services.port: 22' --new-query 'host.services.port: 22' \
///     --fetch-all --save ssh-hosts
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "hostdiff",
    about = "Compares host search results between the legacy and new search APIs."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Database path (SQLite file) for saved searches
    #[arg(long, global = true, value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Records requested per page
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Overall HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout in seconds for each continuation-page fetch
    #[arg(long, global = true, default_value_t = CONTINUATION_TIMEOUT_SECS)]
    pub continuation_timeout_seconds: u64,

    /// Stop after this many pages per API (unlimited when omitted)
    #[arg(long, global = true)]
    pub max_pages: Option<usize>,

    /// Legacy API search endpoint
    #[arg(long, global = true, default_value = DEFAULT_LEGACY_URL)]
    pub legacy_url: String,

    /// New API search endpoint
    #[arg(long, global = true, default_value = DEFAULT_NEW_URL)]
    pub new_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the comparison JSON API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,
    },
    /// Run one comparison and print the result as JSON
    Compare {
        /// Query in the legacy API's language
        #[arg(long)]
        legacy_query: String,

        /// Query in the new API's language
        #[arg(long)]
        new_query: String,

        /// Legacy virtual-host mode
        #[arg(long, value_enum, default_value_t = VirtualHosts::Exclude)]
        virtual_hosts: VirtualHosts,

        /// Follow continuation tokens until both APIs are exhausted
        #[arg(long)]
        fetch_all: bool,

        /// Save the query pair and result under this name
        #[arg(long)]
        save: Option<String>,

        /// Replace an existing saved search with the same name
        #[arg(long, requires = "save")]
        overwrite: bool,
    },
    /// List saved searches, newest first
    List,
    /// Delete a saved search by id
    Delete {
        /// Saved search id
        id: i64,
    },
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use hostdiff::Config;
///
/// let config = Config {
///     page_size: 50,
///     max_pages: Some(10),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Records requested per page
    pub page_size: u32,

    /// Overall HTTP timeout in seconds
    pub timeout_seconds: u64,

    /// Timeout in seconds for each continuation-page fetch
    pub continuation_timeout_seconds: u64,

    /// Page cap per API
    pub max_pages: Option<usize>,

    /// Legacy API search endpoint
    pub legacy_url: String,

    /// New API search endpoint
    pub new_url: String,

    /// Address the JSON API listens on
    pub listen_addr: String,

    /// Credentials for both APIs
    pub credentials: ApiCredentials,
}

impl Config {
    /// Builds a `Config` from parsed CLI options and loaded credentials.
    pub fn from_opt(opt: &Opt, credentials: ApiCredentials) -> Self {
        let listen_addr = match &opt.command {
            Command::Serve { listen } => listen.clone(),
            _ => DEFAULT_LISTEN_ADDR.to_string(),
        };
        Self {
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
            db_path: opt.db_path.clone(),
            page_size: opt.page_size,
            timeout_seconds: opt.timeout_seconds,
            continuation_timeout_seconds: opt.continuation_timeout_seconds,
            max_pages: opt.max_pages,
            legacy_url: opt.legacy_url.clone(),
            new_url: opt.new_url.clone(),
            listen_addr,
            credentials,
        }
    }

    /// Continuation-page timeout as a `Duration`.
    pub fn continuation_timeout(&self) -> Duration {
        Duration::from_secs(self.continuation_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            continuation_timeout_seconds: CONTINUATION_TIMEOUT_SECS,
            max_pages: None,
            legacy_url: DEFAULT_LEGACY_URL.to_string(),
            new_url: DEFAULT_NEW_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            credentials: ApiCredentials::default(),
        }
    }
}
