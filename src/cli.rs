//! Command-line interface parsing for Photogrid
//!
//! This module handles parsing of CLI arguments using clap. Every option can
//! also come from the environment, which is how the Unsplash access key is
//! normally supplied.

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::data::unsplash::UNSPLASH_BASE_URL;
use crate::data::DEFAULT_QUERY;

/// Default tracing filter when none is configured
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// No access key was given on the command line or in the environment
    #[error("Missing Unsplash access key: pass --client-id or set UNSPLASH_ACCESS_KEY")]
    MissingClientId,

    /// The starting query is blank
    #[error("Invalid query: the search term must not be empty")]
    EmptyQuery,

    /// The API URL is not an absolute http(s) URL
    #[error("Invalid API URL: '{0}'")]
    InvalidApiUrl(String),
}

/// Photogrid - Browse Unsplash image search results in the terminal
#[derive(Parser, Debug)]
#[command(name = "photogrid")]
#[command(about = "Search and page through Unsplash photos in the terminal")]
#[command(version)]
pub struct Cli {
    /// Search term to show on startup
    #[arg(short, long, value_name = "TEXT", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Unsplash access key used as the client_id of every request
    #[arg(long, value_name = "KEY", env = "UNSPLASH_ACCESS_KEY", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Base URL of the search API
    #[arg(long, value_name = "URL", env = "PHOTOGRID_API_URL", default_value = UNSPLASH_BASE_URL)]
    pub api_url: String,

    /// Tracing filter for the log file, e.g. "debug" or "photogrid=trace"
    #[arg(long, value_name = "FILTER", env = "PHOTOGRID_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,
}

/// Validated configuration for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Trimmed starting query
    pub query: String,
    /// Unsplash access key
    pub client_id: String,
    /// Base URL of the search API
    pub api_url: String,
    /// Tracing filter directive
    pub log_level: String,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with trimmed values
    /// * `Err(CliError)` if the key is missing, the query is blank or the URL is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let client_id = cli
            .client_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(CliError::MissingClientId)?;

        let query = cli.query.trim();
        if query.is_empty() {
            return Err(CliError::EmptyQuery);
        }

        let api_url = parse_api_url(&cli.api_url)?;

        Ok(StartupConfig {
            query: query.to_string(),
            client_id: client_id.to_string(),
            api_url,
            log_level: cli.log_level.clone(),
        })
    }
}

/// Checks that `raw` is an absolute http(s) URL
pub fn parse_api_url(raw: &str) -> Result<String, CliError> {
    let invalid = || CliError::InvalidApiUrl(raw.to_string());
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim().trim_end_matches('/').to_string()),
        _ => Err(invalid()),
    }
}
