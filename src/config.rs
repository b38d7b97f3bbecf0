//! Configuration types for jsonburst
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::time::Duration;

/// Fixed per-request timeout applied at the HTTP client level
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Worker count used when none is given
pub const DEFAULT_WORKERS: usize = 1;

/// Fire one concurrent burst of HTTP GET requests and validate the JSON replies
#[derive(Parser, Debug, Clone)]
#[command(
    name = "jsonburst",
    version,
    about = "Fire one concurrent burst of HTTP GET requests and validate the JSON replies",
    long_about = "Issues WORKERS simultaneous GET requests against URL, waits for every one \
                  to finish, and checks that each response body is valid JSON.\n\n\
                  Each request is bounded by a fixed 5 second timeout.",
    after_help = "EXAMPLES:\n    \
        jsonburst http://localhost:8080/health\n    \
        jsonburst https://api.example.com/items 50\n    \
        jsonburst http://127.0.0.1:3000/ 200 -v"
)]
pub struct CliArgs {
    /// Target endpoint
    #[arg(value_name = "URL")]
    pub url: String,

    /// Number of concurrent requests to issue
    #[arg(
        value_name = "WORKERS",
        default_value_t = DEFAULT_WORKERS.to_string(),
        allow_negative_numbers = true
    )]
    pub worker_count: String,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target URL, checked only by the HTTP layer at request time
    pub url: String,

    /// Number of concurrent workers (always >= 1)
    pub workers: usize,

    /// Per-request client timeout
    pub timeout: Duration,
}

impl RunConfig {
    /// Create a configuration for `workers` requests against `url`
    pub fn new(url: impl Into<String>, workers: usize) -> Result<Self, ConfigError> {
        let url = url.into();
        if url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if workers < 1 {
            return Err(ConfigError::InvalidWorkerCount {
                value: workers.to_string(),
            });
        }

        Ok(Self {
            url,
            workers,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Override the request timeout.
    ///
    /// The command line never exposes this; it exists so test harnesses can
    /// shorten the bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create validated config from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let workers = parse_worker_count(&args.worker_count)?;
        Self::new(args.url, workers)
    }
}

/// Parse a decimal worker count, rejecting anything below one
pub fn parse_worker_count(raw: &str) -> Result<usize, ConfigError> {
    raw.parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| ConfigError::InvalidWorkerCount {
            value: raw.to_string(),
        })
}
