//! Error types for jsonburst
//!
//! This module defines the error hierarchy for:
//! - Argument and configuration errors (abort before any request is sent)
//! - Per-request transport and payload errors (carried inside results)
//! - Setup errors for the HTTP client
//!
//! Per-request errors never propagate as `Err` out of the coordinator. A
//! worker folds every failure into its `RequestOutcome` and the coordinator
//! only ever counts them.

use thiserror::Error;

/// Top-level error type for the jsonburst application
#[derive(Error, Debug)]
pub enum BurstError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built (TLS backend initialization)
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No target URL was supplied
    #[error("usage: jsonburst <url> [worker_count]")]
    MissingUrl,

    /// Worker count did not parse or was below one
    #[error("invalid number of workers: {value}")]
    InvalidWorkerCount { value: String },
}

/// Broad classification of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Client-level timeout elapsed
    Timeout,

    /// Connection refused, DNS failure, unreachable host
    Connect,

    /// Request could not be built (malformed URL, unsupported scheme)
    Request,

    /// Anything else reported by the HTTP layer
    Other,
}

impl TransportKind {
    /// Classify a reqwest error
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else if err.is_builder() || err.is_request() {
            TransportKind::Request
        } else {
            TransportKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Timeout => "timeout",
            TransportKind::Connect => "connect",
            TransportKind::Request => "request",
            TransportKind::Other => "other",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure detail for a single request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Timeout, DNS, connection refused, body read aborted
    #[error("transport error ({kind}): {message}")]
    Transport { kind: TransportKind, message: String },

    /// Response body was not syntactically valid JSON
    #[error("JSON decode error: {message}")]
    InvalidJson { message: String },

    /// Worker task panicked before delivering its result
    #[error("worker panicked: {message}")]
    WorkerPanicked { message: String },
}

impl RequestError {
    /// Build a transport error from a reqwest error
    pub fn transport(err: &reqwest::Error) -> Self {
        RequestError::Transport {
            kind: TransportKind::classify(err),
            message: err.to_string(),
        }
    }

    /// Returns true if no usable response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport { .. })
    }

    /// Returns true if the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            RequestError::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        )
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::InvalidJson {
            message: err.to_string(),
        }
    }
}

/// Result type alias for BurstError
pub type Result<T> = std::result::Result<T, BurstError>;
