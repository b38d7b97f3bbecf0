//! jsonburst - Concurrent HTTP burst tester
//!
//! Fires exactly N simultaneous GET requests at one URL, waits for all of
//! them, and checks that every response body is valid JSON. Reports each
//! request as it completes, followed by success/failure counts and timing.
//!
//! # Features
//!
//! - **Single Burst**: One fan-out of N requests, no retries, no pacing.
//!
//! - **Bounded Requests**: Every request runs under a fixed 5 second
//!   client timeout, so a whole burst is bounded regardless of N.
//!
//! - **Reliable Fan-In**: A completion watcher joins every worker before
//!   closing the result channel; exactly N results are always reported.
//!
//! # Example
//!
//! ```bash
//! # One request
//! jsonburst http://localhost:8080/health
//!
//! # Fifty concurrent requests with debug logging
//! jsonburst https://api.example.com/items 50 -v
//! ```

pub mod burst;
pub mod config;
pub mod error;
pub mod report;

pub use burst::{BurstReport, Coordinator, RequestOutcome};
pub use config::{CliArgs, RunConfig};
pub use error::{BurstError, ConfigError, RequestError, Result};
