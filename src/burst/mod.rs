//! One-shot request burst
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Coordinator        │
//!                 │  - spawns N workers      │
//!                 │  - drains results        │
//!                 └────────────┬─────────────┘
//!                              │ spawn
//!       ┌──────────────────────┼──────────────────────┐
//!       │                      │                      │
//! ┌─────▼─────┐          ┌─────▼─────┐          ┌─────▼─────┐
//! │  Worker 0 │          │  Worker 1 │   ...    │ Worker N-1│
//! │  GET+JSON │          │  GET+JSON │          │  GET+JSON │
//! └─────┬─────┘          └─────┬─────┘          └─────┬─────┘
//!       └──────────────────────┼──────────────────────┘
//!                              ▼
//!                 ┌──────────────────────────┐     ┌──────────────┐
//!                 │   Result channel (mpsc)  │◄────│   Watcher    │
//!                 └────────────┬─────────────┘     │ join all,    │
//!                              │                   │ then close   │
//!                              ▼                   └──────────────┘
//!                 ┌──────────────────────────┐
//!                 │   Consumer loop / Tally  │
//!                 └──────────────────────────┘
//! ```

pub mod coordinator;
pub mod outcome;
pub mod worker;

pub use coordinator::{run_with, Coordinator};
pub use outcome::{BurstReport, LatencyStats, RequestOutcome};
pub use worker::Worker;
